//! Frame clock handing out one delta-time snapshot per rendered frame.

use web_time::{Duration, Instant};

/// Per-frame clock producing the single `Δt` snapshot every fragment is
/// advanced with, plus a smoothed FPS readout.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the previous tick (`None` before the first frame)
    last_frame: Option<Instant>,
    /// Largest delta handed out, in seconds
    max_delta: f32,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Create a clock that never reports a delta above `max_delta` seconds.
    ///
    /// Long stalls (a backgrounded tab, a debugger pause) would otherwise hand
    /// the animator one enormous step.
    #[must_use]
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_frame: None,
            max_delta: max_delta.max(0.0),
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
        }
    }

    /// Take the delta snapshot for the frame starting now.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Take the delta snapshot for a frame starting at `now`.
    ///
    /// The first tick returns 0. Clocks that run backwards also yield 0.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let Some(last) = self.last_frame.replace(now) else {
            return 0.0;
        };
        let elapsed = now
            .checked_duration_since(last)
            .unwrap_or(Duration::ZERO)
            .as_secs_f32();

        if elapsed > 0.0 {
            let instant_fps = 1.0 / elapsed;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        elapsed.min(self.max_delta)
    }

    /// Forget the previous timestamp so the next tick starts fresh.
    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}
