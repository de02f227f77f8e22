//! Per-fragment animation state.
//!
//! Bounded fragments carry a scalar progress that an exponential-decay
//! filter pulls toward 0 (assembled) or 1 (exploded). Ballistic fragments
//! carry a position that flies along a velocity while exploding and is
//! pulled back to rest otherwise.

use glam::Vec3;

use crate::options::AnimationOptions;

/// Coarse animation state of one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Assembled.
    Resting,
    /// Between rest and exploded.
    Transitioning,
    /// Fully exploded (or flying, for ballistic fragments).
    Exploded,
}

/// Frame-rate independent exponential approach.
///
/// Each frame covers `1 - base^(dt * speed)` of the remaining distance, so
/// after one second at speed 1 a fraction `base` of the distance is left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayFilter {
    /// Distance below which the value counts as arrived.
    pub epsilon: f32,
    /// Fraction of distance left after one second at speed 1.
    pub base: f32,
}

impl DecayFilter {
    /// Filter configured from animation options.
    #[must_use]
    pub fn from_options(options: &AnimationOptions) -> Self {
        Self {
            epsilon: options.epsilon,
            base: options.decay_base,
        }
    }

    /// Fraction of the remaining distance covered in `dt` seconds.
    #[must_use]
    pub fn blend(&self, dt: f32, speed: f32) -> f32 {
        let keep = self.base.clamp(0.0, 1.0).powf((dt * speed).max(0.0));
        let blend = 1.0 - keep;
        if blend.is_finite() {
            blend.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Default for DecayFilter {
    fn default() -> Self {
        Self::from_options(&AnimationOptions::default())
    }
}

/// Progress of a bounded fragment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    progress: f32,
    target: f32,
}

impl AnimationState {
    /// Assembled, with no pending motion.
    pub const REST: Self = Self {
        progress: 0.0,
        target: 0.0,
    };

    /// Raw filter output in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// 1 while the fragment wants to be exploded, else 0.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Step the filter one frame toward the target implied by `intent`.
    pub fn advance(
        &mut self,
        intent: bool,
        dt: f32,
        speed: f32,
        filter: &DecayFilter,
    ) {
        self.target = if intent { 1.0 } else { 0.0 };
        if (self.progress - self.target).abs() > filter.epsilon {
            self.progress +=
                (self.target - self.progress) * filter.blend(dt, speed);
        }
    }

    /// Progress used for display: the target itself once within `epsilon`
    /// of it, so a converged fragment shows exactly its rest or exploded
    /// pose.
    #[must_use]
    pub fn settled_progress(&self, epsilon: f32) -> f32 {
        if self.is_settled(epsilon) {
            self.target
        } else {
            self.progress
        }
    }

    /// Whether the filter has converged on its target.
    #[must_use]
    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.progress - self.target).abs() <= epsilon
    }

    /// Phase from the raw progress.
    #[must_use]
    pub fn phase(&self, epsilon: f32) -> Phase {
        if self.progress <= epsilon {
            Phase::Resting
        } else if self.progress >= 1.0 - epsilon {
            Phase::Exploded
        } else {
            Phase::Transitioning
        }
    }
}

/// Position of a ballistic fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticState {
    position: Vec3,
    flying: bool,
}

impl BallisticState {
    /// At `rest`, not flying.
    #[must_use]
    pub fn at_rest(rest: Vec3) -> Self {
        Self {
            position: rest,
            flying: false,
        }
    }

    /// Current (unsettled) position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Whether the last frame had explode intent.
    #[must_use]
    pub fn is_flying(&self) -> bool {
        self.flying
    }

    /// Fly along `velocity` while `intent` holds; otherwise close
    /// `min(dt * return_rate, 1)` of the gap to `rest`.
    pub fn advance(
        &mut self,
        intent: bool,
        velocity: Vec3,
        rest: Vec3,
        dt: f32,
        return_rate: f32,
    ) {
        self.flying = intent;
        if intent {
            self.position += velocity * dt;
        } else {
            let pull = (dt * return_rate).clamp(0.0, 1.0);
            self.position += (rest - self.position) * pull;
        }
    }

    /// Whether the position is back within `epsilon` of `rest`.
    #[must_use]
    pub fn is_home(&self, rest: Vec3, epsilon: f32) -> bool {
        self.position.distance(rest) <= epsilon
    }

    /// Position used for display: `rest` exactly once home and not flying.
    #[must_use]
    pub fn displayed(&self, rest: Vec3, epsilon: f32) -> Vec3 {
        if !self.flying && self.is_home(rest, epsilon) {
            rest
        } else {
            self.position
        }
    }

    /// Resting when home, exploded while flying, transitioning on the way
    /// back.
    #[must_use]
    pub fn phase(&self, rest: Vec3, epsilon: f32) -> Phase {
        if self.flying {
            Phase::Exploded
        } else if self.is_home(rest, epsilon) {
            Phase::Resting
        } else {
            Phase::Transitioning
        }
    }
}
