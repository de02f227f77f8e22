//! Headless preview of the explosion effect.
//!
//! Decomposes the default shape, plays one explode and reassemble cycle at
//! 60 fps and logs phase changes. Pass an options TOML path as the only
//! argument to try a preset; set `RUST_LOG=info` (or `debug`) to see output.

use std::path::Path;

use shatter::animation::{ExplosionController, Phase};
use shatter::decompose::ShapeSource;
use shatter::fragment::FragmentId;
use shatter::options::Options;
use shatter::util::frame_timing::FrameClock;
use shatter::ShatterError;
use web_time::{Duration, Instant};

/// One frame at 60 fps.
const FRAME: Duration = Duration::from_micros(16_667);
/// Give up on a half-cycle after this many frames.
const MAX_FRAMES: usize = 1200;

fn main() -> Result<(), ShatterError> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };
    let mut clock = FrameClock::new(options.animation.max_delta);
    let mut controller = ExplosionController::new(options);
    controller.set_seed(Some(7));
    let _ = controller.set_source(&ShapeSource::default())?;
    log::info!(
        "decomposed default shape into {} fragments",
        controller.fragments().len()
    );

    let mut now = Instant::now();
    let _ = clock.tick_at(now);
    for exploded in [true, false] {
        controller.set_exploded(exploded);
        let frames = run_until_settled(&mut controller, &mut clock, &mut now);
        log::info!(
            "{} settled after {frames} frames",
            if exploded { "explode" } else { "reassemble" }
        );
    }
    log::info!("average {:.1} fps", clock.fps());
    Ok(())
}

/// Advance until every fragment has settled, logging phase changes of the
/// first fragment. Returns the number of frames taken.
fn run_until_settled(
    controller: &mut ExplosionController,
    clock: &mut FrameClock,
    now: &mut Instant,
) -> usize {
    let probe = FragmentId(0);
    let mut phase = controller.phase(probe).unwrap_or(Phase::Resting);
    for frame in 1..=MAX_FRAMES {
        *now += FRAME;
        let dt = clock.tick_at(*now);
        let _ = controller.advance(dt);

        let next = controller.phase(probe).unwrap_or(phase);
        if next != phase {
            log::info!("frame {frame}: fragment {probe} {phase:?} -> {next:?}");
            phase = next;
        }
        if controller.is_settled() {
            return frame;
        }
    }
    log::warn!("not settled after {MAX_FRAMES} frames");
    MAX_FRAMES
}
