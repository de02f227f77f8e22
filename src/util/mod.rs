//! Shared utilities for the fragmentation engine.
//!
//! Easing curves and the per-frame clock.

pub mod easing;
pub mod frame_timing;
