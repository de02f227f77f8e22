//! Frame-driven animation of fragment sets.
//!
//! [`ExplosionController`] is the host-facing entry point. It owns a
//! [`FragmentAnimator`], which in turn keeps one [`AnimationState`] (or
//! [`BallisticState`]) per fragment.

mod animator;
pub mod controller;
mod state;

pub use animator::FragmentAnimator;
pub use controller::{ExplosionController, PointerTarget};
pub use state::{AnimationState, BallisticState, DecayFilter, Phase};
