// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Procedural fragmentation and explosion animation engine.
//!
//! Shatter splits a shape into discrete fragments, plans an "exploded" pose
//! for every fragment, and animates the fragments between their rest and
//! exploded poses with a frame-rate independent exponential filter and an
//! overshoot easing curve. It owns pose math and timing only; drawing the
//! fragments is left to the host renderer.
//!
//! # Key entry points
//!
//! - [`animation::ExplosionController`] - owns the fragment set, the global
//!   explode switch and pointer hover state, and emits per-frame poses
//! - [`decompose::ShapeSource`] - what to fragment (procedural cube, imported
//!   model, rock particles, hex-tiled sphere, organic chunks)
//! - [`scene::SceneGraph`] - the traversal contract imported models implement
//! - [`options::Options`] - tuning for animation, trajectories and
//!   decomposition, loadable from TOML
//!
//! # Frame loop
//!
//! Everything runs on the host's frame callback. Each frame the host takes one
//! `Δt` snapshot (see [`util::frame_timing::FrameClock`]), calls
//! [`animation::ExplosionController::advance`], and applies the returned
//! [`fragment::FragmentPose`]s to its payloads. No call blocks and nothing is
//! shared across threads.

pub mod animation;
pub mod decompose;
pub mod error;
pub mod fragment;
pub mod options;
pub mod scene;
pub mod trajectory;
pub mod util;

pub use error::ShatterError;
