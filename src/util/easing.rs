//! Easing functions for fragment interpolation.
//!
//! Maps normalized progress to shaped progress. All curves are pure and
//! allocation free; the animator evaluates one per fragment per frame.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Overshoot constant of the classic "back" ease-out curve.
pub const BACK_OVERSHOOT: f32 = 1.70158;

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First inner control point.
        c1: f32,
        /// Second inner control point.
        c2: f32,
    },
    /// Back ease-out: overshoots past 1 before settling.
    /// Formula: 1 + (k+1)(t-1)³ + k(t-1)²
    BackOut {
        /// Overshoot amount `k`; [`BACK_OVERSHOOT`] gives the classic curve.
        overshoot: f32,
    },
}

impl EasingFunction {
    /// Default easing function: back ease-out with the classic overshoot, so
    /// fragments fly slightly past their target and settle back.
    pub const DEFAULT: EasingFunction = EasingFunction::BackOut {
        overshoot: BACK_OVERSHOOT,
    };

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0]. Every curve maps 0 to exactly 0 and
    /// 1 to exactly 1; `BackOut` exceeds 1 in between.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        // Exact endpoints keep settled fragments bit-identical to their poses.
        if t == 0.0 || t == 1.0 {
            return t;
        }

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
            EasingFunction::BackOut { overshoot } => {
                let c1 = *overshoot;
                let c3 = c1 + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u * u * u + c1 * u * u
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
