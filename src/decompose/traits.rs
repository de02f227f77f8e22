//! Core trait for decomposition strategies.

use super::DecomposeContext;
use crate::error::ShatterError;
use crate::fragment::{Fragment, FragmentSet};

/// What a pointer hovering one fragment explodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverScope {
    /// Only the hovered fragment.
    #[default]
    PerFragment,
    /// The whole set; hovering any part of the shape counts.
    Group,
}

/// How fragments move while exploded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionMode {
    /// Eased interpolation between rest and target poses.
    #[default]
    Bounded,
    /// Open-ended flight along each fragment's velocity, pulled back to rest
    /// when the intent drops.
    Ballistic,
}

/// Splits a shape into fragments.
///
/// Implementations assign ids sequentially from 0 and fill in every
/// fragment's exploded pose through the context's planner. They are re-run
/// from scratch whenever their inputs change; nothing is patched in place.
pub trait ShapeDecomposer {
    /// Produce the fragments. An empty result means the shape has nothing to
    /// fragment and should be drawn whole.
    fn decompose(
        &self,
        ctx: &mut DecomposeContext<'_>,
    ) -> Result<Vec<Fragment>, ShatterError>;

    /// Hover behaviour of the produced set. Default: per fragment.
    fn hover_scope(&self) -> HoverScope {
        HoverScope::PerFragment
    }

    /// Motion mode of the produced set. Default: bounded.
    fn motion(&self) -> MotionMode {
        MotionMode::Bounded
    }

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }

    /// Decompose and wrap the result in a [`FragmentSet`].
    fn build(
        &self,
        ctx: &mut DecomposeContext<'_>,
    ) -> Result<FragmentSet, ShatterError> {
        let fragments = self.decompose(ctx)?;
        FragmentSet::new(
            fragments,
            self.hover_scope(),
            self.motion(),
            self.name(),
        )
    }
}
