//! Rough rock chunks that scatter a short distance from the origin.

use std::sync::Arc;

use glam::Vec3;

use super::{
    clamp_count, rock_mesh, DecomposeContext, HoverScope, ShapeDecomposer,
};
use crate::error::ShatterError;
use crate::fragment::{Fragment, FragmentId, Payload};
use crate::trajectory::uniform;

/// Chunks sharing one roughened rock mesh. Every chunk rests at the origin
/// with its own scale and drifts out a little with a small tumble.
#[derive(Debug, Clone, Copy)]
pub struct ChunkDecomposer {
    /// Number of chunks.
    pub count: u32,
}

impl ShapeDecomposer for ChunkDecomposer {
    fn decompose(
        &self,
        ctx: &mut DecomposeContext<'_>,
    ) -> Result<Vec<Fragment>, ShatterError> {
        let o = ctx.options;
        let count = clamp_count(self.count, o, self.name());
        let mesh = Arc::new(
            rock_mesh(o, self.name())
                .perturbed_along_normals(&mut ctx.rng, o.chunk_noise),
        );

        Ok((0..count)
            .map(|i| {
                let offset = ctx.planner.scatter_offset(&mut ctx.rng);
                let tumble = ctx.planner.chunk_tumble(&mut ctx.rng);
                let scale =
                    uniform(&mut ctx.rng, o.chunk_scale_min, o.chunk_scale_max);
                Fragment::new(
                    FragmentId(i),
                    Vec3::ZERO,
                    Vec3::ZERO,
                    Vec3::splat(scale),
                    Payload::Chunk {
                        mesh: Arc::clone(&mesh),
                    },
                )
                .with_target(offset, tumble)
            })
            .collect())
    }

    fn hover_scope(&self) -> HoverScope {
        HoverScope::Group
    }

    fn name(&self) -> &'static str {
        "chunks"
    }
}
