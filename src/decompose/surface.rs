//! Particles sampled on mesh surfaces.

use glam::Vec3;

use super::{
    clamp_count, rock_mesh, DecomposeContext, HoverScope, MotionMode,
    ShapeDecomposer,
};
use crate::error::ShatterError;
use crate::fragment::{Fragment, FragmentId, Payload};
use crate::scene::{SceneGraph, SurfaceSampler};
use crate::trajectory::{facing_rotation, TrajectoryPlanner};

/// Particles on a procedural rock that blow out radially and keep flying
/// while the set is exploded.
#[derive(Debug, Clone, Copy)]
pub struct RockParticleDecomposer {
    /// Number of particles.
    pub count: u32,
}

impl ShapeDecomposer for RockParticleDecomposer {
    fn decompose(
        &self,
        ctx: &mut DecomposeContext<'_>,
    ) -> Result<Vec<Fragment>, ShatterError> {
        let count = clamp_count(self.count, ctx.options, self.name());
        let rock = rock_mesh(ctx.options, self.name());
        let Some(sampler) = SurfaceSampler::new(&rock) else {
            log::warn!("rock of radius {} has no area", ctx.options.rock_radius);
            return Ok(Vec::new());
        };

        Ok((0..count)
            .map(|i| {
                let sample = sampler.sample(&mut ctx.rng);
                let velocity =
                    ctx.planner.blowout_velocity(&mut ctx.rng, sample.position);
                Fragment::new(
                    FragmentId(i),
                    sample.position,
                    Vec3::ZERO,
                    Vec3::ONE,
                    Payload::Point {
                        normal: sample.normal,
                    },
                )
                .with_target(sample.position + velocity, Vec3::ZERO)
                .with_velocity(velocity)
            })
            .collect())
    }

    fn hover_scope(&self) -> HoverScope {
        HoverScope::Group
    }

    fn motion(&self) -> MotionMode {
        MotionMode::Ballistic
    }

    fn name(&self) -> &'static str {
        "rock particles"
    }
}

/// Particles sampled on every mesh of a model, each lifting slightly off
/// the surface along its normal.
pub struct SampledModelDecomposer<'a> {
    graph: &'a dyn SceneGraph,
    per_mesh: u32,
}

impl<'a> SampledModelDecomposer<'a> {
    /// Sample `per_mesh` particles from each renderable mesh of `graph`.
    #[must_use]
    pub fn new(graph: &'a dyn SceneGraph, per_mesh: u32) -> Self {
        Self { graph, per_mesh }
    }
}

impl ShapeDecomposer for SampledModelDecomposer<'_> {
    fn decompose(
        &self,
        ctx: &mut DecomposeContext<'_>,
    ) -> Result<Vec<Fragment>, ShatterError> {
        let per_mesh = clamp_count(self.per_mesh, ctx.options, self.name());
        let max = ctx.options.max_fragments.max(1) as usize;
        let strength = ctx.options.particle_strength;
        let mut fragments: Vec<Fragment> = Vec::new();

        self.graph.visit_renderables(&mut |node| {
            let Some(mesh) = node.mesh else {
                return;
            };
            let world = mesh.transformed(&node.world);
            let Some(sampler) = SurfaceSampler::new(&world) else {
                log::warn!(
                    "skipping mesh of node {} ({}): no surface area",
                    node.key,
                    node.name.unwrap_or("unnamed")
                );
                return;
            };
            let room = max.saturating_sub(fragments.len());
            let take = (per_mesh as usize).min(room);
            if take < per_mesh as usize {
                log::warn!(
                    "node {}: sampling {take} of {per_mesh} particles, \
                     fragment limit {max} reached",
                    node.key
                );
            }
            for _ in 0..take {
                let sample = sampler.sample(&mut ctx.rng);
                let rotation = facing_rotation(sample.normal);
                let target = TrajectoryPlanner::micro_offset(
                    sample.position,
                    sample.normal,
                    strength,
                );
                let id = FragmentId(fragments.len() as u32);
                fragments.push(
                    Fragment::new(
                        id,
                        sample.position,
                        rotation,
                        Vec3::ONE,
                        Payload::Point {
                            normal: sample.normal,
                        },
                    )
                    .with_target(target, rotation),
                );
            }
        });

        Ok(fragments)
    }

    fn hover_scope(&self) -> HoverScope {
        HoverScope::Group
    }

    fn name(&self) -> &'static str {
        "sampled model"
    }
}
