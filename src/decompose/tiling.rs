//! Sphere covered in tiles that lift off along their normals.

use std::f32::consts::PI;

use glam::Vec3;

use super::{clamp_count, DecomposeContext, HoverScope, ShapeDecomposer};
use crate::error::ShatterError;
use crate::fragment::{Fragment, FragmentId, Payload, TileKind};
use crate::scene::{ICOSAHEDRON_FACES, ICOSAHEDRON_VERTICES};
use crate::trajectory::{facing_rotation, TrajectoryPlanner};

/// Where tiles are placed on the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileLayout {
    /// `count` near-evenly spaced tiles along a golden-angle spiral.
    Fibonacci {
        /// Number of tiles.
        count: u32,
    },
    /// The 32 faces of a truncated icosahedron: 12 pentagons and 20
    /// hexagons.
    #[default]
    TruncatedIcosahedron,
}

/// Unit directions of `count` points spread over the sphere.
fn fibonacci_directions(count: u32) -> Vec<Vec3> {
    if count == 1 {
        return vec![Vec3::Y];
    }
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
    let last = (count - 1) as f32;
    (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * i as f32 / last;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f32;
            Vec3::new(theta.cos() * r, y, theta.sin() * r)
        })
        .collect()
}

/// Face directions of the truncated icosahedron, pentagons first.
fn truncated_icosahedron_tiles() -> Vec<(TileKind, Vec3)> {
    let corners = ICOSAHEDRON_VERTICES.map(Vec3::from);
    let pentagons = corners
        .iter()
        .map(|c| (TileKind::Pentagon, c.normalize()));
    let hexagons = ICOSAHEDRON_FACES.iter().map(|&[a, b, c]| {
        let centroid = corners[a] + corners[b] + corners[c];
        (TileKind::Hexagon, centroid.normalize())
    });
    pentagons.chain(hexagons).collect()
}

/// Tiles resting on a sphere and lifting off along their normals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TilingDecomposer {
    /// Tile placement.
    pub layout: TileLayout,
}

impl ShapeDecomposer for TilingDecomposer {
    fn decompose(
        &self,
        ctx: &mut DecomposeContext<'_>,
    ) -> Result<Vec<Fragment>, ShatterError> {
        let tiles = match self.layout {
            TileLayout::Fibonacci { count } => {
                let count = clamp_count(count, ctx.options, self.name());
                fibonacci_directions(count)
                    .into_iter()
                    .map(|n| (TileKind::Hexagon, n))
                    .collect()
            }
            TileLayout::TruncatedIcosahedron => truncated_icosahedron_tiles(),
        };
        let radius = ctx.options.tile_radius;
        let strength = ctx.options.tile_strength;

        Ok(tiles
            .into_iter()
            .enumerate()
            .map(|(i, (kind, normal))| {
                let rest = normal * radius;
                let rotation = facing_rotation(normal);
                let target =
                    TrajectoryPlanner::micro_offset(rest, normal, strength);
                Fragment::new(
                    FragmentId(i as u32),
                    rest,
                    rotation,
                    Vec3::ONE,
                    Payload::Tile { kind, normal },
                )
                .with_target(target, rotation)
            })
            .collect())
    }

    fn hover_scope(&self) -> HoverScope {
        HoverScope::Group
    }

    fn name(&self) -> &'static str {
        "tiling"
    }
}
