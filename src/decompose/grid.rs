//! Regular grid of box cells filling the procedural cube.

use glam::{UVec3, Vec3};

use super::{clamp_count, DecomposeContext, ShapeDecomposer};
use crate::error::ShatterError;
use crate::fragment::{Fragment, FragmentId, Payload};

/// Smallest `g` with `g³ >= count`.
#[must_use]
pub fn grid_edge(count: u32) -> u32 {
    let count = u64::from(count);
    let mut g: u64 = 1;
    while g * g * g < count {
        g += 1;
    }
    g as u32
}

/// Splits the cube `[-extent/2, extent/2]³` into up to `g³` cells, filled
/// x-major and stopping after `fragment_count` cells.
#[derive(Debug, Clone, Copy)]
pub struct GridDecomposer {
    /// Requested number of cells.
    pub fragment_count: u32,
}

impl ShapeDecomposer for GridDecomposer {
    fn decompose(
        &self,
        ctx: &mut DecomposeContext<'_>,
    ) -> Result<Vec<Fragment>, ShatterError> {
        let count = clamp_count(self.fragment_count, ctx.options, self.name());
        let g = grid_edge(count);
        let size = ctx.options.extent / g as f32;
        let offset = Vec3::splat((g - 1) as f32 * size / 2.0);
        let scale = Vec3::splat(ctx.options.gap * size);

        let cells = (0..g).flat_map(move |x| {
            (0..g).flat_map(move |y| (0..g).map(move |z| UVec3::new(x, y, z)))
        });

        Ok(cells
            .take(count as usize)
            .enumerate()
            .map(|(i, cell)| {
                let rest = cell.as_vec3() * size - offset;
                let target = ctx.planner.plan(&mut ctx.rng, rest);
                Fragment::new(
                    FragmentId(i as u32),
                    rest,
                    Vec3::ZERO,
                    scale,
                    Payload::Cell { size },
                )
                .with_target(target.position, target.rotation)
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "grid"
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;
    use crate::options::Options;

    fn decompose(count: u32, seed: u64) -> Vec<Fragment> {
        let options = Options::default();
        let mut ctx = DecomposeContext::new(&options, Some(seed));
        GridDecomposer {
            fragment_count: count,
        }
        .decompose(&mut ctx)
        .unwrap()
    }

    #[test]
    fn grid_edge_is_exact_cube_root_ceiling() {
        assert_eq!(grid_edge(1), 1);
        assert_eq!(grid_edge(8), 2);
        assert_eq!(grid_edge(9), 3);
        assert_eq!(grid_edge(27), 3);
        assert_eq!(grid_edge(28), 4);
        assert_eq!(grid_edge(64), 4);
        assert_eq!(grid_edge(4096), 16);
    }

    #[test]
    fn every_count_fully_populated_inside_its_cells() {
        for count in 8..=64 {
            let fragments = decompose(count, 1);
            assert_eq!(fragments.len(), count as usize);

            let ids: FxHashSet<FragmentId> =
                fragments.iter().map(Fragment::id).collect();
            assert_eq!(ids.len(), fragments.len());

            let g = grid_edge(count);
            let size = 2.0 / g as f32;
            for f in &fragments {
                let half = f.scale().x / 2.0;
                let reach = f.rest_position().abs().max_element() + half;
                assert!(reach <= 1.0 + 1e-5, "count {count}: {reach}");

                let i = f.id().0;
                let cell = UVec3::new(i / (g * g), (i / g) % g, i % g);
                let centre = (cell.as_vec3() + 0.5) * size - 1.0;
                let spill =
                    (f.rest_position() - centre).abs().max_element() + half;
                assert!(
                    spill <= size / 2.0 + 1e-5,
                    "count {count}, {}: {spill} exceeds its cell",
                    f.id()
                );
            }
        }
    }

    #[test]
    fn full_cubes_tile_the_volume() {
        for count in [8u32, 27, 64] {
            let fragments = decompose(count, 2);
            let cells: f32 = fragments
                .iter()
                .map(|f| match f.payload() {
                    Payload::Cell { size } => size * size * size,
                    _ => 0.0,
                })
                .sum();
            assert!((cells - 8.0).abs() < 1e-4, "count {count}: {cells}");

            let gap = Options::default().decomposition.gap;
            let filled: f32 = fragments
                .iter()
                .map(|f| f.scale().x * f.scale().y * f.scale().z)
                .sum();
            assert!((filled - 8.0 * gap * gap * gap).abs() < 1e-3);
        }
    }

    #[test]
    fn twenty_seven_is_a_symmetric_three_cube() {
        let fragments = decompose(27, 3);
        let size = match fragments[0].payload() {
            Payload::Cell { size } => *size,
            _ => f32::NAN,
        };
        assert!((size - 2.0 / 3.0).abs() < 1e-5);

        let centroid: Vec3 =
            fragments.iter().map(Fragment::rest_position).sum::<Vec3>() / 27.0;
        assert!(centroid.length() < 1e-5);
        let corner = fragments[0].rest_position();
        assert!((corner - Vec3::splat(-size)).length() < 1e-5);
        assert!(fragments[13].rest_position().length() < 1e-5);
        // x outer, z inner
        assert!((fragments[1].rest_position().z - 0.0).abs() < 1e-5);
        assert!((fragments[9].rest_position().x - 0.0).abs() < 1e-5);
    }

    #[test]
    fn ids_and_rest_poses_are_stable_across_runs() {
        let a = decompose(20, 1);
        let b = decompose(20, 2);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.id(), y.id());
            assert_eq!(x.rest_position(), y.rest_position());
            assert_eq!(x.rest_rotation(), y.rest_rotation());
        }
        assert_eq!(decompose(20, 5), decompose(20, 5));
    }

    #[test]
    fn out_of_range_counts_are_clamped() {
        assert_eq!(decompose(0, 1).len(), 1);
        let mut options = Options::default();
        options.decomposition.max_fragments = 100;
        let mut ctx = DecomposeContext::new(&options, Some(1));
        let fragments = GridDecomposer {
            fragment_count: 1000,
        }
        .decompose(&mut ctx)
        .unwrap();
        assert_eq!(fragments.len(), 100);
    }

    #[test]
    fn targets_are_finite_even_for_the_centre_cell() {
        for f in decompose(27, 9) {
            assert!(f.target_position().is_finite());
            assert!(f.target_position() != f.rest_position());
        }
    }
}
