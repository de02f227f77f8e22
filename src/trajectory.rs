//! Exploded-pose planning.
//!
//! Given a fragment's rest position, the planner picks where the fragment
//! flies to and how far it tumbles on the way. It also provides the smaller
//! policies used by the surface strategies: a fixed offset along a normal,
//! the radial blowout velocity of ballistic particles and the short scatter
//! of organic chunks.
//!
//! Every draw goes through the caller's RNG, so a seeded generator yields
//! reproducible trajectories.

use std::f32::consts::TAU;

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;

use crate::options::TrajectoryOptions;

/// Attempts at drawing a usable random direction before giving up on +Y.
const FALLBACK_ATTEMPTS: usize = 8;

/// Uniform draw from `[min, max)`; a degenerate range yields `min`.
pub(crate) fn uniform<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// XYZ Euler angles of the rotation taking +Y onto `normal`.
#[must_use]
pub fn facing_rotation(normal: Vec3) -> Vec3 {
    let Some(normal) = normal.try_normalize() else {
        return Vec3::ZERO;
    };
    let (x, y, z) =
        Quat::from_rotation_arc(Vec3::Y, normal).to_euler(EulerRot::XYZ);
    Vec3::new(x, y, z)
}

/// An exploded target pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    /// Target position.
    pub position: Vec3,
    /// Target rotation as XYZ Euler angles in radians.
    pub rotation: Vec3,
}

/// Turns rest positions into exploded poses.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryPlanner {
    options: TrajectoryOptions,
}

impl TrajectoryPlanner {
    /// Planner drawing from the ranges in `options`.
    #[must_use]
    pub fn new(options: TrajectoryOptions) -> Self {
        Self { options }
    }

    /// The ranges this planner draws from.
    #[must_use]
    pub fn options(&self) -> &TrajectoryOptions {
        &self.options
    }

    /// Plan the exploded pose of a fragment resting at `rest`.
    ///
    /// The fragment travels outward along its own direction from the origin
    /// plus a random lateral scatter and upward lift. A fragment resting
    /// exactly at the origin gets a random upward-biased direction instead,
    /// so the target is always finite and away from the origin.
    pub fn plan<R: Rng>(&self, rng: &mut R, rest: Vec3) -> Trajectory {
        let o = &self.options;
        let dir = Self::direction(rng, rest);
        let distance = uniform(rng, o.radial_min, o.radial_max);
        let jitter = Vec3::new(
            uniform(rng, -o.jitter_lateral, o.jitter_lateral),
            uniform(rng, o.jitter_lift_min, o.jitter_lift_max),
            uniform(rng, -o.jitter_lateral, o.jitter_lateral),
        );
        let max_turn = o.tumble_turns.max(0.0) * TAU;
        let rotation = Vec3::new(
            uniform(rng, 0.0, max_turn),
            uniform(rng, 0.0, max_turn),
            uniform(rng, 0.0, max_turn),
        );

        Trajectory {
            position: dir * distance + jitter,
            rotation,
        }
    }

    /// Unit direction a fragment at `rest` flies along.
    pub fn direction<R: Rng>(rng: &mut R, rest: Vec3) -> Vec3 {
        if let Some(dir) = rest.try_normalize() {
            return dir;
        }
        (0..FALLBACK_ATTEMPTS)
            .find_map(|_| {
                Vec3::new(
                    uniform(rng, -0.5, 0.5),
                    uniform(rng, 0.0, 1.0),
                    uniform(rng, -0.5, 0.5),
                )
                .try_normalize()
            })
            .unwrap_or(Vec3::Y)
    }

    /// Near-field target: `base` pushed `strength` along `normal`.
    #[must_use]
    pub fn micro_offset(base: Vec3, normal: Vec3, strength: f32) -> Vec3 {
        base + normal * strength
    }

    /// Radial blowout velocity for a ballistic particle at `point`.
    ///
    /// One scalar of spread noise is added to every component of the radial
    /// direction, then each axis is scaled by its own random speed.
    pub fn blowout_velocity<R: Rng>(&self, rng: &mut R, point: Vec3) -> Vec3 {
        let o = &self.options;
        let spread = uniform(rng, 0.0, o.blowout_spread);
        let dir = Self::direction(rng, point) + Vec3::splat(spread);
        let speed = Vec3::new(
            uniform(rng, o.blowout_speed_min, o.blowout_speed_max),
            uniform(rng, o.blowout_speed_min, o.blowout_speed_max),
            uniform(rng, o.blowout_speed_min, o.blowout_speed_max),
        );
        dir * speed
    }

    /// Short upward-biased scatter offset for an organic chunk.
    pub fn scatter_offset<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let o = &self.options;
        let dir = Vec3::new(
            uniform(rng, -0.5, 0.5),
            uniform(rng, 0.0, o.scatter_lift),
            uniform(rng, -0.5, 0.5),
        )
        .try_normalize()
        .unwrap_or(Vec3::Y);
        dir * uniform(rng, o.scatter_min, o.scatter_max)
    }

    /// Small per-axis tumble for a scattered chunk.
    pub fn chunk_tumble<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let max = self.options.chunk_tumble.max(0.0);
        Vec3::new(
            uniform(rng, 0.0, max),
            uniform(rng, 0.0, max),
            uniform(rng, 0.0, max),
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn planner() -> TrajectoryPlanner {
        TrajectoryPlanner::new(TrajectoryOptions::default())
    }

    #[test]
    fn degenerate_range_yields_min() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(uniform(&mut rng, 2.0, 2.0), 2.0);
        assert_eq!(uniform(&mut rng, 5.0, 1.0), 5.0);
        let v = uniform(&mut rng, 0.0, 1.0);
        assert!((0.0..1.0).contains(&v));
    }

    #[test]
    fn target_lies_outward_and_lifted() {
        let planner = planner();
        let mut rng = StdRng::seed_from_u64(42);
        let rest = Vec3::new(0.0, 0.0, 1.0);
        for _ in 0..200 {
            let t = planner.plan(&mut rng, rest);
            // z: radial 3..7 plus lateral ±4
            assert!(t.position.z >= -1.0 && t.position.z < 11.0);
            // y: no radial component, lift 2..8
            assert!(t.position.y >= 2.0 && t.position.y < 8.0);
            assert!(t.position.x.abs() <= 4.0);
            for r in t.rotation.to_array() {
                assert!((0.0..2.0 * TAU).contains(&r));
            }
        }
    }

    #[test]
    fn zero_rest_position_gets_finite_nonzero_target() {
        let planner = planner();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let t = planner.plan(&mut rng, Vec3::ZERO);
            assert!(t.position.is_finite());
            assert!(t.position.length() > 0.0);
            assert!(t.rotation.is_finite());
        }
    }

    #[test]
    fn fallback_direction_is_unit_and_upward() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let d = TrajectoryPlanner::direction(&mut rng, Vec3::ZERO);
            assert!((d.length() - 1.0).abs() < 1e-5);
            assert!(d.y >= 0.0);
        }
    }

    #[test]
    fn same_seed_same_plan() {
        let planner = planner();
        let rest = Vec3::new(0.3, -0.2, 0.9);
        let a = planner.plan(&mut StdRng::seed_from_u64(99), rest);
        let b = planner.plan(&mut StdRng::seed_from_u64(99), rest);
        assert_eq!(a, b);
    }

    #[test]
    fn micro_offset_moves_along_normal() {
        let got = TrajectoryPlanner::micro_offset(Vec3::X, Vec3::Y, 0.25);
        assert_eq!(got, Vec3::new(1.0, 0.25, 0.0));
    }

    #[test]
    fn blowout_points_away_from_origin() {
        let planner = planner();
        let mut rng = StdRng::seed_from_u64(5);
        let point = Vec3::new(0.6, 0.8, 0.0);
        for _ in 0..100 {
            let v = planner.blowout_velocity(&mut rng, point);
            assert!(v.dot(point) > 0.0);
            // Each component: (dir + s) * speed with s < 0.3, speed < 6.
            assert!(v.x > 0.0 && v.x < (0.6 + 0.3) * 6.0);
            assert!(v.y > 0.0 && v.y < (0.8 + 0.3) * 6.0);
            assert!(v.z >= 0.0 && v.z < 0.3 * 6.0);
        }
    }

    #[test]
    fn scatter_offset_is_short_and_not_downward() {
        let planner = planner();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let s = planner.scatter_offset(&mut rng);
            let len = s.length();
            assert!((0.25 - 1e-5..0.40 + 1e-5).contains(&len), "len {len}");
            assert!(s.y >= 0.0);
        }
    }

    #[test]
    fn chunk_tumble_is_bounded() {
        let planner = planner();
        let mut rng = StdRng::seed_from_u64(2);
        let t = planner.chunk_tumble(&mut rng);
        assert!(t.min_element() >= 0.0 && t.max_element() < 0.4);
    }

    #[test]
    fn facing_rotation_maps_up_onto_normal() {
        for normal in [Vec3::X, Vec3::NEG_Z, Vec3::new(1.0, 2.0, -0.5)] {
            let e = facing_rotation(normal);
            let q = Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z);
            assert!((q * Vec3::Y - normal.normalize()).length() < 1e-4);
        }
        assert_eq!(facing_rotation(Vec3::ZERO), Vec3::ZERO);
    }
}
