//! Fragments produced by decomposition.
//!
//! A [`FragmentSet`] is an arena: fragment ids are indices into it, and the
//! animator keeps its per-fragment state in vectors of the same length. Rest
//! and target poses are fixed once a fragment is built; a changed shape
//! produces a whole new set.

mod pose;

use std::sync::Arc;

use glam::Vec3;
pub use pose::{FragmentPose, PoseInstance};

use crate::decompose::{HoverScope, MotionMode};
use crate::error::ShatterError;
use crate::scene::{NodeKey, TriangleMesh};

/// Index of a fragment within its [`FragmentSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId(pub u32);

impl FragmentId {
    /// As a slice index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FragmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Polygon arity of a sphere tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Five-sided tile at an icosahedron vertex.
    Pentagon,
    /// Six-sided tile.
    Hexagon,
}

/// Renderable data carried through from decomposition. The engine never
/// looks inside it.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A box cell of the procedural cube.
    Cell {
        /// Edge length of the cell before the gap is applied.
        size: f32,
    },
    /// A node of an imported model.
    Node {
        /// Pre-order key of the node in its scene graph.
        key: NodeKey,
        /// Node name, if the model had one.
        name: Option<String>,
    },
    /// A point sampled on a surface.
    Point {
        /// Surface normal at the sample.
        normal: Vec3,
    },
    /// A tile of a tiled sphere.
    Tile {
        /// Pentagon or hexagon.
        kind: TileKind,
        /// Outward direction of the tile.
        normal: Vec3,
    },
    /// A rock chunk; all chunks of a set share one mesh.
    Chunk {
        /// Chunk geometry.
        mesh: Arc<TriangleMesh>,
    },
}

/// One piece of a decomposed shape with its rest and exploded poses.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    id: FragmentId,
    rest_position: Vec3,
    rest_rotation: Vec3,
    target_position: Vec3,
    target_rotation: Vec3,
    scale: Vec3,
    velocity: Option<Vec3>,
    payload: Payload,
}

impl Fragment {
    /// A fragment whose target pose equals its rest pose.
    #[must_use]
    pub fn new(
        id: FragmentId,
        rest_position: Vec3,
        rest_rotation: Vec3,
        scale: Vec3,
        payload: Payload,
    ) -> Self {
        Self {
            id,
            rest_position,
            rest_rotation,
            target_position: rest_position,
            target_rotation: rest_rotation,
            scale,
            velocity: None,
            payload,
        }
    }

    /// Set the exploded pose.
    #[must_use]
    pub fn with_target(mut self, position: Vec3, rotation: Vec3) -> Self {
        self.target_position = position;
        self.target_rotation = rotation;
        self
    }

    /// Set the blowout velocity used by ballistic sets.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Id within the owning set.
    #[must_use]
    pub fn id(&self) -> FragmentId {
        self.id
    }

    /// Assembled position.
    #[must_use]
    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }

    /// Assembled rotation (XYZ Euler radians).
    #[must_use]
    pub fn rest_rotation(&self) -> Vec3 {
        self.rest_rotation
    }

    /// Exploded position.
    #[must_use]
    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    /// Exploded rotation (XYZ Euler radians).
    #[must_use]
    pub fn target_rotation(&self) -> Vec3 {
        self.target_rotation
    }

    /// Scale, constant across the animation.
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Blowout velocity, present only on ballistic fragments.
    #[must_use]
    pub fn velocity(&self) -> Option<Vec3> {
        self.velocity
    }

    /// Renderable data.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Pose at eased progress `eased` between rest (0) and target (1).
    ///
    /// Rotation is interpolated per Euler component; values of `eased`
    /// above 1 overshoot past the target.
    #[must_use]
    pub fn pose_at(&self, eased: f32) -> FragmentPose {
        FragmentPose {
            fragment_id: self.id,
            position: self.rest_position.lerp(self.target_position, eased),
            rotation: self.rest_rotation.lerp(self.target_rotation, eased),
            scale: self.scale,
        }
    }

    /// Pose with the rest rotation at an arbitrary position.
    #[must_use]
    pub fn pose_at_position(&self, position: Vec3) -> FragmentPose {
        FragmentPose {
            fragment_id: self.id,
            position,
            rotation: self.rest_rotation,
            scale: self.scale,
        }
    }
}

/// The fragments of one decomposition plus how they react to input.
#[derive(Debug, Clone)]
pub struct FragmentSet {
    fragments: Vec<Fragment>,
    hover_scope: HoverScope,
    motion: MotionMode,
    strategy: &'static str,
}

impl FragmentSet {
    /// Wrap `fragments`, checking that ids are their indices.
    pub fn new(
        fragments: Vec<Fragment>,
        hover_scope: HoverScope,
        motion: MotionMode,
        strategy: &'static str,
    ) -> Result<Self, ShatterError> {
        if let Some((index, fragment)) = fragments
            .iter()
            .enumerate()
            .find(|(i, f)| f.id.index() != *i)
        {
            return Err(ShatterError::Decomposition(format!(
                "{strategy}: fragment at index {index} has id {}",
                fragment.id
            )));
        }
        Ok(Self {
            fragments,
            hover_scope,
            motion,
            strategy,
        })
    }

    /// All fragments, indexed by id.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Fragment by id.
    #[must_use]
    pub fn get(&self, id: FragmentId) -> Option<&Fragment> {
        self.fragments.get(id.index())
    }

    /// Number of fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether decomposition produced nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Whether hover explodes one fragment or the whole set.
    #[must_use]
    pub fn hover_scope(&self) -> HoverScope {
        self.hover_scope
    }

    /// Bounded interpolation or ballistic integration.
    #[must_use]
    pub fn motion(&self) -> MotionMode {
        self.motion
    }

    /// Name of the strategy that produced the set.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        self.strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(id: u32, at: Vec3) -> Fragment {
        Fragment::new(
            FragmentId(id),
            at,
            Vec3::ZERO,
            Vec3::ONE,
            Payload::Cell { size: 1.0 },
        )
    }

    #[test]
    fn new_fragment_targets_its_rest_pose() {
        let f = cell(0, Vec3::X);
        assert_eq!(f.target_position(), Vec3::X);
        assert_eq!(f.pose_at(1.0).position, Vec3::X);
        assert_eq!(f.velocity(), None);
    }

    #[test]
    fn pose_interpolates_and_overshoots() {
        let f = cell(0, Vec3::ZERO)
            .with_target(Vec3::new(0.0, 4.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        let mid = f.pose_at(0.5);
        assert_eq!(mid.position, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(mid.rotation, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(mid.scale, Vec3::ONE);
        assert!(f.pose_at(1.1).position.y > 4.0);
    }

    #[test]
    fn set_requires_sequential_ids() {
        let ok = FragmentSet::new(
            vec![cell(0, Vec3::ZERO), cell(1, Vec3::X)],
            HoverScope::PerFragment,
            MotionMode::Bounded,
            "grid",
        )
        .unwrap();
        assert_eq!(ok.len(), 2);
        assert_eq!(ok.get(FragmentId(1)).unwrap().rest_position(), Vec3::X);
        assert!(ok.get(FragmentId(2)).is_none());

        let err = FragmentSet::new(
            vec![cell(0, Vec3::ZERO), cell(0, Vec3::X)],
            HoverScope::PerFragment,
            MotionMode::Bounded,
            "grid",
        );
        assert!(matches!(err, Err(ShatterError::Decomposition(_))));
    }
}
