//! Shape model consumed by the decomposers.
//!
//! Imported models are described through the [`SceneGraph`] trait: anything
//! that can walk its renderable nodes and report their transforms can be
//! fragmented. [`SceneNode`] is the built-in tree implementation and
//! [`Model`] wraps a tree with the version used to memoise decompositions.
//!
//! Procedural geometry ([`TriangleMesh::icosphere`]) and surface sampling
//! ([`SurfaceSampler`]) live here too.

#[cfg(feature = "gltf")]
pub mod gltf;
mod mesh;
mod sampler;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::{Affine3A, EulerRot, Quat, Vec3};
pub(crate) use mesh::{ICOSAHEDRON_FACES, ICOSAHEDRON_VERTICES};
pub use mesh::{TriangleMesh, MAX_ICOSPHERE_DETAIL};
pub use sampler::{SurfaceSample, SurfaceSampler};

/// Pre-order index of a node within its scene graph.
pub type NodeKey = u32;

/// Monotonic source of [`Model::version`] values.
static NEXT_MODEL_VERSION: AtomicU64 = AtomicU64::new(1);

/// Local transform of a scene node (scale, then rotate, then translate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// Offset from the parent origin.
    pub translation: Vec3,
    /// Orientation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl NodeTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Pure translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// As an affine matrix.
    #[must_use]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }

    /// Rotation as XYZ Euler angles in radians.
    #[must_use]
    pub fn euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One node of a model's scene tree.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// Optional display name carried from the source file.
    pub name: Option<String>,
    /// Transform relative to the parent node.
    pub transform: NodeTransform,
    /// Geometry drawn by this node; nodes with a mesh are renderable.
    pub mesh: Option<Arc<TriangleMesh>>,
    /// Child nodes.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// A transform-only node grouping `children`.
    #[must_use]
    pub fn group(children: Vec<SceneNode>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    /// A renderable leaf.
    #[must_use]
    pub fn mesh(
        name: impl Into<String>,
        transform: NodeTransform,
        mesh: Arc<TriangleMesh>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            transform,
            mesh: Some(mesh),
            children: Vec::new(),
        }
    }

    fn visit(
        &self,
        parent: &Affine3A,
        next_key: &mut NodeKey,
        visitor: &mut dyn FnMut(Renderable<'_>),
    ) {
        let key = *next_key;
        *next_key += 1;
        let world = *parent * self.transform.to_affine();
        if let Some(mesh) = &self.mesh {
            visitor(Renderable {
                key,
                name: self.name.as_deref(),
                local: self.transform,
                world,
                mesh: Some(mesh.as_ref()),
            });
        }
        for child in &self.children {
            child.visit(&world, next_key, visitor);
        }
    }
}

/// A renderable node reported during traversal.
#[derive(Debug, Clone, Copy)]
pub struct Renderable<'a> {
    /// Stable key of the node within its graph.
    pub key: NodeKey,
    /// Display name, if any.
    pub name: Option<&'a str>,
    /// Transform relative to the parent.
    pub local: NodeTransform,
    /// Accumulated model-space transform.
    pub world: Affine3A,
    /// CPU-side geometry, when the graph keeps it.
    pub mesh: Option<&'a TriangleMesh>,
}

/// Traversal contract for imported shapes.
///
/// Implementors report every renderable node exactly once, parents before
/// children, with the node's world transform already accumulated. The
/// engine never inspects anything else about the host's node types.
pub trait SceneGraph {
    /// Call `visitor` for every renderable node in depth-first pre-order.
    fn visit_renderables(&self, visitor: &mut dyn FnMut(Renderable<'_>));
}

impl SceneGraph for SceneNode {
    fn visit_renderables(&self, visitor: &mut dyn FnMut(Renderable<'_>)) {
        let mut next_key = 0;
        self.visit(&Affine3A::IDENTITY, &mut next_key, visitor);
    }
}

/// A loaded model: a scene tree plus a process-unique version.
///
/// Two `Model`s never share a version, so the version identifies the model
/// when memoising decompositions.
#[derive(Debug)]
pub struct Model {
    version: u64,
    name: String,
    root: SceneNode,
}

impl Model {
    /// Wrap `root`, assigning the next model version.
    #[must_use]
    pub fn new(name: impl Into<String>, root: SceneNode) -> Self {
        Self {
            version: NEXT_MODEL_VERSION.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            root,
        }
    }

    /// Process-unique version of this model.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Display name (usually the file name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root of the scene tree.
    #[must_use]
    pub fn root(&self) -> &SceneNode {
        &self.root
    }
}

impl SceneGraph for Model {
    fn visit_renderables(&self, visitor: &mut dyn FnMut(Renderable<'_>)) {
        self.root.visit_renderables(visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(graph: &dyn SceneGraph) -> Vec<(NodeKey, Vec3)> {
        let mut out = Vec::new();
        graph.visit_renderables(&mut |r| {
            out.push((r.key, Vec3::from(r.world.translation)));
        });
        out
    }

    #[test]
    fn world_transforms_accumulate() {
        let cube = Arc::new(TriangleMesh::icosphere(0.5, 0));
        let mut arm = SceneNode::group(vec![SceneNode::mesh(
            "hand",
            NodeTransform::from_translation(Vec3::X),
            Arc::clone(&cube),
        )]);
        arm.transform = NodeTransform {
            translation: Vec3::Y * 2.0,
            rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            scale: Vec3::ONE,
        };
        let root = SceneNode::group(vec![arm]);

        let found = collect(&root);
        assert_eq!(found.len(), 1);
        // Rotating +X by 90° about Z gives +Y, added to the arm offset.
        assert!((found[0].1 - Vec3::new(0.0, 3.0, 0.0)).length() < 1e-5);
        assert_eq!(found[0].0, 2);
    }

    #[test]
    fn groups_without_meshes_are_skipped() {
        let root = SceneNode::group(vec![
            SceneNode::group(Vec::new()),
            SceneNode::group(Vec::new()),
        ]);
        assert!(collect(&root).is_empty());
    }

    #[test]
    fn keys_follow_preorder() {
        let mesh = Arc::new(TriangleMesh::icosphere(1.0, 0));
        let leaf = |name: &str| {
            SceneNode::mesh(name, NodeTransform::IDENTITY, Arc::clone(&mesh))
        };
        let mut parent = leaf("parent");
        parent.children = vec![leaf("a"), leaf("b")];
        let root = SceneNode::group(vec![parent, leaf("c")]);

        let keys: Vec<NodeKey> =
            collect(&root).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![1, 2, 3, 4]);
    }

    #[test]
    fn model_versions_are_unique() {
        let a = Model::new("a.glb", SceneNode::default());
        let b = Model::new("b.glb", SceneNode::default());
        assert_ne!(a.version(), b.version());
        assert_eq!(a.name(), "a.glb");
    }

    #[test]
    fn euler_round_trips_through_quat() {
        let t = NodeTransform {
            rotation: Quat::from_euler(EulerRot::XYZ, 0.3, -0.2, 1.1),
            ..NodeTransform::IDENTITY
        };
        let e = t.euler();
        assert!((e - Vec3::new(0.3, -0.2, 1.1)).length() < 1e-4);
    }
}
