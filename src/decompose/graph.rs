//! One fragment per renderable node of an imported model.

use glam::Vec3;

use super::{DecomposeContext, ShapeDecomposer};
use crate::error::ShatterError;
use crate::fragment::{Fragment, FragmentId, Payload};
use crate::scene::SceneGraph;

/// Walks a scene graph in pre-order; every renderable node becomes a
/// fragment resting at its world position with its local rotation and
/// scale.
pub struct GraphDecomposer<'a> {
    graph: &'a dyn SceneGraph,
}

impl<'a> GraphDecomposer<'a> {
    /// Decomposer over `graph`.
    #[must_use]
    pub fn new(graph: &'a dyn SceneGraph) -> Self {
        Self { graph }
    }
}

impl ShapeDecomposer for GraphDecomposer<'_> {
    fn decompose(
        &self,
        ctx: &mut DecomposeContext<'_>,
    ) -> Result<Vec<Fragment>, ShatterError> {
        let mut fragments = Vec::new();
        let mut failure = None;

        self.graph.visit_renderables(&mut |node| {
            if failure.is_some() {
                return;
            }
            let rest = Vec3::from(node.world.translation);
            let rotation = node.local.euler();
            let scale = node.local.scale;
            if !(rest.is_finite() && rotation.is_finite() && scale.is_finite())
            {
                failure = Some(ShatterError::Decomposition(format!(
                    "node {} ({}) has a non-finite transform",
                    node.key,
                    node.name.unwrap_or("unnamed")
                )));
                return;
            }

            let target = ctx.planner.plan(&mut ctx.rng, rest);
            let id = FragmentId(fragments.len() as u32);
            fragments.push(
                Fragment::new(
                    id,
                    rest,
                    rotation,
                    scale,
                    Payload::Node {
                        key: node.key,
                        name: node.name.map(str::to_owned),
                    },
                )
                .with_target(target.position, target.rotation),
            );
        });

        if let Some(err) = failure {
            return Err(err);
        }
        if fragments.is_empty() {
            log::debug!("scene graph has no renderable nodes");
        }
        Ok(fragments)
    }

    fn name(&self) -> &'static str {
        "graph"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Quat;

    use super::*;
    use crate::options::Options;
    use crate::scene::{Model, NodeTransform, SceneNode, TriangleMesh};

    fn robot() -> Model {
        let mesh = Arc::new(TriangleMesh::icosphere(0.5, 0));
        let mut body = SceneNode::mesh(
            "body",
            NodeTransform::from_translation(Vec3::new(0.0, 1.0, 0.0)),
            Arc::clone(&mesh),
        );
        body.children = vec![SceneNode::mesh(
            "head",
            NodeTransform {
                translation: Vec3::new(0.0, 1.0, 0.0),
                rotation: Quat::from_rotation_y(0.5),
                scale: Vec3::splat(0.5),
            },
            Arc::clone(&mesh),
        )];
        let arm = SceneNode::mesh(
            "arm",
            NodeTransform::from_translation(Vec3::X),
            mesh,
        );
        Model::new("robot", SceneNode::group(vec![body, arm]))
    }

    fn run(graph: &dyn SceneGraph) -> Result<Vec<Fragment>, ShatterError> {
        let options = Options::default();
        let mut ctx = DecomposeContext::new(&options, Some(5));
        GraphDecomposer::new(graph).decompose(&mut ctx)
    }

    #[test]
    fn nodes_become_fragments_in_preorder() {
        let fragments = run(&robot()).unwrap();
        assert_eq!(fragments.len(), 3);

        let names: Vec<_> = fragments
            .iter()
            .map(|f| match f.payload() {
                Payload::Node { name, .. } => name.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(
            names,
            vec![
                Some("body".to_owned()),
                Some("head".to_owned()),
                Some("arm".to_owned())
            ]
        );

        let head = &fragments[1];
        assert_eq!(head.id(), FragmentId(1));
        let expected = Vec3::new(0.0, 2.0, 0.0);
        assert!((head.rest_position() - expected).length() < 1e-5);
        assert!((head.rest_rotation().y - 0.5).abs() < 1e-5);
        assert_eq!(head.scale(), Vec3::splat(0.5));
    }

    #[test]
    fn model_without_renderables_is_empty() {
        let model = Model::new("empty", SceneNode::group(Vec::new()));
        assert!(run(&model).unwrap().is_empty());
    }

    #[test]
    fn node_at_origin_still_explodes() {
        let mesh = Arc::new(TriangleMesh::icosphere(1.0, 0));
        let root = SceneNode::mesh("core", NodeTransform::IDENTITY, mesh);
        let fragments = run(&root).unwrap();
        assert_eq!(fragments[0].rest_position(), Vec3::ZERO);
        assert!(fragments[0].target_position().is_finite());
        assert!(fragments[0].target_position().length() > 0.0);
    }

    #[test]
    fn non_finite_transform_fails_the_whole_model() {
        let mesh = Arc::new(TriangleMesh::icosphere(1.0, 0));
        let good =
            SceneNode::mesh("ok", NodeTransform::IDENTITY, Arc::clone(&mesh));
        let bad = SceneNode::mesh(
            "bad",
            NodeTransform::from_translation(Vec3::new(f32::NAN, 0.0, 0.0)),
            mesh,
        );
        let root = SceneNode::group(vec![good, bad]);
        assert!(matches!(run(&root), Err(ShatterError::Decomposition(_))));
    }
}
