//! Binary glTF (`.glb`) and JSON glTF loading into a [`Model`].
//!
//! Parsing is delegated to the `gltf` crate; this module only converts its
//! node hierarchy, transforms and triangle primitives into a [`SceneNode`]
//! tree.

use std::sync::Arc;

use glam::{Quat, Vec3};

use super::{Model, NodeTransform, SceneNode, TriangleMesh};
use crate::error::ShatterError;

/// Load the default scene (or the first scene) of a glTF container.
pub fn load_gltf(bytes: &[u8], name: &str) -> Result<Model, ShatterError> {
    let (document, buffers, _images) = gltf::import_slice(bytes)
        .map_err(|e| ShatterError::ModelLoad(e.to_string()))?;
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| {
            ShatterError::ModelLoad("container holds no scenes".to_owned())
        })?;

    let children = scene
        .nodes()
        .map(|node| convert_node(&node, &buffers))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("loaded glTF '{name}' with {} root nodes", children.len());
    Ok(Model::new(name, SceneNode::group(children)))
}

fn convert_node(
    node: &gltf::Node<'_>,
    buffers: &[gltf::buffer::Data],
) -> Result<SceneNode, ShatterError> {
    let (translation, rotation, scale) = node.transform().decomposed();
    let mesh = node
        .mesh()
        .map(|mesh| convert_mesh(&mesh, buffers))
        .transpose()?;
    let children = node
        .children()
        .map(|child| convert_node(&child, buffers))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SceneNode {
        name: node.name().map(str::to_owned),
        transform: NodeTransform {
            translation: Vec3::from(translation),
            rotation: Quat::from_array(rotation),
            scale: Vec3::from(scale),
        },
        mesh,
        children,
    })
}

fn convert_mesh(
    mesh: &gltf::Mesh<'_>,
    buffers: &[gltf::buffer::Data],
) -> Result<Arc<TriangleMesh>, ShatterError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "skipping non-triangle primitive {} of mesh {}",
                primitive.index(),
                mesh.index()
            );
            continue;
        }
        let reader = primitive
            .reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));
        let Some(read_positions) = reader.read_positions() else {
            continue;
        };
        let base = vertex_index(positions.len())?;
        positions.extend(read_positions.map(Vec3::from));
        let end = vertex_index(positions.len())?;
        match reader.read_indices() {
            Some(read) => {
                for i in read.into_u32() {
                    if i >= end - base {
                        return Err(ShatterError::ModelLoad(format!(
                            "primitive {} of mesh {} indexes vertex {i} of {}",
                            primitive.index(),
                            mesh.index(),
                            end - base
                        )));
                    }
                    indices.push(base + i);
                }
            }
            None => indices.extend(base..end),
        }
    }

    TriangleMesh::new(positions, indices).map(Arc::new)
}

fn vertex_index(len: usize) -> Result<u32, ShatterError> {
    u32::try_from(len).map_err(|_| {
        ShatterError::ModelLoad(format!("{len} vertices exceed u32 indexing"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneGraph;

    /// One triangle (0,0,0) (1,0,0) (0,1,0) in a node translated by (0,0,2).
    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [ { "name": "tri", "mesh": 0, "translation": [0, 0, 2] } ],
        "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
        "accessors": [ {
            "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
            "min": [0, 0, 0], "max": [1, 1, 0]
        } ],
        "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
        "buffers": [ {
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
        } ]
    }"#;

    #[test]
    fn loads_nodes_and_triangles() {
        let model = load_gltf(TRIANGLE_GLTF.as_bytes(), "tri.gltf").unwrap();
        let mut seen = Vec::new();
        model.visit_renderables(&mut |r| {
            seen.push((
                r.name.map(str::to_owned),
                Vec3::from(r.world.translation),
                r.mesh.map(TriangleMesh::triangle_count),
            ));
        });
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.as_deref(), Some("tri"));
        assert!((seen[0].1 - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);
        assert_eq!(seen[0].2, Some(1));
    }

    /// One mesh with two indexed primitives sharing the triangle above. The
    /// first uses indices `[0, 1, 2]`; the second uses accessor `{second}`:
    /// 1 is `[0, 1, 2]`, 2 is `[0, 1, u32::MAX]`, 3 is `[0, 1, 3]`.
    fn two_primitive_gltf(second: u32) -> String {
        let template = r#"{
            "asset": { "version": "2.0" },
            "scenes": [ { "nodes": [0] } ],
            "nodes": [ { "mesh": 0 } ],
            "meshes": [ { "primitives": [
                { "attributes": { "POSITION": 0 }, "indices": 1 },
                { "attributes": { "POSITION": 0 }, "indices": SECOND }
            ] } ],
            "accessors": [
                { "bufferView": 0, "componentType": 5126, "count": 3,
                  "type": "VEC3", "min": [0, 0, 0], "max": [1, 1, 0] },
                { "bufferView": 1, "componentType": 5125, "count": 3, "type": "SCALAR" },
                { "bufferView": 2, "componentType": 5125, "count": 3, "type": "SCALAR" },
                { "bufferView": 3, "componentType": 5125, "count": 3, "type": "SCALAR" }
            ],
            "bufferViews": [
                { "buffer": 0, "byteLength": 36 },
                { "buffer": 0, "byteOffset": 36, "byteLength": 12 },
                { "buffer": 0, "byteOffset": 48, "byteLength": 12 },
                { "buffer": 0, "byteOffset": 60, "byteLength": 12 }
            ],
            "buffers": [ {
                "byteLength": 72,
                "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAAAAAEAAAACAAAAAAAAAAEAAAD/////AAAAAAEAAAADAAAA"
            } ]
        }"#;
        template.replace("SECOND", &second.to_string())
    }

    fn only_mesh(model: &Model) -> Option<Arc<TriangleMesh>> {
        model.root().children.first()?.mesh.clone()
    }

    #[test]
    fn primitives_are_offset_into_one_mesh() {
        let model =
            load_gltf(two_primitive_gltf(1).as_bytes(), "two.gltf").unwrap();
        let mesh = only_mesh(&model).unwrap();
        assert_eq!(mesh.positions().len(), 6);
        assert_eq!(mesh.indices(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn overflowing_index_is_a_load_error() {
        let err = load_gltf(two_primitive_gltf(2).as_bytes(), "bad.gltf");
        assert!(matches!(err, Err(ShatterError::ModelLoad(_))));
    }

    #[test]
    fn index_past_its_primitive_is_a_load_error() {
        let err = load_gltf(two_primitive_gltf(3).as_bytes(), "bad.gltf");
        assert!(matches!(err, Err(ShatterError::ModelLoad(_))));
    }

    #[test]
    fn garbage_is_a_load_error() {
        let err = load_gltf(b"not a model", "junk.glb").unwrap_err();
        assert!(matches!(err, ShatterError::ModelLoad(_)));
    }
}
