//! Turns fetched OBJ bytes into a scene hierarchy.

use crate::error::{Result, SceneError};
use crate::geometry::{compute_normals, MeshData, Vertex};
use crate::scene::{GroupNode, SceneNode, Transform};

/// Decode an OBJ file into a group with one child per object.
///
/// Objects without faces become `SceneNode::Other`; normals are generated
/// when the file has none. Materials are ignored since every mesh is drawn
/// with the shared shading program.
pub fn decode_obj(url: &str, bytes: &[u8]) -> Result<SceneNode> {
    let decode_err = |reason: String| SceneError::AssetDecode {
        url: url.to_string(),
        reason,
    };

    let mut reader = bytes;
    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    };
    let (models, _materials) =
        tobj::load_obj_buf(&mut reader, &options, |_| Ok(Default::default()))
            .map_err(|e| decode_err(e.to_string()))?;
    let children = models
        .into_iter()
        .map(|model| {
            let mesh = model.mesh;
            if mesh.indices.is_empty() {
                return SceneNode::Other {
                    name: model.name,
                    transform: Transform::default(),
                };
            }
            let positions: Vec<[f32; 3]> = mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect();
            let normals: Vec<[f32; 3]> = if mesh.normals.len() == mesh.positions.len() {
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| [n[0], n[1], n[2]])
                    .collect()
            } else {
                compute_normals(&positions, &mesh.indices)
            };
            let vertices = positions
                .into_iter()
                .zip(normals)
                .map(|(position, normal)| Vertex { position, normal })
                .collect();
            SceneNode::mesh(
                model.name,
                MeshData::new(vertices, mesh.indices),
                Transform::default(),
            )
        })
        .collect();

    let node = SceneNode::Group(GroupNode {
        name: asset_name(url).to_string(),
        transform: Transform::default(),
        children,
    });
    // empty bodies and error pages parse as a model without faces
    if node.mesh_count() == 0 {
        return Err(decode_err("no faces in file".to_string()));
    }
    Ok(node)
}

fn asset_name(url: &str) -> &str {
    let file = url.rsplit('/').next().unwrap_or(url);
    file.split('.').next().filter(|s| !s.is_empty()).unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TETRA: &str = "\
o tetra
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
f 1 3 2
f 1 2 4
f 1 4 3
f 2 3 4
";

    #[test]
    fn decodes_faces_into_a_mesh_child() {
        let node = decode_obj("models/tetra.obj", TETRA.as_bytes()).unwrap();
        assert_eq!(node.name(), "tetra");
        assert_eq!(node.mesh_count(), 1);
        let SceneNode::Group(group) = node else {
            panic!("expected a group");
        };
        let SceneNode::Mesh(mesh) = &group.children[0] else {
            panic!("expected a mesh");
        };
        assert_eq!(mesh.geometry.triangle_count(), 4);
        assert_eq!(mesh.geometry.vertices.len(), 4);
    }

    #[test]
    fn empty_input_is_a_decode_error() {
        let err = decode_obj("models/empty.obj", b"# nothing here\n").unwrap_err();
        assert!(matches!(err, SceneError::AssetDecode { .. }));
    }

    #[test]
    fn error_page_is_a_decode_error() {
        let err = decode_obj("models/gone.obj", b"<html>404 Not Found</html>").unwrap_err();
        assert!(matches!(err, SceneError::AssetDecode { url, .. } if url == "models/gone.obj"));
    }

    #[test]
    fn vertices_without_faces_are_a_decode_error() {
        let err = decode_obj("models/points.obj", b"o points\nv 0 0 0\nv 1 0 0\n").unwrap_err();
        assert!(matches!(err, SceneError::AssetDecode { .. }));
    }

    #[test]
    fn asset_name_strips_path_and_extension() {
        assert_eq!(asset_name("./Model/suzanne.glb"), "suzanne");
        assert_eq!(asset_name("plain"), "plain");
    }
}
