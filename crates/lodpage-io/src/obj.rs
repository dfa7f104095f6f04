//! Wavefront OBJ source tiles.

use std::path::Path;

use glam::Vec3;
use lodpage_scene::Node;

use crate::error::{Result, TileIoError};

/// Load an OBJ file as a scene node.
///
/// Faces are triangulated and attributes reduced to a single index stream.
/// A file with one model becomes a mesh node; several models are grouped.
/// Materials are not needed for bounding or paging and are ignored.
pub fn load_obj(path: &Path) -> Result<Node> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| TileIoError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let mut meshes: Vec<Node> = models
        .into_iter()
        .map(|model| {
            let positions = model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|v| Vec3::new(v[0], v[1], v[2]))
                .collect();
            Node::mesh(positions, model.mesh.indices).with_name(model.name)
        })
        .collect();

    match meshes.len() {
        0 => Err(TileIoError::EmptyObj {
            path: path.to_path_buf(),
        }),
        1 => Ok(meshes.remove(0)),
        _ => Ok(Node::group(meshes)),
    }
}
