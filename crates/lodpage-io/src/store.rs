//! Reading and writing tiles through a swappable store.

use std::path::Path;

use lodpage_scene::Node;

use crate::document::{decode_document, encode_document};
use crate::error::{Result, TileIoError};
use crate::obj::load_obj;
use crate::paths::has_extension;

/// Extension (without dot) of Wavefront OBJ source tiles.
pub const OBJ_EXTENSION: &str = "obj";

/// Persistence for scene nodes.
pub trait TileStore {
    /// Load the node stored at `path`.
    fn read_node(&self, path: &Path) -> Result<Node>;

    /// Persist `node` to `path`, replacing any existing file.
    fn write_node(&self, node: &Node, path: &Path) -> Result<()>;
}

/// Filesystem-backed [`TileStore`].
///
/// `.obj` files are read as source geometry. Every other extension is read
/// and written as a tile document.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsTileStore;

impl FsTileStore {
    pub fn new() -> Self {
        Self
    }
}

impl TileStore for FsTileStore {
    fn read_node(&self, path: &Path) -> Result<Node> {
        if has_extension(path, OBJ_EXTENSION) {
            return load_obj(path);
        }

        let text = std::fs::read_to_string(path).map_err(|source| TileIoError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        decode_document(&text, path)
    }

    fn write_node(&self, node: &Node, path: &Path) -> Result<()> {
        let text = encode_document(node, path)?;
        std::fs::write(path, text).map_err(|source| TileIoError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "wrote tile");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_write_then_read_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.ive");
        let node = Node::mesh(vec![Vec3::ZERO, Vec3::Y], vec![]).with_name("m");

        let store = FsTileStore::new();
        store.write_node(&node, &path).unwrap();
        assert_eq!(store.read_node(&path).unwrap(), node);
    }

    #[test]
    fn test_reads_obj_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.obj");
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let node = FsTileStore::new().read_node(&path).unwrap();
        assert!(node.bound().is_some());
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("t.ive");
        let err = FsTileStore::new()
            .write_node(&Node::group(Vec::new()), &path)
            .unwrap_err();
        assert!(matches!(err, TileIoError::Write { .. }));
    }
}
