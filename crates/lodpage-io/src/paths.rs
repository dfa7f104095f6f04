//! Path helpers for naming outputs and linking tiles.

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, TileIoError};

/// File name without directory and without its last extension.
pub fn name_less_extension(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name without directory, or the empty string.
pub fn simple_file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Returns `true` if `path`'s extension equals `ext` exactly (no dot).
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

/// Express `target` relative to the directory `base`.
///
/// Both paths are compared component by component after dropping `.`
/// components. Shared leading components are removed and every remaining
/// component of `base` becomes a `..`. The result always uses `/` so
/// written references stay portable.
pub fn relative_path(base: &Path, target: &Path) -> String {
    let base: Vec<Component> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let target: Vec<Component> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let shared = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = std::iter::repeat_n("..".to_string(), base.len() - shared);
    let downs = target[shared..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());

    ups.chain(downs).collect::<Vec<_>>().join("/")
}

/// Regular files directly inside `dir` whose extension equals `ext`,
/// sorted by file name.
///
/// Entries that are not regular files, or whose extension differs (the match
/// is case-sensitive), are skipped.
pub fn list_tiles(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let read_err = |source| TileIoError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut tiles = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && has_extension(&path, ext) {
            tiles.push(path);
        } else {
            tracing::trace!(path = %path.display(), "skipping non-tile entry");
        }
    }
    tiles.sort();
    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_helpers() {
        let p = Path::new("levels/3/tile_07.obj");
        assert_eq!(name_less_extension(p), "tile_07");
        assert_eq!(simple_file_name(p), "tile_07.obj");
        assert!(has_extension(p, "obj"));
        assert!(!has_extension(p, "OBJ"));
        assert!(!has_extension(Path::new("noext"), "obj"));
    }

    #[test]
    fn test_relative_path_into_subdirectory() {
        let rel = relative_path(Path::new("out"), Path::new("out/ive/2_bar.ive"));
        assert_eq!(rel, "ive/2_bar.ive");
    }

    #[test]
    fn test_relative_path_sibling() {
        let rel = relative_path(Path::new("out/ive"), Path::new("out/ive/2_bar.ive"));
        assert_eq!(rel, "2_bar.ive");
    }

    #[test]
    fn test_relative_path_climbs_out() {
        let rel = relative_path(Path::new("out/ive"), Path::new("out/other/x.ive"));
        assert_eq!(rel, "../other/x.ive");
    }

    #[test]
    fn test_relative_path_ignores_cur_dir() {
        let rel = relative_path(Path::new("./out"), Path::new("out/./ive/a.ive"));
        assert_eq!(rel, "ive/a.ive");
    }

    #[test]
    fn test_list_tiles_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.obj"), "").unwrap();
        std::fs::write(dir.path().join("a.obj"), "").unwrap();
        std::fs::write(dir.path().join("c.OBJ"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("d.obj")).unwrap();

        let tiles = list_tiles(dir.path(), "obj").unwrap();
        let names: Vec<String> = tiles.iter().map(|p| simple_file_name(p)).collect();
        assert_eq!(names, vec!["a.obj", "b.obj"]);
    }

    #[test]
    fn test_list_tiles_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_tiles(&dir.path().join("absent"), "obj").is_err());
    }
}
