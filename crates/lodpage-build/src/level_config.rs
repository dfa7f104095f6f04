//! The line-oriented level config.
//!
//! ```text
//! tiles/top.obj        <- top-level tile, must be a regular file
//! tiles/level1         <- coarsest level directory
//! tiles/level2
//! tiles/level3         <- finest level directory, processed first
//! ```
//!
//! Lines after the first that do not name an existing directory are skipped.

use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// A parsed level config.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelConfig {
    /// Source file of the single top-level tile.
    pub top_level: PathBuf,
    /// Level directories in listed order, coarsest first.
    pub levels: Vec<PathBuf>,
}

impl LevelConfig {
    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let text = std::fs::read_to_string(path).map_err(|source| BuildError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parse config text. `source` names the file for error messages.
    pub fn parse(text: &str, source: &Path) -> Result<Self, BuildError> {
        let mut lines = text.lines().map(str::trim);

        let top_level = match lines.next() {
            Some(line) if !line.is_empty() => PathBuf::from(line),
            _ => {
                return Err(BuildError::EmptyConfig {
                    path: source.to_path_buf(),
                });
            }
        };
        if !top_level.is_file() {
            return Err(BuildError::TopLevelMissing { path: top_level });
        }

        let mut levels = Vec::new();
        for line in lines.filter(|l| !l.is_empty()) {
            let dir = PathBuf::from(line);
            if dir.is_dir() {
                levels.push(dir);
            } else {
                tracing::debug!(line, "skipping config line that is not a directory");
            }
        }

        Ok(Self { top_level, levels })
    }

    /// Level directories with their ordinals, in processing order.
    ///
    /// The last listed directory is processed first. A directory's ordinal is
    /// its 1-based position in the listing, so the finest level carries the
    /// highest ordinal.
    pub fn processing_order(&self) -> impl Iterator<Item = (usize, &Path)> {
        self.levels
            .iter()
            .enumerate()
            .rev()
            .map(|(i, dir)| (i + 1, dir.as_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_only_directories() {
        let dir = tempfile::tempdir().unwrap();
        let top = dir.path().join("top.obj");
        std::fs::write(&top, "").unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        std::fs::create_dir(&a).unwrap();
        std::fs::create_dir(&b).unwrap();

        let text = format!(
            "{}\n{}\n{}\n{}\n\n",
            top.display(),
            a.display(),
            dir.path().join("missing").display(),
            b.display()
        );
        let config = LevelConfig::parse(&text, Path::new("levels.txt")).unwrap();
        assert_eq!(config.top_level, top);
        assert_eq!(config.levels, vec![a, b]);
    }

    #[test]
    fn test_processing_order_is_reversed() {
        let config = LevelConfig {
            top_level: PathBuf::from("top.obj"),
            levels: vec![PathBuf::from("dirA"), PathBuf::from("dirB")],
        };
        let order: Vec<(usize, &Path)> = config.processing_order().collect();
        assert_eq!(order, vec![(2, Path::new("dirB")), (1, Path::new("dirA"))]);
    }

    #[test]
    fn test_empty_config_is_fatal() {
        let err = LevelConfig::parse("", Path::new("levels.txt")).unwrap_err();
        assert!(matches!(err, BuildError::EmptyConfig { .. }));
    }

    #[test]
    fn test_missing_top_level_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!("{}\n", dir.path().join("absent.obj").display());
        let err = LevelConfig::parse(&text, Path::new("levels.txt")).unwrap_err();
        assert!(matches!(err, BuildError::TopLevelMissing { .. }));
    }

    #[test]
    fn test_directory_as_top_level_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!("{}\n", dir.path().display());
        let err = LevelConfig::parse(&text, Path::new("levels.txt")).unwrap_err();
        assert!(matches!(err, BuildError::TopLevelMissing { .. }));
    }

    #[test]
    fn test_unreadable_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = LevelConfig::load(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, BuildError::ConfigRead { .. }));
    }
}
