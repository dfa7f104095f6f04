//! Build error types.
//!
//! Only structural failures abort a build. A single tile that fails to load
//! or persist is recorded in the build report instead.

use std::path::PathBuf;

use lodpage_io::TileIoError;

/// Fatal errors that abort a conversion or build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The level config file could not be read.
    #[error("failed to read level config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The level config file has no top-level entry.
    #[error("level config {} is empty", path.display())]
    EmptyConfig { path: PathBuf },

    /// The top-level tile named by the config is missing or not a regular file.
    #[error("top-level tile {} is missing or not a regular file", path.display())]
    TopLevelMissing { path: PathBuf },

    /// An output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The previous level produced mismatched path and sphere accumulators.
    #[error("level outputs out of sync: {paths} paths but {spheres} bounding spheres")]
    LevelCountMismatch { paths: usize, spheres: usize },

    /// Neither a level config nor an input directory was given.
    #[error("no input directory")]
    MissingInput,

    /// An input directory does not exist.
    #[error("input directory {} does not exist", path.display())]
    InputDirMissing { path: PathBuf },

    /// None of the requested models could be loaded.
    #[error("no model loaded")]
    NoModelLoaded,

    /// A required tile (top-level source or root output) failed.
    #[error(transparent)]
    Tile(#[from] TileIoError),
}
