//! Tile I/O error types.

use std::path::PathBuf;

/// Errors that can occur when reading or writing tiles.
#[derive(Debug, thiserror::Error)]
pub enum TileIoError {
    /// Failed to read a file or directory from disk.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a tile to disk.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OBJ loader rejected the file.
    #[error("failed to load OBJ {}: {source}", path.display())]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// The OBJ file loaded but contained no models.
    #[error("no models found in {}", path.display())]
    EmptyObj { path: PathBuf },

    /// A paged tile document could not be parsed.
    #[error("failed to parse tile {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// The document header is missing or names an unknown version.
    #[error("unsupported tile document {}: {detail}", path.display())]
    UnsupportedDocument { path: PathBuf, detail: String },

    /// A node could not be serialized.
    #[error("failed to serialize tile {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: ron::Error,
    },
}

/// Result type for tile I/O.
pub type Result<T> = std::result::Result<T, TileIoError>;
