//! Tile persistence for lodpage: OBJ source tiles, paged tile documents,
//! directory scanning and relative path computation.

mod document;
mod error;
mod obj;
mod paths;
mod store;

pub use document::{decode_document, encode_document};
pub use error::{Result, TileIoError};
pub use obj::load_obj;
pub use paths::{has_extension, list_tiles, name_less_extension, relative_path, simple_file_name};
pub use store::{FsTileStore, OBJ_EXTENSION, TileStore};
