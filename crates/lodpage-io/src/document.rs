//! Paged tile documents.
//!
//! A tile document is a RON file wrapping one scene node:
//!
//! ```text
//! (
//!     format: "lodpage-tile",
//!     version: 1,
//!     root: (name: "...", data: PagedLod(( ... ))),
//! )
//! ```
//!
//! Subtrees still pending persistence are never part of a document; only
//! their file references are.

use std::path::Path;

use lodpage_scene::Node;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TileIoError};

/// Format tag identifying a tile document.
const FORMAT_TAG: &str = "lodpage-tile";

/// Current document version.
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentRef<'a> {
    format: &'a str,
    version: u32,
    root: &'a Node,
}

#[derive(Deserialize)]
struct Document {
    format: String,
    version: u32,
    root: Node,
}

/// Serialize `node` as a tile document.
pub fn encode_document(node: &Node, path: &Path) -> Result<String> {
    let doc = DocumentRef {
        format: FORMAT_TAG,
        version: FORMAT_VERSION,
        root: node,
    };
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(6)
        .separate_tuple_members(false)
        .enumerate_arrays(false);

    ron::ser::to_string_pretty(&doc, pretty).map_err(|source| TileIoError::Serialize {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a tile document. `path` is only used for error context.
pub fn decode_document(text: &str, path: &Path) -> Result<Node> {
    let doc: Document = ron::from_str(text).map_err(|source| TileIoError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if doc.format != FORMAT_TAG {
        return Err(TileIoError::UnsupportedDocument {
            path: path.to_path_buf(),
            detail: format!("unknown format tag {:?}", doc.format),
        });
    }
    if doc.version != FORMAT_VERSION {
        return Err(TileIoError::UnsupportedDocument {
            path: path.to_path_buf(),
            detail: format!("unsupported version {}", doc.version),
        });
    }

    Ok(doc.root)
}
