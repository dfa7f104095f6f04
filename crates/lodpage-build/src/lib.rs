//! Paged LOD construction.
//!
//! Two front-ends share the same paging core:
//!
//! - [`convert_models`] turns every in-memory LOD of a model into a paged LOD
//!   and writes the pending subtrees next to the root file.
//! - [`HierarchicalPagingBuilder`] assembles a multi-level paging tree from
//!   one directory of source tiles per resolution level, linking tiles by
//!   bounding-sphere containment.

mod containment;
mod convert;
mod error;
mod hierarchy;
mod level_config;
mod partition;
mod writeout;

pub use containment::{Containment, DEFAULT_CONTAINMENT_SLACK, mostly_contains};
pub use convert::{ConvertOutcome, convert_models};
pub use error::BuildError;
pub use hierarchy::{
    BuildReport, HierarchicalPagingBuilder, LevelOutputs, LevelSummary, TileOutputRecord,
    wrap_tile,
};
pub use level_config::LevelConfig;
pub use partition::{ConvertReport, RangePartitioner};
pub use writeout::{SubgraphWriter, TileFailure, WriteReport};
