//! Persists subtrees left pending by [`RangePartitioner`](crate::RangePartitioner).

use std::path::{Path, PathBuf};

use lodpage_io::TileStore;
use lodpage_scene::{Node, PagedLod, RangePayload, Visitor, accept, walk};

/// A tile that could not be read or written. The build carries on without it.
#[derive(Clone, Debug, PartialEq)]
pub struct TileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Files written by a [`SubgraphWriter`] pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<TileFailure>,
}

/// Writes every pending paged subtree to `<dir>/<file>`.
///
/// Nested paged nodes inside a pending subtree are visited too, so a
/// converted hierarchy of any depth is written in one pass. A failed write
/// is logged and recorded; the pass continues with the remaining subtrees.
pub struct SubgraphWriter<'a, S: TileStore + ?Sized> {
    dir: &'a Path,
    store: &'a S,
    report: WriteReport,
}

impl<'a, S: TileStore + ?Sized> SubgraphWriter<'a, S> {
    pub fn new(dir: &'a Path, store: &'a S) -> Self {
        Self {
            dir,
            store,
            report: WriteReport::default(),
        }
    }

    /// Write every pending subtree reachable from `root`.
    pub fn write(mut self, root: &Node) -> WriteReport {
        accept(&mut self, root);
        self.report
    }
}

impl<S: TileStore + ?Sized> Visitor for SubgraphWriter<'_, S> {
    fn visit_paged_lod(&mut self, node: &Node, plod: &PagedLod) {
        for range in &plod.ranges {
            let RangePayload::External {
                file,
                pending: Some(child),
            } = &range.payload
            else {
                continue;
            };

            let path = self.dir.join(file);
            tracing::info!(path = %path.display(), "writing out paged subgraph");
            match self.store.write_node(child, &path) {
                Ok(()) => self.report.written.push(path),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "paged subgraph write failed");
                    self.report.failed.push(TileFailure {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }

        walk(self, node);
    }
}
