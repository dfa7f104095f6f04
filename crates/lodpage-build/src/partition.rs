//! LOD to paged LOD conversion.
//!
//! Every in-memory [`Lod`] reachable from the traversal root is replaced by a
//! [`PagedLod`]. The range visible from farthest away stays resident; every
//! other range is given a file name and left pending until the subgraph
//! writer persists it.

use std::path::Path;

use lodpage_scene::{
    Group, Lod, Node, NodeData, PagedLod, PagedRange, VisitorMut, accept_mut, walk_mut,
};

/// What a conversion pass did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvertReport {
    /// LODs replaced by paged LODs.
    pub converted: usize,
    /// LODs left alone because they were the traversal root.
    pub skipped_root: usize,
    /// LODs left alone because they had a single range.
    pub skipped_single: usize,
    /// File names assigned to pending ranges, in assignment order.
    pub files: Vec<String>,
}

/// Converts LODs into paged LODs with generated child file names.
///
/// Generated names have the form `<basename>_<lod>_<range><extension>`, where
/// `lod` counts LODs in traversal order and `range` is the position after
/// sorting by descending far distance.
#[derive(Debug)]
pub struct RangePartitioner {
    basename: String,
    extension: String,
    make_all_children_paged: bool,
    lod_count: usize,
    report: ConvertReport,
}

impl RangePartitioner {
    /// `extension` includes the leading dot.
    pub fn new(
        basename: impl Into<String>,
        extension: impl Into<String>,
        make_all_children_paged: bool,
    ) -> Self {
        Self {
            basename: basename.into(),
            extension: extension.into(),
            make_all_children_paged,
            lod_count: 0,
            report: ConvertReport::default(),
        }
    }

    /// Derive base name and extension from the root output file, so that
    /// `out/model.ive` yields children named `model_<lod>_<range>.ive`.
    pub fn for_output(output: &Path, make_all_children_paged: bool) -> Self {
        let basename = lodpage_io::name_less_extension(output);
        let extension = output
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        Self::new(basename, extension, make_all_children_paged)
    }

    /// Convert every eligible LOD under `root` in place.
    pub fn convert(mut self, root: &mut Node) -> ConvertReport {
        accept_mut(&mut self, root);
        tracing::info!(
            converted = self.report.converted,
            skipped_root = self.report.skipped_root,
            skipped_single = self.report.skipped_single,
            files = self.report.files.len(),
            "LOD conversion finished"
        );
        self.report
    }

    fn partition(&mut self, lod: Lod, lod_num: usize) -> PagedLod {
        let mut ranges = lod.ranges;
        // Stable: equal far distances keep insertion order.
        ranges.sort_by(|a, b| b.max.total_cmp(&a.max));

        let mut plod = PagedLod::new();
        for (pos, range) in ranges.into_iter().enumerate() {
            if pos == 0 && !self.make_all_children_paged {
                plod.ranges
                    .push(PagedRange::inline(range.child, range.min, range.max));
            } else {
                let file = format!("{}_{}_{}{}", self.basename, lod_num, pos, self.extension);
                self.report.files.push(file.clone());
                plod.ranges
                    .push(PagedRange::pending(range.child, file, range.min, range.max));
            }
        }

        if let Some(bound) = plod.loaded_bound() {
            plod.set_bound(bound);
        }
        plod
    }
}

impl VisitorMut for RangePartitioner {
    fn visit_mut(&mut self, node: &mut Node, has_parent: bool) {
        if let NodeData::Lod(lod) = &node.data {
            let lod_num = self.lod_count;
            self.lod_count += 1;

            if !has_parent {
                tracing::warn!(name = %node.name, "can't operate on root node, leaving LOD as is");
                self.report.skipped_root += 1;
            } else if !self.make_all_children_paged && lod.ranges.len() < 2 {
                tracing::info!(name = %node.name, "leaving LOD with one child as is");
                self.report.skipped_single += 1;
            } else {
                tracing::debug!(name = %node.name, ranges = lod.ranges.len(), "converting LOD to paged LOD");
                let data = std::mem::replace(&mut node.data, NodeData::Group(Group::default()));
                if let NodeData::Lod(lod) = data {
                    node.data = NodeData::PagedLod(self.partition(lod, lod_num));
                    self.report.converted += 1;
                }
            }
        }

        walk_mut(self, node);
    }
}
