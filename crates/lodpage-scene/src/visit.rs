//! Recursive traversal over the node tree.
//!
//! [`Visitor`] has one method per node kind; each default implementation
//! descends into the node's in-memory children, so an implementor only
//! overrides the kinds it cares about. [`VisitorMut`] hands out the whole
//! node mutably so a visitor can rewrite it in place, including replacing
//! its payload with a different kind.

use crate::node::{Group, Lod, Mesh, Node, NodeData, PagedLod};

/// Read-only traversal with per-kind dispatch.
pub trait Visitor {
    fn visit_group(&mut self, node: &Node, _group: &Group) {
        walk(self, node);
    }

    fn visit_mesh(&mut self, _node: &Node, _mesh: &Mesh) {}

    fn visit_lod(&mut self, node: &Node, _lod: &Lod) {
        walk(self, node);
    }

    fn visit_paged_lod(&mut self, node: &Node, _plod: &PagedLod) {
        walk(self, node);
    }
}

/// Dispatch `node` to the matching [`Visitor`] method.
pub fn accept<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) {
    match &node.data {
        NodeData::Group(group) => visitor.visit_group(node, group),
        NodeData::Mesh(mesh) => visitor.visit_mesh(node, mesh),
        NodeData::Lod(lod) => visitor.visit_lod(node, lod),
        NodeData::PagedLod(plod) => visitor.visit_paged_lod(node, plod),
    }
}

/// Visit every in-memory child of `node`.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) {
    for child in node.children() {
        accept(visitor, child);
    }
}

/// Mutable traversal. `has_parent` is `false` only for the traversal root.
pub trait VisitorMut {
    fn visit_mut(&mut self, node: &mut Node, _has_parent: bool) {
        walk_mut(self, node);
    }
}

/// Start a mutable traversal at `root`.
pub fn accept_mut<V: VisitorMut + ?Sized>(visitor: &mut V, root: &mut Node) {
    visitor.visit_mut(root, false);
}

/// Visit every in-memory child of `node` mutably.
pub fn walk_mut<V: VisitorMut + ?Sized>(visitor: &mut V, node: &mut Node) {
    for child in node.children_mut() {
        visitor.visit_mut(child, true);
    }
}

/// Names every node `<Kind>_<ordinal>` in pre-order.
#[derive(Debug, Default)]
pub struct NameNodes {
    count: usize,
}

impl NameNodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes named so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl VisitorMut for NameNodes {
    fn visit_mut(&mut self, node: &mut Node, _has_parent: bool) {
        node.name = format!("{}_{}", node.kind().as_str(), self.count);
        self.count += 1;
        walk_mut(self, node);
    }
}

/// What a paged node references, as reported by [`PagedLodInspector`].
#[derive(Clone, Debug, PartialEq)]
pub struct PagedLodSummary {
    pub name: String,
    pub num_ranges: usize,
    pub files: Vec<String>,
}

/// Collects a [`PagedLodSummary`] for every paged node reachable in memory.
#[derive(Debug, Default)]
pub struct PagedLodInspector {
    pub summaries: Vec<PagedLodSummary>,
}

impl PagedLodInspector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Visitor for PagedLodInspector {
    fn visit_paged_lod(&mut self, node: &Node, plod: &PagedLod) {
        let summary = PagedLodSummary {
            name: node.name.clone(),
            num_ranges: plod.ranges.len(),
            files: plod
                .ranges
                .iter()
                .filter_map(|r| r.file().map(str::to_owned))
                .collect(),
        };
        tracing::info!(
            name = %summary.name,
            num_ranges = summary.num_ranges,
            num_files = summary.files.len(),
            "paged node"
        );
        for file in &summary.files {
            tracing::debug!(name = %summary.name, file = %file, "paged file reference");
        }
        self.summaries.push(summary);
        walk(self, node);
    }
}
