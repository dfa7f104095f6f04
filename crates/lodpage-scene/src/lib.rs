//! Scene-graph runtime for paged level-of-detail hierarchies: bounding
//! spheres, the node tree, and visitor-based traversal.

mod node;
mod sphere;
mod visit;

pub use node::{
    Group, Lod, LodRange, Mesh, Node, NodeData, NodeKind, PagedLod, PagedRange, RangePayload,
    UNBOUNDED,
};
pub use sphere::Sphere;
pub use visit::{
    NameNodes, PagedLodInspector, PagedLodSummary, Visitor, VisitorMut, accept, accept_mut, walk,
    walk_mut,
};
