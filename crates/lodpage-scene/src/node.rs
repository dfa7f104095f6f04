//! Scene-graph node types.
//!
//! A scene is an owned tree of [`Node`]s. Each node carries a name and one of
//! four payloads: a plain [`Group`], a triangle [`Mesh`], an in-memory
//! [`Lod`] whose children are selected by viewer distance, or a [`PagedLod`]
//! whose distant representations live in separate files.

use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::Sphere;

/// Visibility window upper bound for a range that never switches out.
pub const UNBOUNDED: f64 = f64::INFINITY;

/// A named scene-graph node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Human-readable name. May be empty.
    #[serde(default)]
    pub name: String,
    /// Kind-specific payload.
    pub data: NodeData,
}

/// The kind-specific part of a [`Node`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NodeData {
    Group(Group),
    Mesh(Mesh),
    Lod(Lod),
    PagedLod(PagedLod),
}

/// Discriminant of [`NodeData`], used for naming and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    Mesh,
    Lod,
    PagedLod,
}

impl NodeKind {
    /// Display name of the node kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Mesh => "Mesh",
            Self::Lod => "Lod",
            Self::PagedLod => "PagedLod",
        }
    }
}

/// A node with an ordered list of children, all always active.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub children: Vec<Node>,
}

/// Indexed triangle geometry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    #[serde(default)]
    pub indices: Vec<u32>,
}

/// One child of an in-memory LOD, visible over `[min, max)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LodRange {
    pub min: f64,
    pub max: f64,
    pub child: Node,
}

/// A level-of-detail node holding every representation in memory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Lod {
    pub ranges: Vec<LodRange>,
}

/// The content of one [`PagedLod`] range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RangePayload {
    /// A subtree kept resident with its parent.
    Inline(Node),
    /// A subtree stored in a separate file, referenced by a path relative to
    /// the directory of the file containing this node.
    External {
        file: String,
        /// Subtree waiting to be persisted to `file`. Never serialized.
        #[serde(skip)]
        pending: Option<Box<Node>>,
    },
}

/// One range of a [`PagedLod`], visible over `[min, max)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PagedRange {
    pub min: f64,
    pub max: f64,
    pub payload: RangePayload,
}

impl PagedRange {
    /// A resident range.
    pub fn inline(child: Node, min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            payload: RangePayload::Inline(child),
        }
    }

    /// A range referencing an already persisted file.
    pub fn external(file: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            payload: RangePayload::External {
                file: file.into(),
                pending: None,
            },
        }
    }

    /// A range whose subtree still has to be written to `file`.
    pub fn pending(child: Node, file: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            payload: RangePayload::External {
                file: file.into(),
                pending: Some(Box::new(child)),
            },
        }
    }

    /// The external file name, if this range is paged.
    pub fn file(&self) -> Option<&str> {
        match &self.payload {
            RangePayload::Inline(_) => None,
            RangePayload::External { file, .. } => Some(file),
        }
    }

    /// The subtree held in memory for this range, resident or pending.
    pub fn loaded_child(&self) -> Option<&Node> {
        match &self.payload {
            RangePayload::Inline(node) => Some(node),
            RangePayload::External { pending, .. } => pending.as_deref(),
        }
    }

    /// Mutable access to the subtree held in memory for this range.
    pub fn loaded_child_mut(&mut self) -> Option<&mut Node> {
        match &mut self.payload {
            RangePayload::Inline(node) => Some(node),
            RangePayload::External { pending, .. } => pending.as_deref_mut(),
        }
    }
}

/// A level-of-detail node whose ranges may be stored in external files.
///
/// `center` and `radius` are stored explicitly so the node can be culled and
/// ranged before any of its external children are loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PagedLod {
    pub center: DVec3,
    pub radius: f64,
    pub ranges: Vec<PagedRange>,
}

impl PagedLod {
    /// Create an empty paged node with an invalid bound.
    pub fn new() -> Self {
        Self {
            center: Sphere::INVALID.center,
            radius: Sphere::INVALID.radius,
            ranges: Vec::new(),
        }
    }

    /// The stored bound of this node.
    pub fn bound(&self) -> Sphere {
        Sphere::new(self.center, self.radius)
    }

    /// Store `sphere` as the bound of this node.
    pub fn set_bound(&mut self, sphere: Sphere) {
        self.center = sphere.center;
        self.radius = sphere.radius;
    }

    /// Union of the bounds of every subtree currently held in memory.
    pub fn loaded_bound(&self) -> Option<Sphere> {
        union_bounds(self.ranges.iter().filter_map(PagedRange::loaded_child))
    }

    /// Number of ranges referencing external files.
    pub fn num_files(&self) -> usize {
        self.ranges.iter().filter(|r| r.file().is_some()).count()
    }
}

impl Default for PagedLod {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Create an unnamed node.
    pub fn new(data: NodeData) -> Self {
        Self {
            name: String::new(),
            data,
        }
    }

    /// Create an unnamed group over `children`.
    pub fn group(children: Vec<Node>) -> Self {
        Self::new(NodeData::Group(Group { children }))
    }

    /// Create an unnamed mesh node.
    pub fn mesh(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self::new(NodeData::Mesh(Mesh { positions, indices }))
    }

    /// Set the node name, builder style.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Group(_) => NodeKind::Group,
            NodeData::Mesh(_) => NodeKind::Mesh,
            NodeData::Lod(_) => NodeKind::Lod,
            NodeData::PagedLod(_) => NodeKind::PagedLod,
        }
    }

    /// Compute the bounding sphere of this node.
    ///
    /// Meshes are bounded by their vertices, groups and LODs by the union of
    /// their children, and paged LODs by their stored center and radius.
    /// Returns `None` if the node contains no geometry.
    pub fn bound(&self) -> Option<Sphere> {
        match &self.data {
            NodeData::Mesh(mesh) => Sphere::from_points(&mesh.positions),
            NodeData::Group(group) => union_bounds(group.children.iter()),
            NodeData::Lod(lod) => union_bounds(lod.ranges.iter().map(|r| &r.child)),
            NodeData::PagedLod(plod) => Some(plod.bound()).filter(Sphere::is_valid),
        }
    }

    /// Children held in memory, in order.
    pub fn children(&self) -> Vec<&Node> {
        match &self.data {
            NodeData::Mesh(_) => Vec::new(),
            NodeData::Group(group) => group.children.iter().collect(),
            NodeData::Lod(lod) => lod.ranges.iter().map(|r| &r.child).collect(),
            NodeData::PagedLod(plod) => plod
                .ranges
                .iter()
                .filter_map(PagedRange::loaded_child)
                .collect(),
        }
    }

    /// Mutable children held in memory, in order.
    pub fn children_mut(&mut self) -> Vec<&mut Node> {
        match &mut self.data {
            NodeData::Mesh(_) => Vec::new(),
            NodeData::Group(group) => group.children.iter_mut().collect(),
            NodeData::Lod(lod) => lod.ranges.iter_mut().map(|r| &mut r.child).collect(),
            NodeData::PagedLod(plod) => plod
                .ranges
                .iter_mut()
                .filter_map(PagedRange::loaded_child_mut)
                .collect(),
        }
    }
}

fn union_bounds<'a>(nodes: impl Iterator<Item = &'a Node>) -> Option<Sphere> {
    let sphere = nodes
        .filter_map(Node::bound)
        .fold(Sphere::INVALID, |acc, s| acc.union(&s));
    sphere.is_valid().then_some(sphere)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(offset: f32) -> Node {
        Node::mesh(
            vec![
                Vec3::new(offset - 1.0, -1.0, 0.0),
                Vec3::new(offset + 1.0, -1.0, 0.0),
                Vec3::new(offset + 1.0, 1.0, 0.0),
                Vec3::new(offset - 1.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn test_mesh_bound() {
        let bound = quad(0.0).bound().unwrap();
        assert_eq!(bound.center, DVec3::ZERO);
        assert!((bound.radius - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_group_has_no_bound() {
        assert!(Node::group(Vec::new()).bound().is_none());
        assert!(Node::mesh(Vec::new(), Vec::new()).bound().is_none());
    }

    #[test]
    fn test_group_bound_encloses_children() {
        let group = Node::group(vec![quad(-10.0), quad(10.0)]);
        let bound = group.bound().unwrap();
        for child in group.children() {
            let b = child.bound().unwrap();
            assert!(bound.center_distance(&b) + b.radius <= bound.radius + 1e-9);
        }
    }

    #[test]
    fn test_paged_lod_bound_ignores_external_files() {
        let mut plod = PagedLod::new();
        plod.ranges.push(PagedRange::inline(quad(0.0), 0.0, UNBOUNDED));
        plod.ranges.push(PagedRange::external("far.ive", 0.0, 10.0));
        let loaded = plod.loaded_bound().unwrap();
        assert_eq!(loaded, quad(0.0).bound().unwrap());
        assert_eq!(plod.num_files(), 1);

        let node = Node::new(NodeData::PagedLod(plod));
        // Stored bound was never set.
        assert!(node.bound().is_none());
    }

    #[test]
    fn test_pending_children_are_reachable() {
        let mut plod = PagedLod::new();
        plod.ranges.push(PagedRange::inline(quad(0.0), 100.0, UNBOUNDED));
        plod.ranges.push(PagedRange::pending(quad(1.0), "a.ive", 0.0, 100.0));
        plod.ranges.push(PagedRange::external("b.ive", 0.0, 100.0));
        let node = Node::new(NodeData::PagedLod(plod));
        assert_eq!(node.children().len(), 2);
    }

    #[test]
    fn test_pending_subtree_is_not_serialized() {
        let mut plod = PagedLod::new();
        plod.ranges.push(PagedRange::pending(quad(1.0), "a.ive", 0.0, 100.0));
        let node = Node::new(NodeData::PagedLod(plod));

        let text = ron::to_string(&node).unwrap();
        assert!(text.contains("a.ive"));
        assert!(!text.contains("positions"));

        let back: Node = ron::from_str(&text).unwrap();
        let NodeData::PagedLod(back) = back.data else {
            panic!("expected a paged node");
        };
        assert_eq!(back.ranges[0].file(), Some("a.ive"));
        assert!(back.ranges[0].loaded_child().is_none());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(quad(0.0).kind().as_str(), "Mesh");
        assert_eq!(Node::group(Vec::new()).kind(), NodeKind::Group);
    }
}
