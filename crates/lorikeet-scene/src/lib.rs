//! Scene graph implementation for the Lorikeet contrast auditor.
//!
//! This crate provides an arena-based tree of visual nodes as handed out by
//! a design host: pages, containers, text layers, and vector shapes, each
//! with a visibility flag, an ordered fill-paint list, and (when laid out)
//! an absolute bounding box.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. Child order is z-order: later entries render on top.
//!
//! The tree is a finite rooted structure reachable from a single page
//! root. The audit layer never assumes more than that: traversal there is
//! capped explicitly so that even an adversarial or enormous document
//! terminates.

use std::collections::HashMap;

use lorikeet_color::Color;

/// JSON document interchange format.
pub mod document;
/// Absolute bounding boxes in document space.
pub mod geometry;
/// Fill paints attached to nodes.
pub mod paint;

pub use document::{Document, DocumentError, parse_document, to_document};
pub use geometry::Rect;
pub use paint::{Paint, PaintKind};

/// A type-safe index into the scene graph arena.
///
/// `NodeId` is an internal handle, distinct from the host's stable string
/// identifier (see [`Node::id`]): the arena index is only meaningful for
/// the lifetime of one [`SceneGraph`], while the host id survives rescans
/// and is what issue records carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The page root is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Text-specific attributes carried by [`NodeKind::Text`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextAttributes {
    /// Font size in px-equivalent units.
    ///
    /// `None` means the size is not a determinate single value (mixed
    /// across the text run); classification then falls back to the
    /// stricter normal-text thresholds.
    pub font_size: Option<f64>,
    /// Font style name, e.g. `"Bold"`, `"Regular"`, `"Semibold Italic"`.
    pub font_style: String,
}

/// The kind of a scene node.
///
/// A closed enum with exhaustive handling everywhere it is matched, so
/// adding a new shape kind is a compile-time-checked change rather than
/// open-ended type inspection.
#[derive(Debug, Clone, PartialEq, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    /// The document root. Its children are the top-level layers.
    Page,
    /// A framing container (its fills commonly supply backgrounds).
    Frame,
    /// A grouping container with no visual box of its own.
    Group,
    /// A text layer.
    Text(TextAttributes),
    /// A plain rectangle shape.
    Rectangle,
    /// An ellipse shape.
    Ellipse,
    /// A polygon shape.
    Polygon,
    /// A star shape.
    Star,
    /// A line shape.
    Line,
    /// A freeform vector network.
    Vector,
    /// A boolean combination of shapes.
    BooleanOperation,
}

impl NodeKind {
    /// Whether this kind is a container whose children are traversed.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Page | Self::Frame | Self::Group)
    }

    /// Whether this kind is a vector-like shape eligible for non-text
    /// contrast evaluation.
    #[must_use]
    pub const fn is_vector_like(&self) -> bool {
        matches!(
            self,
            Self::Rectangle
                | Self::Ellipse
                | Self::Polygon
                | Self::Star
                | Self::Line
                | Self::Vector
                | Self::BooleanOperation
        )
    }

    /// The kind's wire name, e.g. `"BOOLEAN_OPERATION"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// An entry in the scene graph.
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction. Each node has at most one parent; the page
/// root has none.
#[derive(Debug, Clone)]
pub struct Node {
    /// The host's stable identifier for this node, e.g. `"12:7"`.
    pub id: String,
    /// What the node is.
    pub kind: NodeKind,
    /// Visibility flag. An invisible node and everything it contains is
    /// excluded from the audit.
    pub visible: bool,
    /// Ordered fill paints, bottom-most first.
    pub fills: Vec<Paint>,
    /// Absolute bounding box in document space, when laid out.
    pub bounds: Option<Rect>,
    /// Parent link (`None` only for the page root).
    pub parent: Option<NodeId>,
    /// Children in z-order: later entries render on top.
    pub children: Vec<NodeId>,
    /// Sibling immediately above (after) this node in z-order.
    pub next_sibling: Option<NodeId>,
    /// Sibling immediately below (before) this node in z-order.
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    /// The color of the first visible solid fill, in paint-list order.
    ///
    /// This is both an element's effective foreground and what makes a
    /// node eligible to supply a background: multiple stacked fills with
    /// partial opacity are not composited.
    #[must_use]
    pub fn first_visible_solid(&self) -> Option<Color> {
        self.fills.iter().find_map(|p| p.visible_solid_color())
    }

    /// Whether the node carries at least one visible solid fill.
    #[must_use]
    pub fn has_visible_solid_fill(&self) -> bool {
        self.first_visible_solid().is_some()
    }

    /// Mutable access to the first solid paint in the fill list,
    /// regardless of its visibility. Used by the fix path.
    pub fn first_solid_mut(&mut self) -> Option<&mut Paint> {
        self.fills.iter_mut().find(|p| p.is_solid())
    }
}

/// Arena-based scene graph with O(1) node access and traversal.
///
/// All nodes live in a contiguous vector indexed by [`NodeId`]; the page
/// root is always at index 0. A side table maps the host's stable string
/// ids to arena indices for the fix path's node lookup.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    /// All nodes in the tree, indexed by NodeId.
    nodes: Vec<Node>,
    /// Host id → arena index lookup.
    ids: HashMap<String, NodeId>,
}

impl SceneGraph {
    /// Create a new scene graph containing just a page root.
    #[must_use]
    pub fn with_page(page_id: impl Into<String>) -> Self {
        let id = page_id.into();
        let page = Node {
            id: id.clone(),
            kind: NodeKind::Page,
            visible: true,
            fills: Vec::new(),
            bounds: None,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        let mut ids = HashMap::new();
        let _ = ids.insert(id, NodeId::ROOT);
        SceneGraph {
            nodes: vec![page],
            ids,
        }
    }

    /// Get the page root node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph is empty (it never is; the page root is always
    /// present).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    ///
    /// The host id is registered for [`SceneGraph::lookup`]; if the same
    /// host id is allocated twice, the newer node takes over the entry
    /// (the document loader rejects duplicates before they get here).
    pub fn alloc(&mut self, host_id: impl Into<String>, kind: NodeKind) -> NodeId {
        let host_id = host_id.into();
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id: host_id.clone(),
            kind,
            visible: true,
            fills: Vec::new(),
            bounds: None,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        let _ = self.ids.insert(host_id, id);
        id
    }

    /// Appends `child` as the top-most (last) child of `parent`,
    /// updating all sibling relationships.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        // Current top-most child of parent (if any) for sibling links
        let prev_top = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_top {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Resolve a host id to a live node handle.
    ///
    /// Returns `None` when no node with that id exists in this snapshot;
    /// the fix path treats that as "node disappeared between scan and
    /// fix" and skips it silently.
    #[must_use]
    pub fn lookup(&self, host_id: &str) -> Option<NodeId> {
        self.ids.get(host_id).copied()
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, in z-order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the sibling immediately below (before) a node in z-order.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Get the sibling immediately above (after) a node in z-order.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to page root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            graph: self,
            current: self.parent(id),
        }
    }

    /// Iterate over siblings below a node, from immediately behind it
    /// down to the bottom-most sibling (backward in z-order).
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            graph: self,
            current: self.prev_sibling(id),
        }
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    graph: &'a SceneGraph,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.graph.parent(id);
        Some(id)
    }
}

/// Iterator over siblings below a node in z-order.
pub struct PrecedingSiblingIterator<'a> {
    graph: &'a SceneGraph,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.graph.prev_sibling(id);
        Some(id)
    }
}
