//! JSON document interchange format.
//!
//! A document is a nested node tree with camelCase keys, the concrete
//! realization of the host/document-provider boundary for headless use:
//!
//! ```json
//! {
//!   "page": {
//!     "id": "0:1", "kind": "PAGE",
//!     "children": [
//!       { "id": "1:2", "kind": "FRAME",
//!         "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1 } }],
//!         "bounds": { "x": 0, "y": 0, "width": 800, "height": 600 },
//!         "children": [ ... ] }
//!     ]
//!   }
//! }
//! ```
//!
//! Malformed structure (bad JSON, non-page root, duplicate ids) is a typed
//! error; unknown node kinds and paint types are NOT errors: they warn
//! once and degrade (skipped subtree, opaque paint), because a document
//! the host can produce must never crash the audit.

use serde::{Deserialize, Serialize};

use lorikeet_color::Color;
use lorikeet_common::warning::warn_once;

use crate::geometry::Rect;
use crate::paint::{Paint, PaintKind};
use crate::{NodeId, NodeKind, SceneGraph, TextAttributes};

/// A parsed document: a single page root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The page root node.
    pub page: DocumentNode,
}

/// One node in the nested wire representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNode {
    /// The host's stable identifier, unique within the document.
    pub id: String,
    /// Wire-level kind name, e.g. `"TEXT"`, `"BOOLEAN_OPERATION"`.
    pub kind: KindName,
    /// Visibility flag; absent means visible.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Ordered fill paints, bottom-most first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<PaintRepr>,
    /// Absolute bounding box, when the host has laid the node out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rect>,
    /// Font size for text nodes; absent also encodes "mixed across the
    /// run" (indeterminate).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font style name for text nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    /// Children in z-order: later entries render on top.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentNode>,
}

/// Wire-level node kind names.
///
/// Unknown names deserialize to [`KindName::Unknown`] instead of failing:
/// the loader warns and skips such nodes (and their subtrees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum KindName {
    /// Document root.
    Page,
    /// Framing container.
    Frame,
    /// Grouping container.
    Group,
    /// Text layer.
    Text,
    /// Plain rectangle.
    Rectangle,
    /// Ellipse shape.
    Ellipse,
    /// Polygon shape.
    Polygon,
    /// Star shape.
    Star,
    /// Line shape.
    Line,
    /// Freeform vector network.
    Vector,
    /// Boolean combination of shapes.
    BooleanOperation,
    /// Any kind this model does not know about.
    #[serde(other)]
    Unknown,
}

impl KindName {
    /// The wire name, e.g. `"BOOLEAN_OPERATION"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// One fill paint in the wire representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintRepr {
    /// Wire-level paint type name.
    #[serde(rename = "type")]
    pub paint_type: PaintTypeName,
    /// Per-paint visibility flag; absent means visible.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// The color, present only for solid paints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Wire-level paint type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintTypeName {
    /// A single opaque color.
    Solid,
    /// Any gradient.
    Gradient,
    /// An image fill.
    Image,
    /// Any paint type this model does not know about.
    #[serde(other)]
    Unknown,
}

/// Errors produced while loading a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The JSON itself was unparseable or structurally wrong.
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The root node was not a `PAGE`.
    #[error("document root must be a PAGE node, got `{0}`")]
    RootNotPage(&'static str),
    /// Two nodes claimed the same stable id.
    #[error("duplicate node id `{0}`")]
    DuplicateId(String),
}

fn default_visible() -> bool {
    true
}

/// Parse a JSON document string into a scene graph.
///
/// # Errors
///
/// Returns [`DocumentError`] for unparseable JSON, a non-page root, or
/// duplicate node ids. Unknown kinds and paint types degrade with a
/// one-time warning instead of erroring.
pub fn parse_document(json: &str) -> Result<SceneGraph, DocumentError> {
    let document: Document = serde_json::from_str(json)?;
    build_graph(&document)
}

/// Build a scene graph from an already-deserialized document.
///
/// # Errors
///
/// Returns [`DocumentError::RootNotPage`] or [`DocumentError::DuplicateId`]
/// on structural problems.
pub fn build_graph(document: &Document) -> Result<SceneGraph, DocumentError> {
    let page = &document.page;
    if page.kind != KindName::Page {
        return Err(DocumentError::RootNotPage(page.kind.name()));
    }

    let mut graph = SceneGraph::with_page(page.id.clone());
    let root = graph.root();
    if let Some(node) = graph.get_mut(root) {
        node.visible = page.visible;
        node.bounds = page.bounds;
        node.fills = convert_paints(&page.id, &page.fills);
    }

    for child in &page.children {
        attach(&mut graph, root, child)?;
    }
    Ok(graph)
}

/// Recursively attach one wire node (and its subtree) under `parent`.
fn attach(graph: &mut SceneGraph, parent: NodeId, repr: &DocumentNode) -> Result<(), DocumentError> {
    let Some(kind) = convert_kind(repr) else {
        // Unknown or out-of-place kind: skip the node and its subtree.
        return Ok(());
    };

    if graph.lookup(&repr.id).is_some() {
        return Err(DocumentError::DuplicateId(repr.id.clone()));
    }

    let id = graph.alloc(repr.id.clone(), kind);
    if let Some(node) = graph.get_mut(id) {
        node.visible = repr.visible;
        node.bounds = repr.bounds;
        node.fills = convert_paints(&repr.id, &repr.fills);
    }
    graph.append_child(parent, id);

    for child in &repr.children {
        attach(graph, id, child)?;
    }
    Ok(())
}

/// Map a wire node to its in-model kind, or `None` to skip it.
fn convert_kind(repr: &DocumentNode) -> Option<NodeKind> {
    match repr.kind {
        KindName::Page => {
            warn_once(
                "Document",
                &format!("ignoring nested PAGE node `{}`", repr.id),
            );
            None
        }
        KindName::Frame => Some(NodeKind::Frame),
        KindName::Group => Some(NodeKind::Group),
        KindName::Text => Some(NodeKind::Text(TextAttributes {
            font_size: repr.font_size,
            font_style: repr.font_style.clone().unwrap_or_default(),
        })),
        KindName::Rectangle => Some(NodeKind::Rectangle),
        KindName::Ellipse => Some(NodeKind::Ellipse),
        KindName::Polygon => Some(NodeKind::Polygon),
        KindName::Star => Some(NodeKind::Star),
        KindName::Line => Some(NodeKind::Line),
        KindName::Vector => Some(NodeKind::Vector),
        KindName::BooleanOperation => Some(NodeKind::BooleanOperation),
        KindName::Unknown => {
            warn_once(
                "Document",
                &format!("ignoring node `{}` with unknown kind", repr.id),
            );
            None
        }
    }
}

/// Convert wire paints to model paints, dropping malformed entries.
fn convert_paints(node_id: &str, reprs: &[PaintRepr]) -> Vec<Paint> {
    reprs
        .iter()
        .filter_map(|repr| convert_paint(node_id, repr))
        .collect()
}

fn convert_paint(node_id: &str, repr: &PaintRepr) -> Option<Paint> {
    let kind = match repr.paint_type {
        PaintTypeName::Solid => match repr.color {
            Some(color) => PaintKind::Solid(color),
            None => {
                warn_once(
                    "Document",
                    &format!("dropping solid paint without color on `{node_id}`"),
                );
                return None;
            }
        },
        PaintTypeName::Gradient => PaintKind::Gradient,
        PaintTypeName::Image => PaintKind::Image,
        PaintTypeName::Unknown => {
            warn_once(
                "Document",
                &format!("treating unknown paint type on `{node_id}` as opaque"),
            );
            PaintKind::Other
        }
    };
    Some(Paint {
        visible: repr.visible,
        kind,
    })
}

/// Serialize a scene graph back to the wire representation.
///
/// The inverse of [`build_graph`] up to the loader's deliberate lossiness
/// (dropped malformed paints, skipped unknown-kind subtrees).
#[must_use]
pub fn to_document(graph: &SceneGraph) -> Document {
    Document {
        page: node_repr(graph, graph.root()),
    }
}

fn node_repr(graph: &SceneGraph, id: NodeId) -> DocumentNode {
    let Some(node) = graph.get(id) else {
        // Unreachable for ids produced by the graph itself.
        return DocumentNode {
            id: String::new(),
            kind: KindName::Unknown,
            visible: false,
            fills: Vec::new(),
            bounds: None,
            font_size: None,
            font_style: None,
            children: Vec::new(),
        };
    };

    let (kind, font_size, font_style) = match &node.kind {
        NodeKind::Page => (KindName::Page, None, None),
        NodeKind::Frame => (KindName::Frame, None, None),
        NodeKind::Group => (KindName::Group, None, None),
        NodeKind::Text(attrs) => (
            KindName::Text,
            attrs.font_size,
            Some(attrs.font_style.clone()),
        ),
        NodeKind::Rectangle => (KindName::Rectangle, None, None),
        NodeKind::Ellipse => (KindName::Ellipse, None, None),
        NodeKind::Polygon => (KindName::Polygon, None, None),
        NodeKind::Star => (KindName::Star, None, None),
        NodeKind::Line => (KindName::Line, None, None),
        NodeKind::Vector => (KindName::Vector, None, None),
        NodeKind::BooleanOperation => (KindName::BooleanOperation, None, None),
    };

    DocumentNode {
        id: node.id.clone(),
        kind,
        visible: node.visible,
        fills: node.fills.iter().map(paint_repr).collect(),
        bounds: node.bounds,
        font_size,
        font_style,
        children: node
            .children
            .iter()
            .map(|&child| node_repr(graph, child))
            .collect(),
    }
}

fn paint_repr(paint: &Paint) -> PaintRepr {
    let (paint_type, color) = match paint.kind {
        PaintKind::Solid(c) => (PaintTypeName::Solid, Some(c)),
        PaintKind::Gradient => (PaintTypeName::Gradient, None),
        PaintKind::Image => (PaintTypeName::Image, None),
        PaintKind::Other => (PaintTypeName::Unknown, None),
    };
    PaintRepr {
        paint_type,
        visible: paint.visible,
        color,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
