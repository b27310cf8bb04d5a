//! Depth-first candidate collection under traversal caps.
//!
//! The collector drives the audit: it walks each selected subtree in
//! z-order, identifies candidates (text layers and vector shapes with a
//! visible solid fill), and attaches each candidate's effective
//! background and WCAG category.
//!
//! Resource bounds are the only protection against unbounded work on
//! pathological documents. The counters live in an explicit traversal
//! context threaded through the walk, never ambient state, so multiple
//! scans can never interfere and the component tests in isolation.

use lorikeet_color::Color;
use lorikeet_scene::{NodeId, NodeKind, SceneGraph};

use crate::category::{Category, classify};
use crate::resolver::resolve_background;

/// Maximum nodes touched in one `collect` call, across all subtrees.
pub const MAX_VISITS: usize = 5000;

/// Maximum candidates yielded in one `collect` call.
pub const MAX_CANDIDATES: usize = 2000;

/// One audit candidate: an element with its effective color pair and
/// category attached.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    /// The candidate element.
    pub node: NodeId,
    /// Effective foreground: the element's first visible solid fill.
    pub foreground: Color,
    /// Effective background, from the background resolver.
    pub background: Color,
    /// WCAG category and thresholds.
    pub category: Category,
}

/// The result of one collection pass.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Candidates in traversal (depth-first, z-) order.
    pub candidates: Vec<Candidate>,
    /// True when a traversal cap aborted the walk: results are kept but
    /// may be incomplete, and the operator should be told so.
    pub truncated: bool,
}

/// Per-call traversal counters.
///
/// Shared across the whole `collect` call, not reset per subtree.
#[derive(Debug, Default)]
struct TraversalContext {
    visited: usize,
    collected: usize,
    truncated: bool,
}

/// Walk the selected subtrees and yield audit candidates.
///
/// Once either cap is reached the walk aborts immediately: the current
/// and remaining subtrees are abandoned and already-collected results are
/// returned with the truncation flag set.
#[must_use]
pub fn collect(graph: &SceneGraph, roots: &[NodeId], page_background: Color) -> Collection {
    let mut ctx = TraversalContext::default();
    let mut candidates = Vec::new();

    for &root in roots {
        if !visit(graph, root, page_background, &mut ctx, &mut candidates) {
            break;
        }
    }

    Collection {
        candidates,
        truncated: ctx.truncated,
    }
}

/// Visit one node; returns false when the walk must abort.
fn visit(
    graph: &SceneGraph,
    id: NodeId,
    page_background: Color,
    ctx: &mut TraversalContext,
    out: &mut Vec<Candidate>,
) -> bool {
    // The visit counts even if the node turns out to be invisible.
    ctx.visited += 1;
    if ctx.visited > MAX_VISITS {
        ctx.truncated = true;
        return false;
    }

    let Some(node) = graph.get(id) else { return true };

    // An invisible node and everything it contains is skipped entirely.
    if !node.visible {
        return true;
    }

    match &node.kind {
        // Containers are not candidates; their children are traversed in
        // z-order.
        NodeKind::Page | NodeKind::Frame | NodeKind::Group => {
            for &child in &node.children {
                if !visit(graph, child, page_background, ctx, out) {
                    return false;
                }
            }
            true
        }
        // Candidates: text layers and vector-like shapes. A candidate
        // with no visible solid fill contributes no contrast data.
        NodeKind::Text(_)
        | NodeKind::Rectangle
        | NodeKind::Ellipse
        | NodeKind::Polygon
        | NodeKind::Star
        | NodeKind::Line
        | NodeKind::Vector
        | NodeKind::BooleanOperation => {
            let Some(foreground) = node.first_visible_solid() else {
                return true;
            };
            let background = resolve_background(graph, id, page_background);
            out.push(Candidate {
                node: id,
                foreground,
                background,
                category: classify(node),
            });
            ctx.collected += 1;
            if ctx.collected >= MAX_CANDIDATES {
                ctx.truncated = true;
                return false;
            }
            true
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::ElementType;
    use lorikeet_scene::{Paint, Rect, TextAttributes};

    fn shape(graph: &mut SceneGraph, parent: NodeId, id: &str, color: Color) -> NodeId {
        let node_id = graph.alloc(id, NodeKind::Rectangle);
        if let Some(node) = graph.get_mut(node_id) {
            node.bounds = Some(Rect::new(0.0, 0.0, 10.0, 10.0));
            node.fills = vec![Paint::solid(color)];
        }
        graph.append_child(parent, node_id);
        node_id
    }

    #[test]
    fn collects_text_and_shapes_not_containers() {
        let mut graph = SceneGraph::with_page("page");
        let frame = graph.alloc("frame", NodeKind::Frame);
        if let Some(node) = graph.get_mut(frame) {
            node.fills = vec![Paint::solid(Color::WHITE)];
            node.bounds = Some(Rect::new(0.0, 0.0, 100.0, 100.0));
        }
        graph.append_child(graph.root(), frame);

        let text = graph.alloc(
            "text",
            NodeKind::Text(TextAttributes {
                font_size: Some(16.0),
                font_style: "Regular".to_string(),
            }),
        );
        if let Some(node) = graph.get_mut(text) {
            node.fills = vec![Paint::solid(Color::BLACK)];
            node.bounds = Some(Rect::new(5.0, 5.0, 50.0, 10.0));
        }
        graph.append_child(frame, text);
        let _ = shape(&mut graph, frame, "rect", Color::new(0.5, 0.5, 0.5));

        let collection = collect(&graph, &[graph.root()], Color::WHITE);
        assert!(!collection.truncated);
        assert_eq!(collection.candidates.len(), 2);

        let text_candidate = &collection.candidates[0];
        assert_eq!(text_candidate.foreground, Color::BLACK);
        assert_eq!(text_candidate.background, Color::WHITE);
        assert_eq!(text_candidate.category.element_type, ElementType::NormalText);

        let shape_candidate = &collection.candidates[1];
        assert_eq!(shape_candidate.category.element_type, ElementType::UiComponent);
    }

    #[test]
    fn invisible_subtree_is_skipped() {
        let mut graph = SceneGraph::with_page("page");
        let hidden = graph.alloc("hidden", NodeKind::Frame);
        if let Some(node) = graph.get_mut(hidden) {
            node.visible = false;
        }
        let root = graph.root();
        graph.append_child(root, hidden);
        let _ = shape(&mut graph, hidden, "inside", Color::BLACK);
        let _ = shape(&mut graph, root, "outside", Color::BLACK);

        let collection = collect(&graph, &[graph.root()], Color::WHITE);
        let ids: Vec<&str> = collection
            .candidates
            .iter()
            .map(|c| graph.get(c.node).unwrap().id.as_str())
            .collect();
        assert_eq!(ids, ["outside"]);
    }

    #[test]
    fn fill_less_text_contributes_nothing() {
        let mut graph = SceneGraph::with_page("page");
        let text = graph.alloc("text", NodeKind::Text(TextAttributes::default()));
        if let Some(node) = graph.get_mut(text) {
            node.bounds = Some(Rect::new(0.0, 0.0, 10.0, 10.0));
        }
        graph.append_child(graph.root(), text);

        let collection = collect(&graph, &[graph.root()], Color::WHITE);
        assert!(collection.candidates.is_empty());
        assert!(!collection.truncated);
    }

    #[test]
    fn candidate_cap_truncates_walk() {
        let mut graph = SceneGraph::with_page("page");
        let root = graph.root();
        for i in 0..(MAX_CANDIDATES + 50) {
            let _ = shape(&mut graph, root, &format!("s{i}"), Color::BLACK);
        }

        let collection = collect(&graph, &[root], Color::WHITE);
        assert_eq!(collection.candidates.len(), MAX_CANDIDATES);
        assert!(collection.truncated);
    }

    #[test]
    fn visit_cap_truncates_walk() {
        let mut graph = SceneGraph::with_page("page");
        let root = graph.root();
        // Fill-less, invisible-free frames: visited but never collected.
        for i in 0..(MAX_VISITS + 10) {
            let id = graph.alloc(format!("f{i}"), NodeKind::Frame);
            graph.append_child(root, id);
        }

        let collection = collect(&graph, &[root], Color::WHITE);
        assert!(collection.candidates.is_empty());
        assert!(collection.truncated);
    }

    #[test]
    fn counters_span_multiple_roots() {
        let mut graph = SceneGraph::with_page("page");
        let a = graph.alloc("a", NodeKind::Frame);
        let b = graph.alloc("b", NodeKind::Frame);
        graph.append_child(graph.root(), a);
        graph.append_child(graph.root(), b);
        for i in 0..MAX_CANDIDATES {
            let _ = shape(&mut graph, a, &format!("a{i}"), Color::BLACK);
        }
        let _ = shape(&mut graph, b, "late", Color::BLACK);

        // The cap fires inside the first root; the second is abandoned.
        let collection = collect(&graph, &[a, b], Color::WHITE);
        assert_eq!(collection.candidates.len(), MAX_CANDIDATES);
        assert!(collection.truncated);
        assert!(
            !collection
                .candidates
                .iter()
                .any(|c| graph.get(c.node).unwrap().id == "late")
        );
    }
}
