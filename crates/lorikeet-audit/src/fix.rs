//! Best-effort bulk color correction.
//!
//! Given an issue group and replacement foreground and/or background
//! colors, repaint every contributing element. Per-node failures (a node
//! that disappeared between scan and fix, a missing background provider)
//! are skipped silently; only an aggregate summary comes back. Each
//! iteration touches only its own node, so the per-node operations stay
//! logically independent even though the in-memory host issues them
//! sequentially.

use lorikeet_color::Color;
use lorikeet_scene::{NodeId, Paint, PaintKind, SceneGraph};

use crate::issues::ContrastIssue;
use crate::resolver::resolve_background_source;

/// Aggregate outcome of one bulk fix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixSummary {
    /// Nodes where at least one paint was written.
    pub repainted: usize,
    /// Nodes skipped: vanished ids, missing background providers, or
    /// nothing applicable to write.
    pub skipped: usize,
}

/// Apply replacement colors across every element in an issue group.
///
/// `new_fg_hex` overwrites the color of every **visible solid** paint in
/// each node's fill list (non-solid and invisible paints untouched).
/// `new_bg_hex` re-runs the background resolver's identity variant per
/// node and overwrites the authoritative provider's first solid paint,
/// appending a new visible solid paint if the provider has none.
///
/// Undecodable hex strings are treated as absent: failure is data, never
/// an exception.
pub fn apply_fix(
    graph: &mut SceneGraph,
    issue: &ContrastIssue,
    new_fg_hex: Option<&str>,
    new_bg_hex: Option<&str>,
) -> FixSummary {
    let new_fg = new_fg_hex.and_then(Color::from_hex);
    let new_bg = new_bg_hex.and_then(Color::from_hex);

    let mut summary = FixSummary::default();
    if new_fg.is_none() && new_bg.is_none() {
        return summary;
    }

    for host_id in &issue.node_ids {
        // Re-resolve: the graph may have changed since the scan.
        let Some(node_id) = graph.lookup(host_id) else {
            summary.skipped += 1;
            continue;
        };

        let mut touched = false;
        if let Some(color) = new_fg {
            touched |= repaint_foreground(graph, node_id, color);
        }
        if let Some(color) = new_bg {
            touched |= repaint_background(graph, node_id, color);
        }

        if touched {
            summary.repainted += 1;
        } else {
            summary.skipped += 1;
        }
    }
    summary
}

/// Overwrite every visible solid paint on the node itself.
fn repaint_foreground(graph: &mut SceneGraph, id: NodeId, color: Color) -> bool {
    let Some(node) = graph.get_mut(id) else {
        return false;
    };
    let mut touched = false;
    for paint in &mut node.fills {
        if paint.visible && paint.is_solid() {
            paint.kind = PaintKind::Solid(color);
            touched = true;
        }
    }
    touched
}

/// Repaint the node's authoritative background provider.
fn repaint_background(graph: &mut SceneGraph, id: NodeId, color: Color) -> bool {
    let Some(provider) = resolve_background_source(graph, id) else {
        // No provider (element unbounded or searches exhausted): the
        // background is the page default, which is not a node to repaint.
        return false;
    };
    let Some(node) = graph.get_mut(provider) else {
        return false;
    };
    if let Some(paint) = node.first_solid_mut() {
        paint.kind = PaintKind::Solid(color);
    } else {
        node.fills.push(Paint::solid(color));
    }
    true
}
