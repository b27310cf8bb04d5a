//! Effective-background resolution.
//!
//! The scene model has no explicit "background" attribute. The effective
//! background of an element is found by a deterministic, bounded search:
//! ancestors first (painter's-order fill stacking within a container),
//! then z-below siblings whose boxes overlap the element, then the page
//! background as the final fallback.
//!
//! The identity variant ([`resolve_background_source`]) is primary; the
//! color variant ([`resolve_background`]) is derived from it, so the two
//! always agree on the winning node. The fix path relies on that: it
//! repaints exactly the node the resolver says is authoritative.

use lorikeet_color::Color;
use lorikeet_scene::{NodeId, SceneGraph};

/// Maximum parent hops inspected during the ancestor search.
pub const MAX_ANCESTOR_HOPS: usize = 10;

/// Maximum z-below siblings examined during the sibling search.
pub const MAX_SIBLING_SCAN: usize = 20;

/// Find the node that supplies an element's effective background.
///
/// Search order:
/// 1. No resolvable absolute bounds → no source (page background).
/// 2. Ancestors, from the direct parent upward, stopping at the page root
///    or after [`MAX_ANCESTOR_HOPS`] hops: the first ancestor carrying a
///    visible solid fill wins. Only the first visible solid paint in
///    paint-list order is considered; stacked partially-opaque fills are
///    not composited.
/// 3. Siblings, scanning backward in z-order from the element, examining
///    at most [`MAX_SIBLING_SCAN`] of them: a sibling wins if it is
///    visible, its bounding box strictly overlaps the element's (touching
///    edges do not count), and it carries a visible solid fill.
///
/// Returns `None` when both searches are exhausted; the color variant
/// maps that to the configured page background.
#[must_use]
pub fn resolve_background_source(graph: &SceneGraph, element: NodeId) -> Option<NodeId> {
    let element_bounds = graph.get(element)?.bounds?;

    // Ancestor search.
    for ancestor in graph.ancestors(element).take(MAX_ANCESTOR_HOPS) {
        if graph.get(ancestor).is_some_and(|node| node.has_visible_solid_fill()) {
            return Some(ancestor);
        }
    }

    // Sibling search: nearest z-below sibling first.
    for sibling in graph.preceding_siblings(element).take(MAX_SIBLING_SCAN) {
        let Some(node) = graph.get(sibling) else { continue };
        if !node.visible {
            continue;
        }
        let Some(bounds) = node.bounds else { continue };
        if !bounds.overlaps(&element_bounds) {
            continue;
        }
        if node.has_visible_solid_fill() {
            return Some(sibling);
        }
    }

    None
}

/// Resolve an element's effective background color.
///
/// Total function: always returns a color, falling back to
/// `page_background` (a configuration point; white unless the host
/// supplies a true page background) when no source node is found.
#[must_use]
pub fn resolve_background(graph: &SceneGraph, element: NodeId, page_background: Color) -> Color {
    resolve_background_source(graph, element)
        .and_then(|source| graph.get(source))
        .and_then(|node| node.first_visible_solid())
        .unwrap_or(page_background)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
