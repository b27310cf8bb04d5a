//! End-to-end scan tests: traversal, background resolution, category
//! classification, and grouping working together over small documents.

use lorikeet_audit::{ElementType, EngineMessage, Session, UiMessage};
use lorikeet_color::Color;
use lorikeet_scene::{NodeId, NodeKind, Paint, Rect, SceneGraph, TextAttributes};

/// Helper to add a filled frame.
fn add_frame(graph: &mut SceneGraph, parent: NodeId, id: &str, fill: Color, bounds: Rect) -> NodeId {
    let node_id = graph.alloc(id, NodeKind::Frame);
    if let Some(node) = graph.get_mut(node_id) {
        node.fills = vec![Paint::solid(fill)];
        node.bounds = Some(bounds);
    }
    graph.append_child(parent, node_id);
    node_id
}

/// Helper to add a text node.
fn add_text(
    graph: &mut SceneGraph,
    parent: NodeId,
    id: &str,
    fill: Color,
    size: f64,
    style: &str,
) -> NodeId {
    let node_id = graph.alloc(
        id,
        NodeKind::Text(TextAttributes {
            font_size: Some(size),
            font_style: style.to_string(),
        }),
    );
    if let Some(node) = graph.get_mut(node_id) {
        node.fills = vec![Paint::solid(fill)];
        node.bounds = Some(Rect::new(10.0, 10.0, 100.0, 20.0));
    }
    graph.append_child(parent, node_id);
    node_id
}

#[test]
fn black_text_on_white_frame_passes_everything() {
    let mut graph = SceneGraph::with_page("page");
    let root = graph.root();
    let frame = add_frame(
        &mut graph,
        root,
        "frame",
        Color::WHITE,
        Rect::new(0.0, 0.0, 800.0, 600.0),
    );
    let _ = add_text(&mut graph, frame, "text", Color::BLACK, 16.0, "Regular");

    let session = Session::for_document(graph, Color::WHITE);
    let report = session.scan();

    assert!(report.issues.is_empty());
    assert_eq!(report.passed.len(), 1);
    let record = &report.passed[0];
    assert_eq!(record.foreground_hex, "#000000");
    assert_eq!(record.background_hex, "#FFFFFF");
    assert!((record.ratio - 21.0).abs() < 0.01);
    assert_eq!(record.element_type, ElementType::NormalText);
    assert!((record.required_aa - 4.5).abs() < f64::EPSILON);
    assert_eq!(record.required_aaa, Some(7.0));
    assert!(record.pass_aa);
    assert_eq!(record.pass_aaa, Some(true));
}

#[test]
fn mid_gray_vector_on_white_meets_non_text_threshold() {
    let mut graph = SceneGraph::with_page("page");
    let root = graph.root();
    let frame = add_frame(
        &mut graph,
        root,
        "frame",
        Color::WHITE,
        Rect::new(0.0, 0.0, 800.0, 600.0),
    );
    let icon = graph.alloc("icon", NodeKind::Vector);
    if let Some(node) = graph.get_mut(icon) {
        node.fills = vec![Paint::solid(Color::from_hex("#777777").unwrap())];
        node.bounds = Some(Rect::new(20.0, 20.0, 24.0, 24.0));
    }
    graph.append_child(frame, icon);

    let session = Session::for_document(graph, Color::WHITE);
    let report = session.scan();

    // 4.48:1 against a required 3:1 passes AA, and non-text has no
    // AAA tier at all.
    assert!(report.issues.is_empty());
    let record = &report.passed[0];
    assert!((record.ratio - 4.48).abs() < 0.01);
    assert_eq!(record.element_type, ElementType::UiComponent);
    assert!(record.pass_aa);
    assert_eq!(record.pass_aaa, None);
    assert!(!record.is_text);
}

#[test]
fn failing_twins_collapse_into_one_group() {
    let mut graph = SceneGraph::with_page("page");
    let root = graph.root();
    let frame = add_frame(
        &mut graph,
        root,
        "frame",
        Color::WHITE,
        Rect::new(0.0, 0.0, 800.0, 600.0),
    );
    let pale = Color::from_hex("#CCCCCC").unwrap();
    let _ = add_text(&mut graph, frame, "first", pale, 12.0, "Regular");
    let _ = add_text(&mut graph, frame, "second", pale, 12.0, "Regular");

    let session = Session::for_document(graph, Color::WHITE);
    let report = session.scan();

    assert_eq!(report.issues.len(), 1);
    let group = &report.issues[0];
    assert!(!group.pass_aa);
    assert_eq!(group.node_ids, ["first", "second"]);
}

#[test]
fn text_over_overlapping_card_uses_the_card_background() {
    let mut graph = SceneGraph::with_page("page");
    let frame = graph.alloc("frame", NodeKind::Frame);
    if let Some(node) = graph.get_mut(frame) {
        // Fill-less frame: the ancestor search yields nothing, forcing
        // the sibling search.
        node.bounds = Some(Rect::new(0.0, 0.0, 800.0, 600.0));
    }
    graph.append_child(graph.root(), frame);

    let card = graph.alloc("card", NodeKind::Rectangle);
    if let Some(node) = graph.get_mut(card) {
        node.fills = vec![Paint::solid(Color::BLACK)];
        node.bounds = Some(Rect::new(0.0, 0.0, 200.0, 100.0));
    }
    graph.append_child(frame, card);
    let _ = add_text(&mut graph, frame, "label", Color::WHITE, 16.0, "Regular");

    let session = Session::for_document(graph, Color::WHITE);
    let report = session.scan();

    // The card itself is a candidate (black on page white) and the label
    // resolves its background to the card below it.
    let label = report
        .all()
        .into_iter()
        .find(|record| record.node_ids.contains(&"label".to_string()))
        .unwrap();
    assert_eq!(label.background_hex, "#000000");
    assert!(label.pass_aa);
}

#[test]
fn scan_result_message_carries_truncation() {
    let mut graph = SceneGraph::with_page("page");
    let root = graph.root();
    for i in 0..2100 {
        let id = graph.alloc(format!("s{i}"), NodeKind::Rectangle);
        if let Some(node) = graph.get_mut(id) {
            node.fills = vec![Paint::solid(Color::BLACK)];
            node.bounds = Some(Rect::new(0.0, 0.0, 10.0, 10.0));
        }
        graph.append_child(root, id);
    }

    let mut session = Session::for_document(graph, Color::WHITE);
    match session.handle(UiMessage::Scan) {
        Some(EngineMessage::ScanResult {
            all, truncated, ..
        }) => {
            assert!(truncated, "2100 candidates must exceed the cap");
            // All 2000 collected candidates share one signature group.
            let total: usize = all.iter().map(|record| record.node_ids.len()).sum();
            assert_eq!(total, 2000);
        }
        other => panic!("expected scan-result, got {other:?}"),
    }
}

#[test]
fn deep_unfilled_chain_falls_back_to_page_background() {
    let mut graph = SceneGraph::with_page("page");
    let root = graph.root();
    // Eleven fill-less groups between the text and the filled frame.
    let filled = add_frame(
        &mut graph,
        root,
        "filled",
        Color::BLACK,
        Rect::new(0.0, 0.0, 800.0, 600.0),
    );
    let mut parent = filled;
    for i in 0..11 {
        let id = graph.alloc(format!("g{i}"), NodeKind::Group);
        if let Some(node) = graph.get_mut(id) {
            node.bounds = Some(Rect::new(0.0, 0.0, 800.0, 600.0));
        }
        graph.append_child(parent, id);
        parent = id;
    }
    let _ = add_text(&mut graph, parent, "deep", Color::BLACK, 16.0, "Regular");

    let session = Session::for_document(graph, Color::WHITE);
    let report = session.scan();

    let deep = report
        .all()
        .into_iter()
        .find(|record| record.node_ids.contains(&"deep".to_string()))
        .unwrap();
    // The filled ancestor is 12 hops up, beyond the cap, so the page
    // background (white) applies, not black.
    assert_eq!(deep.background_hex, "#FFFFFF");
}
