//! Pass/fail classification and signature grouping.
//!
//! Each collected candidate is scored against its category's thresholds
//! and folded into an aggregate record shared by every element with the
//! same (foreground, background, isText, isLargeText) signature. Colors
//! are quantized to 8-bit hex before keying, so two linear-color tuples
//! that round to the same hex collapse into one record. Grouping is
//! display-oriented.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use lorikeet_color::{contrast_ratio, relative_luminance};
use lorikeet_scene::SceneGraph;

use crate::category::ElementType;
use crate::collector::{Candidate, Collection};

/// A group of elements sharing one color-pair signature.
///
/// Derived, non-persisted: constructed fresh on every scan, never
/// mutated after grouping completes except by appending node ids during
/// aggregation, and discarded wholesale on the next scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastIssue {
    /// Effective foreground, 8-bit `#RRGGBB`.
    pub foreground_hex: String,
    /// Effective background, 8-bit `#RRGGBB`.
    pub background_hex: String,
    /// Computed contrast ratio, >= 1.0. Fixed by the group's first
    /// member: later members with a floating-point-distinct raw ratio do
    /// not re-average it.
    pub ratio: f64,
    /// Required AA threshold for the group's category.
    #[serde(rename = "requiredAA")]
    pub required_aa: f64,
    /// Required AAA threshold; `None` where WCAG defines no enhanced
    /// tier (non-text).
    #[serde(rename = "requiredAAA")]
    pub required_aaa: Option<f64>,
    /// Whether the ratio meets the AA threshold.
    #[serde(rename = "passAA")]
    pub pass_aa: bool,
    /// Whether the ratio meets the AAA threshold; `None` when there is
    /// no AAA tier.
    #[serde(rename = "passAAA")]
    pub pass_aaa: Option<bool>,
    /// The group's WCAG category.
    pub element_type: ElementType,
    /// Whether the group is text.
    pub is_text: bool,
    /// Whether the group is large text.
    pub is_large_text: bool,
    /// Host ids of every contributing element, in encounter order
    /// (order is irrelevant to the group's identity).
    pub node_ids: Vec<String>,
}

impl ContrastIssue {
    /// The deduplication key: exact literal concatenation of the
    /// quantized hex pair and the two text flags.
    #[must_use]
    pub fn group_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.foreground_hex, self.background_hex, self.is_text, self.is_large_text
        )
    }
}

/// The grouped outcome of one scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Groups failing their AA threshold.
    pub issues: Vec<ContrastIssue>,
    /// Groups meeting their AA threshold.
    pub passed: Vec<ContrastIssue>,
    /// True when traversal caps truncated the underlying collection.
    pub truncated: bool,
}

impl AuditReport {
    /// All groups, failing first, both in first-seen order.
    #[must_use]
    pub fn all(&self) -> Vec<ContrastIssue> {
        let mut all = self.issues.clone();
        all.extend(self.passed.iter().cloned());
        all
    }
}

/// Fold a collection of candidates into grouped issue/pass records.
#[must_use]
pub fn build_report(graph: &SceneGraph, collection: &Collection) -> AuditReport {
    // Insertion-order lists with a key → index side table per collection.
    let mut issues: Vec<ContrastIssue> = Vec::new();
    let mut passed: Vec<ContrastIssue> = Vec::new();
    let mut issue_index: HashMap<String, usize> = HashMap::new();
    let mut passed_index: HashMap<String, usize> = HashMap::new();

    for candidate in &collection.candidates {
        let Some(node) = graph.get(candidate.node) else {
            continue;
        };
        let record = score(candidate, node.id.clone());

        let (list, index) = if record.pass_aa {
            (&mut passed, &mut passed_index)
        } else {
            (&mut issues, &mut issue_index)
        };

        let key = record.group_key();
        if let Some(&slot) = index.get(&key) {
            // Existing group: only the membership grows; every other
            // field stays as the first occurrence set it.
            list[slot].node_ids.extend(record.node_ids);
        } else {
            let _ = index.insert(key, list.len());
            list.push(record);
        }
    }

    AuditReport {
        issues,
        passed,
        truncated: collection.truncated,
    }
}

/// Score one candidate into a single-member record.
fn score(candidate: &Candidate, host_id: String) -> ContrastIssue {
    let fg_luminance = relative_luminance(candidate.foreground);
    let bg_luminance = relative_luminance(candidate.background);
    let ratio = contrast_ratio(fg_luminance, bg_luminance);

    let category = candidate.category;
    let pass_aa = ratio >= category.required_aa;
    let pass_aaa = category.required_aaa.map(|threshold| ratio >= threshold);

    ContrastIssue {
        foreground_hex: candidate.foreground.to_hex(),
        background_hex: candidate.background.to_hex(),
        ratio,
        required_aa: category.required_aa,
        required_aaa: category.required_aaa,
        pass_aa,
        pass_aaa,
        element_type: category.element_type,
        is_text: category.is_text(),
        is_large_text: category.is_large_text(),
        node_ids: vec![host_id],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, classify_text};
    use lorikeet_color::Color;
    use lorikeet_scene::{NodeKind, TextAttributes};

    fn candidate_graph(n: usize) -> (SceneGraph, Vec<lorikeet_scene::NodeId>) {
        let mut graph = SceneGraph::with_page("page");
        let mut ids = Vec::new();
        for i in 0..n {
            let id = graph.alloc(format!("t{i}"), NodeKind::Text(TextAttributes::default()));
            graph.append_child(graph.root(), id);
            ids.push(id);
        }
        (graph, ids)
    }

    fn text_candidate(node: lorikeet_scene::NodeId, fg: Color, bg: Color) -> Candidate {
        Candidate {
            node,
            foreground: fg,
            background: bg,
            category: classify_text(Some(16.0), "Regular"),
        }
    }

    #[test]
    fn failing_and_passing_split() {
        let (graph, ids) = candidate_graph(2);
        let collection = Collection {
            candidates: vec![
                // Black on white: passes everything.
                text_candidate(ids[0], Color::BLACK, Color::WHITE),
                // White on white: fails everything.
                text_candidate(ids[1], Color::WHITE, Color::WHITE),
            ],
            truncated: false,
        };
        let report = build_report(&graph, &collection);
        assert_eq!(report.passed.len(), 1);
        assert_eq!(report.issues.len(), 1);

        let pass = &report.passed[0];
        assert!(pass.pass_aa);
        assert_eq!(pass.pass_aaa, Some(true));
        assert!((pass.ratio - 21.0).abs() < 0.01);

        let fail = &report.issues[0];
        assert!(!fail.pass_aa);
        assert_eq!(fail.pass_aaa, Some(false));
        assert!((fail.ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn identical_signatures_collapse_in_encounter_order() {
        let (graph, ids) = candidate_graph(3);
        let fg = Color::new(0.6, 0.6, 0.6);
        let collection = Collection {
            candidates: vec![
                text_candidate(ids[0], fg, Color::WHITE),
                text_candidate(ids[1], fg, Color::WHITE),
                text_candidate(ids[2], fg, Color::WHITE),
            ],
            truncated: false,
        };
        let report = build_report(&graph, &collection);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].node_ids, ["t0", "t1", "t2"]);
    }

    #[test]
    fn sub_quantization_distinct_colors_merge() {
        let (graph, ids) = candidate_graph(2);
        // Distinct in linear space, identical after 8-bit quantization.
        let a = Color::new(0.5000, 0.5, 0.5);
        let b = Color::new(0.5001, 0.5, 0.5);
        assert_eq!(a.to_hex(), b.to_hex());
        let collection = Collection {
            candidates: vec![
                text_candidate(ids[0], a, Color::WHITE),
                text_candidate(ids[1], b, Color::WHITE),
            ],
            truncated: false,
        };
        let report = build_report(&graph, &collection);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].node_ids.len(), 2);
    }

    #[test]
    fn first_seen_ratio_wins() {
        let (graph, ids) = candidate_graph(2);
        let a = Color::new(0.5000, 0.5, 0.5);
        let b = Color::new(0.5001, 0.5, 0.5);
        let collection = Collection {
            candidates: vec![
                text_candidate(ids[0], a, Color::WHITE),
                text_candidate(ids[1], b, Color::WHITE),
            ],
            truncated: false,
        };
        let report = build_report(&graph, &collection);
        let expected = contrast_ratio(relative_luminance(a), relative_luminance(Color::WHITE));
        assert!((report.issues[0].ratio - expected).abs() < 1e-15);
    }

    #[test]
    fn text_flags_separate_groups() {
        let (graph, ids) = candidate_graph(2);
        let fg = Color::new(0.6, 0.6, 0.6);
        // Same hex pair, different isText: the text candidate and a
        // ui-component candidate land in different groups.
        let text = text_candidate(ids[0], fg, Color::WHITE);
        let ui_candidate = Candidate {
            node: ids[1],
            foreground: fg,
            background: Color::WHITE,
            category: Category {
                required_aa: 3.0,
                required_aaa: None,
                element_type: ElementType::UiComponent,
            },
        };
        let collection = Collection {
            candidates: vec![text, ui_candidate],
            truncated: false,
        };
        let report = build_report(&graph, &collection);
        // Gray 0.6 on white: ratio ~2.85 fails 4.5 (text) and 3.0 (ui).
        assert_eq!(report.issues.len(), 2);
        assert_ne!(report.issues[0].group_key(), report.issues[1].group_key());
    }

    #[test]
    fn truncation_flag_carries_through() {
        let (graph, _) = candidate_graph(0);
        let collection = Collection {
            candidates: Vec::new(),
            truncated: true,
        };
        assert!(build_report(&graph, &collection).truncated);
    }
}
