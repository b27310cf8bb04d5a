//! Message contract and session driver.
//!
//! The engine talks to a presentation layer through a small set of
//! serde-tagged messages. No exceptions cross this boundary: every
//! failure is data (empty lists, truncation flags) or a terminal
//! notification string.
//!
//! | Direction | Message | Payload |
//! |---|---|---|
//! | UI→Engine | `scan` | — |
//! | Engine→UI | `scan-result` | issues, passed, all, truncated |
//! | UI→Engine | `apply-fix` | issue, newFgHex, newBgHex |
//! | Engine→UI | `fix-applied` | — |
//! | Engine→UI | `notify` | message |
//! | UI→Engine | `cancel` | — |

use serde::{Deserialize, Serialize};

use lorikeet_color::Color;
use lorikeet_scene::{NodeId, SceneGraph};

use crate::collector::collect;
use crate::fix::apply_fix;
use crate::issues::{AuditReport, ContrastIssue, build_report};

/// A message from the presentation layer to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    /// Run a scan over the current selection.
    Scan,
    /// Bulk-correct one issue group.
    #[serde(rename_all = "camelCase")]
    ApplyFix {
        /// The issue group whose members to repaint.
        issue: ContrastIssue,
        /// Replacement foreground hex, if any.
        new_fg_hex: Option<String>,
        /// Replacement background hex, if any.
        new_bg_hex: Option<String>,
    },
    /// End the session.
    Cancel,
}

/// A message from the engine to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EngineMessage {
    /// The grouped outcome of a scan.
    #[serde(rename_all = "camelCase")]
    ScanResult {
        /// Groups failing their AA threshold, first-seen order.
        issues: Vec<ContrastIssue>,
        /// Groups meeting their AA threshold, first-seen order.
        passed: Vec<ContrastIssue>,
        /// issues ++ passed, for views that want one list.
        all: Vec<ContrastIssue>,
        /// Results may be incomplete (traversal caps hit).
        truncated: bool,
    },
    /// The bulk fix finished (every per-node operation completed or was
    /// skipped).
    FixApplied,
    /// A terminal user-facing notification.
    Notify {
        /// Human-readable notification text.
        message: String,
    },
}

/// One audit session over a document snapshot.
///
/// Owns the scene graph, the selection, and the page-background
/// configuration point. A new scan replaces the previous issue set
/// wholesale; stale issue records from an earlier scan are only ever
/// consulted through their host ids, which simply miss if the document
/// changed underneath.
#[derive(Debug)]
pub struct Session {
    graph: SceneGraph,
    selection: Vec<NodeId>,
    page_background: Color,
    closed: bool,
}

impl Session {
    /// Create a session scanning the given selection of root nodes.
    #[must_use]
    pub fn new(graph: SceneGraph, selection: Vec<NodeId>, page_background: Color) -> Self {
        Self {
            graph,
            selection,
            page_background,
            closed: false,
        }
    }

    /// Create a session scanning the whole document (the page root is
    /// the single selected root).
    #[must_use]
    pub fn for_document(graph: SceneGraph, page_background: Color) -> Self {
        let root = graph.root();
        Self::new(graph, vec![root], page_background)
    }

    /// Run one synchronous scan over the current snapshot.
    #[must_use]
    pub fn scan(&self) -> AuditReport {
        let collection = collect(&self.graph, &self.selection, self.page_background);
        build_report(&self.graph, &collection)
    }

    /// Handle one message from the presentation layer.
    ///
    /// Returns `None` only for `cancel`, which ends the session; any
    /// message after that produces a `notify`.
    pub fn handle(&mut self, message: UiMessage) -> Option<EngineMessage> {
        if self.closed {
            return Some(EngineMessage::Notify {
                message: "session is closed".to_string(),
            });
        }

        match message {
            UiMessage::Scan => {
                let report = self.scan();
                let all = report.all();
                Some(EngineMessage::ScanResult {
                    issues: report.issues,
                    passed: report.passed,
                    all,
                    truncated: report.truncated,
                })
            }
            UiMessage::ApplyFix {
                issue,
                new_fg_hex,
                new_bg_hex,
            } => {
                let _summary = apply_fix(
                    &mut self.graph,
                    &issue,
                    new_fg_hex.as_deref(),
                    new_bg_hex.as_deref(),
                );
                Some(EngineMessage::FixApplied)
            }
            UiMessage::Cancel => {
                self.closed = true;
                None
            }
        }
    }

    /// Whether the session has been cancelled.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Read access to the underlying snapshot.
    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Take the (possibly repainted) snapshot back out of the session.
    #[must_use]
    pub fn into_graph(self) -> SceneGraph {
        self.graph
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
