//! Background resolution and WCAG contrast classification for the Lorikeet
//! auditor.
//!
//! # Scope
//!
//! This crate implements the audit engine proper:
//!
//! - **Category Classifier** ([WCAG 2.1 § 1.4.3](https://www.w3.org/TR/WCAG21/#contrast-minimum),
//!   [§ 1.4.11](https://www.w3.org/TR/WCAG21/#non-text-contrast))
//!   - normal text / large text / non-text ("ui-component") categories
//!   - required AA and (where defined) AAA thresholds
//!
//! - **Background Resolver**
//!   - the scene model has no explicit "background" attribute; the
//!     effective background is found by a deterministic, bounded
//!     ancestor-then-sibling search
//!   - identity variant (which node supplies the background) and color
//!     variant, the latter derived from the former so the two always
//!     agree on the winner
//!
//! - **Traversal Collector**
//!   - depth-first walk over the selected subtrees yielding audit
//!     candidates, under explicit visit/candidate caps
//!
//! - **Grouping & Issue Builder**
//!   - pass/fail classification and aggregation of candidates sharing a
//!     (foreground, background, isText, isLargeText) signature
//!
//! - **Fix Application**
//!   - best-effort bulk repaint of a group's foregrounds and/or
//!     background providers
//!
//! - **Session & Messages**
//!   - the serde message contract between a presentation layer and the
//!     engine, and a session driver owning the document snapshot
//!
//! # Not Implemented
//!
//! - Rendering, UI layout, or any selection/hover highlighting
//! - The host's document-mutation transaction model (fixes mutate the
//!   in-memory snapshot; persistence is the caller's concern)

/// WCAG category classification and thresholds.
pub mod category;
/// Depth-first candidate collection under traversal caps.
pub mod collector;
/// Best-effort bulk color correction.
pub mod fix;
/// Pass/fail classification and signature grouping.
pub mod issues;
/// Effective-background resolution.
pub mod resolver;
/// Message contract and session driver.
pub mod session;

pub use category::{Category, ElementType, classify, classify_text};
pub use collector::{Candidate, Collection, MAX_CANDIDATES, MAX_VISITS, collect};
pub use fix::{FixSummary, apply_fix};
pub use issues::{AuditReport, ContrastIssue, build_report};
pub use resolver::{
    MAX_ANCESTOR_HOPS, MAX_SIBLING_SCAN, resolve_background, resolve_background_source,
};
pub use session::{EngineMessage, Session, UiMessage};
