//! sRGB color values and WCAG 2.1 contrast math for the Lorikeet auditor.
//!
//! # Scope
//!
//! This crate implements:
//! - **Color values** - sRGB-encoded channel triples and the strict
//!   `#RRGGBB` hex notation used for display, grouping, and fix payloads
//! - **Relative luminance** ([WCAG 2.1 relative luminance](https://www.w3.org/TR/WCAG21/#dfn-relative-luminance))
//!   - sRGB channel linearization
//!   - perceptually-weighted channel sum
//! - **Contrast ratio** ([WCAG 2.1 contrast ratio](https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio))
//!
//! # Not Implemented
//!
//! - Alpha channels and compositing (node/paint visibility is a separate
//!   boolean in the scene model, never blended into color)
//! - 3-digit hex shorthand, 8-digit hex, named colors

/// Color value type and hex notation.
pub mod color;
/// Relative luminance and contrast ratio per [WCAG 2.1](https://www.w3.org/TR/WCAG21/).
pub mod contrast;

pub use color::Color;
pub use contrast::{contrast_ratio, linearize, relative_luminance};
