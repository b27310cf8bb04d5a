//! WCAG category classification and thresholds.
//!
//! [WCAG 2.1 § 1.4.3 Contrast (Minimum)](https://www.w3.org/TR/WCAG21/#contrast-minimum)
//! [WCAG 2.1 § 1.4.6 Contrast (Enhanced)](https://www.w3.org/TR/WCAG21/#contrast-enhanced)
//! [WCAG 2.1 § 1.4.11 Non-text Contrast](https://www.w3.org/TR/WCAG21/#non-text-contrast)

use serde::{Deserialize, Serialize};

use lorikeet_scene::{Node, NodeKind};

/// [§ 1.4.3](https://www.w3.org/TR/WCAG21/#contrast-minimum)
///
/// "Large-scale text and images of large-scale text have a contrast ratio
/// of at least 3:1"
///
/// Size threshold above which text is large regardless of weight.
/// The host normalizes sizes to the same px-equivalent scale as these
/// thresholds before they reach the classifier.
const LARGE_TEXT_MIN_SIZE: f64 = 18.0;

/// [§ 1.4.3](https://www.w3.org/TR/WCAG21/#contrast-minimum)
///
/// "with at least the equivalent of 14 point bold text"
///
/// Size threshold above which heavy-weight text is large.
const LARGE_BOLD_MIN_SIZE: f64 = 14.0;

/// Style-name fragments that mark a heavy weight, matched
/// case-insensitively as substrings (so "Semibold" and "Extrabold Italic"
/// both qualify).
const HEAVY_WEIGHT_MARKERS: [&str; 4] = ["bold", "black", "heavy", "extrabold"];

/// The WCAG category of an audited element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ElementType {
    /// Text below the large-text thresholds.
    NormalText,
    /// Text meeting WCAG's relaxed-threshold size/weight criteria.
    LargeText,
    /// A non-text graphical element.
    ///
    /// [§ 1.4.11](https://www.w3.org/TR/WCAG21/#non-text-contrast)
    /// "Visual information required to identify user interface components
    /// and graphical objects"
    UiComponent,
}

/// An element's category together with its required contrast thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Category {
    /// Required AA contrast ratio.
    pub required_aa: f64,
    /// Required AAA contrast ratio; `None` for non-text elements, where
    /// WCAG defines no enhanced tier.
    pub required_aaa: Option<f64>,
    /// The category itself.
    pub element_type: ElementType,
}

impl Category {
    /// Whether the element is text (normal or large).
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.element_type != ElementType::UiComponent
    }

    /// Whether the element is large text.
    #[must_use]
    pub fn is_large_text(&self) -> bool {
        self.element_type == ElementType::LargeText
    }
}

/// Classify a candidate node.
///
/// Text nodes are classified by their size/style attributes; every other
/// candidate kind is a non-text graphical element.
#[must_use]
pub fn classify(node: &Node) -> Category {
    match &node.kind {
        NodeKind::Text(attrs) => classify_text(attrs.font_size, &attrs.font_style),
        NodeKind::Page
        | NodeKind::Frame
        | NodeKind::Group
        | NodeKind::Rectangle
        | NodeKind::Ellipse
        | NodeKind::Polygon
        | NodeKind::Star
        | NodeKind::Line
        | NodeKind::Vector
        | NodeKind::BooleanOperation => ui_component(),
    }
}

/// Classify a text element from its font size and style name.
///
/// Rule, evaluated in precedence order:
/// 1. size >= 18 → large text, regardless of weight
/// 2. size >= 14 AND heavy weight in the style name → large text
/// 3. otherwise → normal text
///
/// [§ 1.4.3](https://www.w3.org/TR/WCAG21/#contrast-minimum)
/// "Text... has a contrast ratio of at least 4.5:1" (AA), 7:1 for AAA
/// ([§ 1.4.6](https://www.w3.org/TR/WCAG21/#contrast-enhanced));
/// large-scale text relaxes these to 3:1 and 4.5:1.
///
/// An indeterminate font size (`None`, e.g. mixed across the text run)
/// classifies conservatively as NOT large, failing open to the stricter
/// normal-text thresholds.
#[must_use]
pub fn classify_text(font_size: Option<f64>, font_style: &str) -> Category {
    if is_large_text(font_size, font_style) {
        Category {
            required_aa: 3.0,
            required_aaa: Some(4.5),
            element_type: ElementType::LargeText,
        }
    } else {
        Category {
            required_aa: 4.5,
            required_aaa: Some(7.0),
            element_type: ElementType::NormalText,
        }
    }
}

/// [§ 1.4.11](https://www.w3.org/TR/WCAG21/#non-text-contrast)
///
/// "a contrast ratio of at least 3:1 against adjacent color(s)"
///
/// No enhanced (AAA) tier is defined for non-text elements.
fn ui_component() -> Category {
    Category {
        required_aa: 3.0,
        required_aaa: None,
        element_type: ElementType::UiComponent,
    }
}

fn is_large_text(font_size: Option<f64>, font_style: &str) -> bool {
    // Mixed/indeterminate size: not large.
    let Some(size) = font_size else { return false };

    if size >= LARGE_TEXT_MIN_SIZE {
        return true;
    }
    size >= LARGE_BOLD_MIN_SIZE && has_heavy_weight(font_style)
}

fn has_heavy_weight(font_style: &str) -> bool {
    let style = font_style.to_ascii_lowercase();
    HEAVY_WEIGHT_MARKERS
        .iter()
        .any(|marker| style.contains(marker))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_by_size_regardless_of_weight() {
        let cat = classify_text(Some(20.0), "Light Italic");
        assert_eq!(cat.element_type, ElementType::LargeText);
        assert!((cat.required_aa - 3.0).abs() < f64::EPSILON);
        assert_eq!(cat.required_aaa, Some(4.5));
    }

    #[test]
    fn exactly_eighteen_is_large() {
        let cat = classify_text(Some(18.0), "Regular");
        assert_eq!(cat.element_type, ElementType::LargeText);
    }

    #[test]
    fn fifteen_bold_is_large() {
        let cat = classify_text(Some(15.0), "Bold");
        assert_eq!(cat.element_type, ElementType::LargeText);
    }

    #[test]
    fn fifteen_regular_is_normal() {
        let cat = classify_text(Some(15.0), "Regular");
        assert_eq!(cat.element_type, ElementType::NormalText);
        assert!((cat.required_aa - 4.5).abs() < f64::EPSILON);
        assert_eq!(cat.required_aaa, Some(7.0));
    }

    #[test]
    fn weight_match_is_case_insensitive_substring() {
        assert_eq!(
            classify_text(Some(14.0), "EXTRABOLD").element_type,
            ElementType::LargeText
        );
        assert_eq!(
            classify_text(Some(14.0), "Heavy Condensed").element_type,
            ElementType::LargeText
        );
        // Substring match: "Semibold" contains "bold" and qualifies.
        assert_eq!(
            classify_text(Some(14.0), "Semibold").element_type,
            ElementType::LargeText
        );
    }

    #[test]
    fn below_fourteen_bold_is_normal() {
        let cat = classify_text(Some(13.9), "Bold");
        assert_eq!(cat.element_type, ElementType::NormalText);
    }

    #[test]
    fn indeterminate_size_is_conservatively_normal() {
        let cat = classify_text(None, "Bold");
        assert_eq!(cat.element_type, ElementType::NormalText);
    }

    #[test]
    fn element_type_names_are_kebab_case() {
        assert_eq!(ElementType::NormalText.to_string(), "normal-text");
        assert_eq!(ElementType::LargeText.to_string(), "large-text");
        assert_eq!(ElementType::UiComponent.to_string(), "ui-component");
    }
}
