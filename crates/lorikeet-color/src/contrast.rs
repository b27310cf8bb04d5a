//! Relative luminance and contrast ratio per WCAG 2.1.
//!
//! [WCAG 2.1 § Relative luminance](https://www.w3.org/TR/WCAG21/#dfn-relative-luminance)
//! [WCAG 2.1 § Contrast ratio](https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio)
//!
//! Contrast must be measured in sRGB relative-luminance space (the WCAG
//! definition); the scene model's colors are sRGB-encoded, so each channel
//! is linearized before the weighted sum.

use crate::color::Color;

/// Linearize one sRGB-encoded channel value.
///
/// [WCAG 2.1 § Relative luminance](https://www.w3.org/TR/WCAG21/#dfn-relative-luminance)
///
/// "if R sRGB <= 0.04045 then R = R sRGB /12.92 else
///  R = ((R sRGB +0.055)/1.055) ^ 2.4"
///
/// Pure function, no error conditions.
#[must_use]
pub fn linearize(channel: f64) -> f64 {
    if channel <= 0.04045 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// [WCAG 2.1 § Relative luminance](https://www.w3.org/TR/WCAG21/#dfn-relative-luminance)
///
/// "the relative brightness of any point in a colorspace, normalized to 0
/// for darkest black and 1 for lightest white"
///
/// L = 0.2126 * R + 0.7152 * G + 0.0722 * B over linearized channels.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    0.2126f64.mul_add(
        linearize(color.r),
        0.7152f64.mul_add(linearize(color.g), 0.0722 * linearize(color.b)),
    )
}

/// Compute the WCAG 2.1 contrast ratio between two relative luminances.
///
/// [WCAG 2.1 § Contrast ratio](https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio)
///
/// "(L1 + 0.05) / (L2 + 0.05), where L1 is the relative luminance of the
/// lighter of the colors, and L2 is the relative luminance of the darker
/// of the colors"
///
/// Symmetric in its two arguments by construction; result in [1, 21].
#[must_use]
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
