//! Color value type and hex notation.
//!
//! Colors in the audited scene model are plain sRGB-encoded channel triples
//! in the unit interval, matching what design hosts hand out for solid
//! paints. The `#RRGGBB` hex string is a derived, lossy (8-bit-per-channel)
//! representation used only for display, grouping keys, and fix payloads.

use serde::{Deserialize, Serialize};

/// An sRGB color with channels in [0, 1].
///
/// No alpha: opacity and visibility are separate boolean attributes on
/// nodes and paints in the scene model, never blended into the color.
/// Colors are immutable values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel, sRGB-encoded, 0.0-1.0
    pub r: f64,
    /// Green channel, sRGB-encoded, 0.0-1.0
    pub g: f64,
    /// Blue channel, sRGB-encoded, 0.0-1.0
    pub b: f64,
}

impl Color {
    /// Black (#000000)
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    /// White (#FFFFFF)
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Create a color from sRGB channel values in [0, 1].
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string.
    ///
    /// Accepts exactly 6 hex digits, optionally prefixed with `#`. Any
    /// other shape returns `None` rather than an error: an unparseable
    /// hex is "no color" and the affected element is skipped upstream.
    ///
    /// 3-digit shorthand, alpha channels, and named colors are
    /// unsupported by design.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // Byte length is only meaningful for ASCII input; anything else
        // can't be hex digits anyway.
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        })
    }

    /// Convert to `#RRGGBB` hex notation (uppercase).
    ///
    /// Each channel is rounded to the nearest of 256 levels, so the
    /// conversion is lossy: two linear-distinct colors within 1/255 per
    /// channel may produce the same hex string. Grouping relies on this.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}",
            quantize(self.r),
            quantize(self.g),
            quantize(self.b)
        )
    }
}

/// Round a unit-interval channel to the nearest 8-bit level.
fn quantize(channel: f64) -> u8 {
    let clamped = channel.clamp(0.0, 1.0);
    // Round-half-up over 256 levels; clamp guards the 255.0 * 1.0 edge.
    (clamped * 255.0).round() as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
