//! Fill paints attached to nodes.
//!
//! Only solid paints carry a color the audit can use. Gradients, images,
//! and anything the host invents later are opaque to contrast evaluation:
//! a node whose fills are all non-solid contributes no contrast data and
//! cannot supply a background.

use lorikeet_color::Color;

/// What a paint is made of.
///
/// Closed enum: unknown wire-level paint types collapse into [`PaintKind::Other`]
/// at the document boundary rather than leaking open-ended strings inward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintKind {
    /// A single opaque color.
    Solid(Color),
    /// Any gradient. The stops are irrelevant to the audit.
    Gradient,
    /// An image fill.
    Image,
    /// A paint type this model does not know about.
    Other,
}

/// One entry in a node's ordered fill list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Per-paint visibility flag. Invisible paints never supply color.
    pub visible: bool,
    /// The paint's content.
    pub kind: PaintKind,
}

impl Paint {
    /// A visible solid paint of the given color.
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self {
            visible: true,
            kind: PaintKind::Solid(color),
        }
    }

    /// Whether the paint is solid, visible or not.
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        matches!(self.kind, PaintKind::Solid(_))
    }

    /// The paint's color if it is solid, regardless of visibility.
    #[must_use]
    pub const fn solid_color(&self) -> Option<Color> {
        match self.kind {
            PaintKind::Solid(color) => Some(color),
            PaintKind::Gradient | PaintKind::Image | PaintKind::Other => None,
        }
    }

    /// The paint's color if it is both visible and solid.
    #[must_use]
    pub const fn visible_solid_color(&self) -> Option<Color> {
        if self.visible { self.solid_color() } else { None }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_paint_exposes_color() {
        let p = Paint::solid(Color::BLACK);
        assert_eq!(p.solid_color(), Some(Color::BLACK));
        assert_eq!(p.visible_solid_color(), Some(Color::BLACK));
    }

    #[test]
    fn invisible_solid_has_no_visible_color() {
        let p = Paint {
            visible: false,
            kind: PaintKind::Solid(Color::WHITE),
        };
        assert_eq!(p.solid_color(), Some(Color::WHITE));
        assert_eq!(p.visible_solid_color(), None);
    }

    #[test]
    fn non_solid_paints_have_no_color() {
        for kind in [PaintKind::Gradient, PaintKind::Image, PaintKind::Other] {
            let p = Paint { visible: true, kind };
            assert_eq!(p.solid_color(), None);
        }
    }
}
