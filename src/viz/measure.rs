//! Measurement service: bounding boxes of rendered elements.
//!
//! Layout never guesses the size of chrome it has drawn; it asks a
//! [`Measurer`]. The default [`HeuristicMeasurer`] estimates glyph advances,
//! tests plug in fixed extents.

use super::axis::Axis;
use super::scene::Group;
use super::text::{estimate_text_width_px, line_height_px};
use super::types::Extent;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.width(), self.height())
    }

    pub fn union(&self, other: &BBox) -> BBox {
        BBox::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> BBox {
        BBox::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }

    /// Box enclosing this box after rotation about the origin by `degrees`
    /// (SVG `rotate()`: positive is clockwise on screen).
    pub fn rotated(&self, degrees: f64) -> BBox {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let corners = [
            (self.x0, self.y0),
            (self.x1, self.y0),
            (self.x0, self.y1),
            (self.x1, self.y1),
        ];
        corners
            .iter()
            .map(|&(x, y)| {
                let rx = x * cos - y * sin;
                let ry = x * sin + y * cos;
                BBox::new(rx, ry, rx, ry)
            })
            .reduce(|a, b| a.union(&b))
            .unwrap_or(*self)
    }
}

pub trait Measurer {
    /// Advance width and line height of `text` at `font_px`.
    fn text_extent(&self, text: &str, font_px: f64) -> Extent;

    /// Fraction of the line height above the baseline.
    fn ascent_ratio(&self) -> f64 {
        0.8
    }

    /// Size of a rendered element (legend panel, axis group, ...).
    fn element_extent(&self, element: &Group) -> Extent {
        element.bbox(self).map(|b| b.extent()).unwrap_or_default()
    }

    /// Size an axis would occupy once rendered. The layout calls this for
    /// the provisional x-axis, which is never inserted into the surface.
    fn axis_extent(&self, axis: &Axis) -> Extent {
        self.element_extent(&axis.to_group())
    }
}

/// Estimates text from an average glyph advance (no font files needed).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMeasurer;

impl Measurer for HeuristicMeasurer {
    fn text_extent(&self, text: &str, font_px: f64) -> Extent {
        Extent::new(estimate_text_width_px(text, font_px), line_height_px(font_px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_by_quarter_turn_swaps_axes() {
        let b = BBox::new(0.0, 0.0, 20.0, 10.0).rotated(90.0);
        assert!((b.width() - 10.0).abs() < 1e-9);
        assert!((b.height() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_by_45_degrees_grows_box() {
        let b = BBox::new(-20.0, 0.0, 0.0, 10.0).rotated(-45.0);
        let expected = (20.0 + 10.0) * std::f64::consts::FRAC_1_SQRT_2;
        assert!((b.height() - expected).abs() < 1e-9);
        assert!((b.width() - expected).abs() < 1e-9);
    }

    #[test]
    fn heuristic_text_extent() {
        let e = HeuristicMeasurer.text_extent("1000", 10.0);
        assert_eq!(e, Extent::new(24.0, 12.0));
    }
}
