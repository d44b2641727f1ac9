//! Unit-square to pixel projection
//!
//! Unit-square coordinates have their origin bottom-left with y pointing up;
//! pixel coordinates have their origin top-left with y pointing down. The
//! flip happens here and nowhere else.

use crate::layout::Nail;

/// A point in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps the unit square onto a centered square region of the canvas
///
/// The margin is a fraction of the smaller canvas side, so it is the same
/// number of pixels in x and y. Both axes share one scale, which keeps
/// circles round on non-square canvases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    offset_x: f64,
    offset_y: f64,
    scale: f64,
}

impl Projection {
    pub fn new(width: u32, height: u32, margin_fraction: f64) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        let side = w.min(h);
        let scale = (side - 2.0 * margin_fraction * side).max(0.0);
        Self {
            offset_x: (w - scale) / 2.0,
            offset_y: (h - scale) / 2.0,
            scale,
        }
    }

    /// Pixel length of one unit-square side
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn project(&self, nail: Nail) -> Point {
        Point::new(
            self.offset_x + nail.x * self.scale,
            self.offset_y + (1.0 - nail.y) * self.scale,
        )
    }

    pub fn project_xy(&self, x: f64, y: f64) -> Point {
        self.project(Nail::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_square_canvas_corners() {
        let p = Projection::new(800, 800, 0.05);
        assert_eq!(p.scale(), 720.0);
        assert_eq!(p.project_xy(0.0, 0.0), Point::new(40.0, 760.0));
        assert_eq!(p.project_xy(1.0, 1.0), Point::new(760.0, 40.0));
        assert_eq!(p.project_xy(0.5, 0.5), Point::new(400.0, 400.0));
    }

    #[test]
    fn test_vertical_flip_preserves_handedness() {
        let p = Projection::new(400, 400, 0.1);
        let right = p.project_xy(1.0, 0.5);
        let up = p.project_xy(0.5, 1.0);
        let center = p.project_xy(0.5, 0.5);
        assert!(right.x > center.x);
        assert!(up.y < center.y);
    }

    #[test]
    fn test_wide_canvas_is_centered_with_equal_margins() {
        let p = Projection::new(1000, 500, 0.1);
        assert_eq!(p.scale(), 400.0);
        let bottom_left = p.project_xy(0.0, 0.0);
        let top_right = p.project_xy(1.0, 1.0);
        assert_eq!(bottom_left, Point::new(300.0, 450.0));
        assert_eq!(top_right, Point::new(700.0, 50.0));
        assert_eq!(top_right.y, 500.0 - bottom_left.y);
    }

    #[test]
    fn test_zero_margin_fills_canvas() {
        let p = Projection::new(100, 100, 0.0);
        assert_eq!(p.project_xy(0.0, 1.0), Point::new(0.0, 0.0));
        assert_eq!(p.project_xy(1.0, 0.0), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_out_of_range_coordinates_project_outside() {
        let p = Projection::new(100, 100, 0.1);
        let outside = p.project_xy(1.2, -0.2);
        assert!(outside.x > 90.0);
        assert!(outside.y > 90.0);
    }
}
