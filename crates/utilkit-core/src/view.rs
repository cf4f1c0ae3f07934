//! Screen-space hit testing.

use serde::{Deserialize, Serialize};

/// On-screen rectangle of a view, as reported by its location and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewBounds {
    /// Screen x of the left edge.
    pub left: i32,
    /// Screen y of the top edge.
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl ViewBounds {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether `(x, y)` lies inside the rectangle. All four edges are inclusive.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (x, y) = (x as f64, y as f64);
        let left = self.left as f64;
        let top = self.top as f64;
        x >= left && x <= left + self.width as f64 && y >= top && y <= top + self.height as f64
    }
}

/// Whether a touch at raw screen coordinates falls on the view.
pub fn is_touch_in_view(raw_x: f32, raw_y: f32, view: &ViewBounds) -> bool {
    view.contains(raw_x, raw_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside() {
        let view = ViewBounds::new(10, 20, 100, 50);
        assert!(is_touch_in_view(50.0, 40.0, &view));
    }

    #[test]
    fn test_edges_are_inclusive() {
        let view = ViewBounds::new(10, 20, 100, 50);
        assert!(view.contains(10.0, 20.0));
        assert!(view.contains(110.0, 70.0));
        assert!(view.contains(110.0, 20.0));
    }

    #[test]
    fn test_outside() {
        let view = ViewBounds::new(10, 20, 100, 50);
        assert!(!view.contains(9.9, 40.0));
        assert!(!view.contains(110.1, 40.0));
        assert!(!view.contains(50.0, 70.5));
        assert!(!view.contains(f32::NAN, 40.0));
    }

    #[test]
    fn test_negative_origin() {
        let view = ViewBounds::new(-50, -50, 20, 20);
        assert!(view.contains(-40.0, -35.0));
        assert!(!view.contains(0.0, 0.0));
    }

    #[test]
    fn test_zero_size_view_hits_only_its_corner() {
        let view = ViewBounds::new(5, 5, 0, 0);
        assert!(view.contains(5.0, 5.0));
        assert!(!view.contains(5.5, 5.0));
    }
}
