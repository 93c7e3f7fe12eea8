//! Boundary model: the draggable region and clamping into it.
//!
//! The boundary is always the current screen rectangle. Items are clamped,
//! never rejected: each origin coordinate lands in `[min, max - item]`, and an
//! item larger than the boundary on some axis is pinned to the boundary's
//! origin on that axis.

use crate::model::{Point, Rect, Size};

/// Clamps one coordinate so an item of `extent` starting at `value` stays
/// inside `[start, start + span]`.
pub fn clamp_axis(value: f64, extent: f64, start: f64, span: f64) -> f64 {
    let max = start + span - extent;
    // Degenerate (item larger than the span) or NaN bounds.
    if max.is_nan() || max < start || value.is_nan() {
        return start;
    }
    value.max(start).min(max)
}

/// Clamps the origin of an item of `item_size` into `boundary`.
pub fn clamp_point(point: Point, item_size: Size, boundary: &Rect) -> Point {
    Point::new(
        clamp_axis(point.x, item_size.width, boundary.x, boundary.width),
        clamp_axis(point.y, item_size.height, boundary.y, boundary.height),
    )
}

/// Clamps the origin of `rect` into `boundary`; the size is kept.
pub fn clamp_rect(rect: Rect, boundary: &Rect) -> Rect {
    let origin = clamp_point(rect.origin(), rect.size(), boundary);
    Rect::new(origin.x, origin.y, rect.width, rect.height)
}

/// Holder of the current boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundaryModel {
    boundary: Rect,
}

impl BoundaryModel {
    pub fn new(boundary: Rect) -> Self {
        Self { boundary }
    }

    pub fn boundary(&self) -> Rect {
        self.boundary
    }

    /// Replaces the boundary. Returns whether it changed.
    ///
    /// Owners of clamped items re-clamp after this; see
    /// [`ReceptacleBoxStore::set_boundary`](crate::receptacle_boxes::ReceptacleBoxStore::set_boundary).
    pub fn set_boundary(&mut self, boundary: Rect) -> bool {
        let changed = self.boundary != boundary;
        self.boundary = boundary;
        changed
    }

    pub fn clamp_point(&self, point: Point, item_size: Size) -> Point {
        clamp_point(point, item_size, &self.boundary)
    }

    pub fn clamp_rect(&self, rect: Rect) -> Rect {
        clamp_rect(rect, &self.boundary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_is_unchanged() {
        let boundary = Rect::new(0.0, 0.0, 500.0, 300.0);
        let p = clamp_point(Point::new(100.0, 100.0), Size::new(60.0, 60.0), &boundary);
        assert_eq!(p, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_clamp_to_far_edges() {
        let boundary = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r = clamp_rect(Rect::new(400.0, 250.0, 60.0, 60.0), &boundary);
        assert_eq!(r, Rect::new(40.0, 40.0, 60.0, 60.0));
    }

    #[test]
    fn test_clamp_to_near_edges() {
        let boundary = Rect::new(50.0, 20.0, 100.0, 100.0);
        let p = clamp_point(Point::new(-10.0, 0.0), Size::new(10.0, 10.0), &boundary);
        assert_eq!(p, Point::new(50.0, 20.0));
    }

    #[test]
    fn test_degenerate_boundary_pins_to_origin() {
        let boundary = Rect::new(10.0, 10.0, 20.0, 200.0);
        let p = clamp_point(Point::new(100.0, 100.0), Size::new(60.0, 60.0), &boundary);
        assert_eq!(p, Point::new(10.0, 100.0));
    }

    #[test]
    fn test_nan_position_is_pinned() {
        let boundary = Rect::new(5.0, 5.0, 100.0, 100.0);
        let p = clamp_point(Point::new(f64::NAN, 50.0), Size::new(10.0, 10.0), &boundary);
        assert_eq!(p, Point::new(5.0, 50.0));
    }

    #[test]
    fn test_model_reports_changes() {
        let mut model = BoundaryModel::default();
        assert!(model.set_boundary(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(!model.set_boundary(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(
            model.clamp_point(Point::new(20.0, 20.0), Size::new(5.0, 5.0)),
            Point::new(5.0, 5.0)
        );
    }
}
