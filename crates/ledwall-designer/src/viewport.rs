//! Client-to-drawing coordinate transformation.
//!
//! Pointer events arrive in client pixels (the host window's space); boxes
//! live in drawing space (the SVG `viewBox`). The host injects the mapping as
//! a [`CoordinateTransform`]. [`ViewBoxTransform`] is the standard SVG mapping
//! for an element rendered with `preserveAspectRatio="xMidYMid meet"`.

use std::fmt;

use crate::model::{Point, Rect, Size};

/// Maps client pixel coordinates into drawing space.
pub trait CoordinateTransform {
    fn to_drawing(&self, client: Point) -> Point;
}

impl<F> CoordinateTransform for F
where
    F: Fn(Point) -> Point,
{
    fn to_drawing(&self, client: Point) -> Point {
        self(client)
    }
}

/// Mapping between an on-screen element and its `viewBox`.
///
/// The view box is scaled uniformly to fit the element and centred on the
/// unconstrained axis:
///
/// ```text
/// scale    = min(element_w / view_w, element_h / view_h)
/// client_x = element_x + (element_w - view_w * scale) / 2 + (x - view_x) * scale
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBoxTransform {
    element: Rect,
    view_box: Rect,
}

impl ViewBoxTransform {
    pub fn new(element: Rect, view_box: Rect) -> Self {
        Self { element, view_box }
    }

    /// Transform for a view box at the origin of `canvas` size, drawn at
    /// `element` on screen.
    pub fn for_canvas(element: Rect, canvas: Size) -> Self {
        Self::new(element, Rect::new(0.0, 0.0, canvas.width, canvas.height))
    }

    pub fn element(&self) -> Rect {
        self.element
    }

    pub fn view_box(&self) -> Rect {
        self.view_box
    }

    /// Updates the element's client rectangle (window resize or scroll).
    pub fn set_element(&mut self, element: Rect) {
        self.element = element;
    }

    /// Client pixels per drawing unit. Falls back to 1.0 for an empty view box
    /// or element.
    pub fn scale(&self) -> f64 {
        let sx = self.element.width / self.view_box.width;
        let sy = self.element.height / self.view_box.height;
        let scale = sx.min(sy);
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        }
    }

    fn offset(&self, scale: f64) -> Point {
        Point::new(
            self.element.x + (self.element.width - self.view_box.width * scale) / 2.0,
            self.element.y + (self.element.height - self.view_box.height * scale) / 2.0,
        )
    }

    pub fn client_to_drawing(&self, client: Point) -> Point {
        let scale = self.scale();
        let offset = self.offset(scale);
        Point::new(
            (client.x - offset.x) / scale + self.view_box.x,
            (client.y - offset.y) / scale + self.view_box.y,
        )
    }

    pub fn drawing_to_client(&self, drawing: Point) -> Point {
        let scale = self.scale();
        let offset = self.offset(scale);
        Point::new(
            (drawing.x - self.view_box.x) * scale + offset.x,
            (drawing.y - self.view_box.y) * scale + offset.y,
        )
    }
}

impl CoordinateTransform for ViewBoxTransform {
    fn to_drawing(&self, client: Point) -> Point {
        self.client_to_drawing(client)
    }
}

impl fmt::Display for ViewBoxTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale: {:.3}x | Element: ({:.1}, {:.1})",
            self.scale(),
            self.element.x,
            self.element.y
        )
    }
}

impl Default for ViewBoxTransform {
    fn default() -> Self {
        let canvas = Rect::new(0.0, 0.0, 800.0, 800.0);
        Self::new(canvas, canvas)
    }
}
