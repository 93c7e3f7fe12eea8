//! Layout engine: physical dimensions to drawing-space geometry.
//!
//! One engine serves both canvas variants. The [`ScalePolicy`] decides how
//! many drawing units an inch is worth:
//!
//! ```text
//! ScreenFit     scale = min(cap, max_w / max(w, 1), max_h / max(h, 1))
//! WallRelative  scale = min(cap, max_wall_w / max(wall_w, 1), max_wall_h / max(wall_h, 1))
//! ```
//!
//! Everything else (screen, niche, wood backing, side view) is placed from
//! that scale relative to a floor line that never moves.

use ledwall_core::units::meters_to_inches;
use serde::{Deserialize, Serialize};

use crate::dimensions::{DerivedDimensions, LayoutConfig};
use crate::model::{Point, Rect, Size};

/// Default floor-to-centreline distance for the screen-fit canvas, inches.
pub const DEFAULT_FLOOR_DISTANCE: f64 = 50.0;

/// Fixed canvas constants of the drawing space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConstants {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Upper bound on drawing units per inch.
    pub max_pixels_per_inch: f64,
    /// Lower bound on drawing units per inch.
    pub min_scale: f64,
    pub max_pixel_width: f64,
    pub max_pixel_height: f64,
    pub max_wall_pixel_width: f64,
    pub max_wall_pixel_height: f64,
    /// Smallest drawn screen extent per axis.
    pub min_pixel_size: f64,
    pub main_view_center_x: f64,
    pub floor_line_y: f64,
    /// Left edge of the side-view column.
    pub side_view_x: f64,
    pub min_depth_px: f64,
    pub max_depth_px: f64,
    pub wood_backing_inset: f64,
    pub wood_backing_inset_edge_to_edge: f64,
}

impl Default for CanvasConstants {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 800.0,
            max_pixels_per_inch: 10.0,
            min_scale: 0.01,
            max_pixel_width: 420.0,
            max_pixel_height: 360.0,
            max_wall_pixel_width: 520.0,
            max_wall_pixel_height: 600.0,
            min_pixel_size: 20.0,
            main_view_center_x: 300.0,
            floor_line_y: 720.0,
            side_view_x: 640.0,
            min_depth_px: 12.0,
            max_depth_px: 120.0,
            wood_backing_inset: 8.0,
            wood_backing_inset_edge_to_edge: 2.0,
        }
    }
}

/// How physical inches map to drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalePolicy {
    /// Fit the screen into a fixed pixel box.
    #[default]
    ScreenFit,
    /// Fit the wall (from `LayoutConfig::wall_width`/`wall_height`) and draw
    /// the screen at the wall's scale.
    WallRelative,
}

impl ScalePolicy {
    /// Floor distance used when the config leaves it unset.
    pub fn default_floor_distance(&self, config: &LayoutConfig) -> f64 {
        match self {
            Self::ScreenFit => DEFAULT_FLOOR_DISTANCE,
            Self::WallRelative => wall_inches(config.wall_height) / 2.0,
        }
    }
}

impl std::fmt::Display for ScalePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScreenFit => write!(f, "screen-fit"),
            Self::WallRelative => write!(f, "wall-relative"),
        }
    }
}

fn wall_inches(meters: f64) -> f64 {
    meters_to_inches(meters).max(1.0)
}

/// Drawing-space geometry of one diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelGeometry {
    /// Drawing units per inch.
    pub scale: f64,
    pub canvas: Size,
    pub screen: Rect,
    /// Present only when the niche is shown.
    pub niche: Option<Rect>,
    pub wood_backing: Rect,
    pub side_view: Rect,
    /// Present only under [`ScalePolicy::WallRelative`].
    pub wall: Option<Rect>,
    pub floor_line_y: f64,
    pub center: Point,
    /// Floor distance actually applied, inches.
    pub floor_distance: f64,
}

impl PixelGeometry {
    /// The draggable region: always the screen rectangle.
    pub fn boundary(&self) -> Rect {
        self.screen
    }

    /// Converts a drawing-space length back to inches.
    pub fn to_inches(&self, drawing_units: f64) -> f64 {
        drawing_units / self.scale
    }
}

/// Stateless mapping from derived dimensions to [`PixelGeometry`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutEngine {
    constants: CanvasConstants,
}

impl LayoutEngine {
    pub fn new(constants: CanvasConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &CanvasConstants {
        &self.constants
    }

    /// Drawing units per inch under `policy`.
    pub fn scale(
        &self,
        dims: &DerivedDimensions,
        config: &LayoutConfig,
        policy: ScalePolicy,
    ) -> f64 {
        let c = &self.constants;
        let fitted = match policy {
            ScalePolicy::ScreenFit => (c.max_pixel_width / dims.oriented_width.max(1.0))
                .min(c.max_pixel_height / dims.oriented_height.max(1.0)),
            ScalePolicy::WallRelative => (c.max_wall_pixel_width
                / wall_inches(config.wall_width))
            .min(c.max_wall_pixel_height / wall_inches(config.wall_height)),
        };
        fitted.min(c.max_pixels_per_inch).max(c.min_scale)
    }

    /// Computes the full geometry. Identical inputs give identical output.
    pub fn compute(
        &self,
        config: &LayoutConfig,
        dims: &DerivedDimensions,
        policy: ScalePolicy,
    ) -> PixelGeometry {
        let c = &self.constants;
        let scale = self.scale(dims, config, policy);

        let floor_distance = config
            .floor_distance
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or_else(|| policy.default_floor_distance(config));

        let screen_size = Size::new(
            (dims.oriented_width * scale).max(c.min_pixel_size),
            (dims.oriented_height * scale).max(c.min_pixel_size),
        );
        let center = Point::new(c.main_view_center_x, c.floor_line_y - floor_distance * scale);
        let screen = Rect::centered(center, screen_size);

        let niche = config.is_niche.then(|| {
            screen.expand(
                dims.niche_margin_width * scale,
                dims.niche_margin_height * scale,
            )
        });

        let inset = if config.is_edge_to_edge {
            c.wood_backing_inset_edge_to_edge
        } else {
            c.wood_backing_inset
        };
        let wood_backing = screen.inset(inset);

        let depth_px = (dims.side_view_depth(config.is_niche) * scale)
            .min(c.max_depth_px)
            .max(c.min_depth_px);
        let side_view = Rect::new(c.side_view_x, screen.y, depth_px, screen.height);

        let wall = match policy {
            ScalePolicy::ScreenFit => None,
            ScalePolicy::WallRelative => {
                let width = wall_inches(config.wall_width) * scale;
                let height = wall_inches(config.wall_height) * scale;
                Some(Rect::new(
                    c.main_view_center_x - width / 2.0,
                    c.floor_line_y - height,
                    width,
                    height,
                ))
            }
        };

        PixelGeometry {
            scale,
            canvas: Size::new(c.canvas_width, c.canvas_height),
            screen,
            niche,
            wood_backing,
            side_view,
            wall,
            floor_line_y: c.floor_line_y,
            center,
            floor_distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::derive;
    use ledwall_core::PhysicalSpec;

    fn config(width: f64, height: f64, depth: f64) -> LayoutConfig {
        LayoutConfig {
            screen: PhysicalSpec::new("test", width, height, depth),
            ..LayoutConfig::default()
        }
    }

    fn layout(cfg: &LayoutConfig, policy: ScalePolicy) -> PixelGeometry {
        LayoutEngine::default().compute(cfg, &derive(cfg), policy)
    }

    #[test]
    fn test_scale_takes_more_restrictive_ceiling() {
        let geo = layout(&config(54.0, 30.0, 3.0), ScalePolicy::ScreenFit);
        assert!((geo.scale - 420.0 / 54.0).abs() < 1e-12);
        assert!((geo.screen.width - 420.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_is_capped() {
        let geo = layout(&config(10.0, 5.0, 1.0), ScalePolicy::ScreenFit);
        assert_eq!(geo.scale, 10.0);
        assert_eq!(geo.screen.width, 100.0);
        assert_eq!(geo.screen.height, 50.0);
    }

    #[test]
    fn test_tiny_screen_keeps_minimum_size() {
        let geo = layout(&config(0.5, 0.0, 0.0), ScalePolicy::ScreenFit);
        assert_eq!(geo.screen.width, 20.0);
        assert_eq!(geo.screen.height, 20.0);
    }

    #[test]
    fn test_screen_sits_on_floor_distance() {
        let mut cfg = config(10.0, 5.0, 1.0);
        cfg.floor_distance = Some(30.0);
        let geo = layout(&cfg, ScalePolicy::ScreenFit);
        assert_eq!(geo.floor_line_y, 720.0);
        assert_eq!(geo.center, Point::new(300.0, 420.0));
        assert_eq!(geo.screen.center(), geo.center);

        cfg.floor_distance = Some(40.0);
        let moved = layout(&cfg, ScalePolicy::ScreenFit);
        assert_eq!(moved.floor_line_y, geo.floor_line_y);
        assert_eq!(moved.center.y, 320.0);
    }

    #[test]
    fn test_unset_floor_distance_uses_policy_default() {
        let mut cfg = config(10.0, 5.0, 1.0);
        cfg.floor_distance = Some(-4.0);
        let geo = layout(&cfg, ScalePolicy::ScreenFit);
        assert_eq!(geo.floor_distance, DEFAULT_FLOOR_DISTANCE);
    }

    #[test]
    fn test_niche_expands_by_scaled_margins() {
        let geo = layout(&config(10.0, 5.0, 1.0), ScalePolicy::ScreenFit);
        let niche = geo.niche.unwrap();
        assert_eq!(niche.width, geo.screen.width + 2.0 * 15.0);
        assert_eq!(niche.height, geo.screen.height + 2.0 * 15.0);
        assert_eq!(niche.center(), geo.screen.center());

        let mut cfg = config(10.0, 5.0, 1.0);
        cfg.is_niche = false;
        assert!(layout(&cfg, ScalePolicy::ScreenFit).niche.is_none());
    }

    #[test]
    fn test_side_view_depth_is_clamped() {
        let shallow = layout(&config(10.0, 5.0, 0.1), ScalePolicy::ScreenFit);
        assert_eq!(shallow.side_view.width, 12.0);

        let deep = layout(&config(10.0, 5.0, 50.0), ScalePolicy::ScreenFit);
        assert_eq!(deep.side_view.width, 120.0);
        assert_eq!(deep.side_view.x, 640.0);
        assert_eq!(deep.side_view.y, deep.screen.y);
    }

    #[test]
    fn test_wood_backing_inset_depends_on_edge_to_edge() {
        let mut cfg = config(10.0, 5.0, 1.0);
        let geo = layout(&cfg, ScalePolicy::ScreenFit);
        assert_eq!(geo.wood_backing, geo.screen.inset(8.0));

        cfg.is_edge_to_edge = true;
        let geo = layout(&cfg, ScalePolicy::ScreenFit);
        assert_eq!(geo.wood_backing, geo.screen.inset(2.0));
    }

    #[test]
    fn test_wall_relative_policy() {
        let mut cfg = config(54.0, 30.0, 3.0);
        cfg.wall_width = 5.08; // 200 in
        cfg.wall_height = 2.54; // 100 in
        let geo = layout(&cfg, ScalePolicy::WallRelative);

        assert!((geo.scale - 2.6).abs() < 1e-9);
        let wall = geo.wall.unwrap();
        assert!((wall.bottom() - 720.0).abs() < 1e-9);
        assert!((wall.width - 520.0).abs() < 1e-9);
        // Centred on the wall by default
        assert!((geo.floor_distance - 50.0).abs() < 1e-9);
        assert!(layout(&cfg, ScalePolicy::ScreenFit).wall.is_none());
    }

    #[test]
    fn test_wall_relative_without_wall_size_is_capped() {
        let geo = layout(&config(54.0, 30.0, 3.0), ScalePolicy::WallRelative);
        assert_eq!(geo.scale, 10.0);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let cfg = config(72.0, 41.0, 2.3);
        let engine = LayoutEngine::default();
        let dims = derive(&cfg);
        let a = engine.compute(&cfg, &dims, ScalePolicy::ScreenFit);
        let b = engine.compute(&cfg, &dims, ScalePolicy::ScreenFit);
        assert_eq!(a, b);
    }
}
