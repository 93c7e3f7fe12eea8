use ledwall_core::PhysicalSpec;
use ledwall_designer::dimensions::{derive, LayoutConfig};
use ledwall_designer::layout::{CanvasConstants, LayoutEngine, ScalePolicy};

fn config(width: f64, height: f64, depth: f64) -> LayoutConfig {
    LayoutConfig {
        screen: PhysicalSpec::new("test", width, height, depth),
        ..LayoutConfig::default()
    }
}

#[test]
fn test_reference_screen_dimensions() {
    let mut cfg = config(54.0, 30.0, 3.0);
    cfg.media_player_depth = 2.0;
    cfg.mount_depth = 1.5;
    cfg.variant_depth = 0.3;

    let dims = derive(&cfg);
    assert!((dims.niche_depth_raw - 5.3).abs() < 1e-9);
    assert_eq!(dims.niche_depth, 5.25);
    assert_eq!(dims.niche_margin_width, 1.5);
    assert_eq!(dims.oriented_niche_width, 57.0);
}

#[test]
fn test_portrait_screen_is_taller_than_wide() {
    let mut cfg = config(54.0, 30.0, 3.0);
    cfg.is_horizontal = false;
    let geo = LayoutEngine::default().compute(&cfg, &derive(&cfg), ScalePolicy::ScreenFit);
    assert!(geo.screen.height > geo.screen.width);
    assert_eq!(geo.boundary(), geo.screen);
}

#[test]
fn test_custom_constants_move_floor_line() {
    let constants = CanvasConstants {
        floor_line_y: 600.0,
        ..CanvasConstants::default()
    };
    let cfg = config(54.0, 30.0, 3.0);
    let geo = LayoutEngine::new(constants).compute(&cfg, &derive(&cfg), ScalePolicy::ScreenFit);
    assert_eq!(geo.floor_line_y, 600.0);
    assert!((geo.center.y - (600.0 - 50.0 * geo.scale)).abs() < 1e-9);
}

#[test]
fn test_scale_never_drops_below_minimum() {
    let cfg = config(1.0e9, 1.0e9, 3.0);
    let geo = LayoutEngine::default().compute(&cfg, &derive(&cfg), ScalePolicy::ScreenFit);
    assert_eq!(geo.scale, CanvasConstants::default().min_scale);
}

#[test]
fn test_wall_policy_draws_screen_at_wall_scale() {
    let mut cfg = config(54.0, 30.0, 3.0);
    cfg.wall_width = 5.08;
    cfg.wall_height = 2.54;
    let engine = LayoutEngine::default();
    let dims = derive(&cfg);
    let wall = engine.compute(&cfg, &dims, ScalePolicy::WallRelative);
    let fit = engine.compute(&cfg, &dims, ScalePolicy::ScreenFit);
    assert!(wall.screen.width < fit.screen.width);
    assert!((wall.screen.width - 54.0 * wall.scale).abs() < 1e-9);
}
