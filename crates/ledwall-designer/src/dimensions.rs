//! Physical dimension derivation.
//!
//! Turns the diagram's independent variables ([`LayoutConfig`]) into the
//! logical dimensions every view is drawn from: oriented screen size, niche
//! margins and the niche depth rounded to the nearest 1/8".

use ledwall_core::units::round_to_nearest_eighth;
use ledwall_core::PhysicalSpec;
use serde::{Deserialize, Serialize};

/// Screens narrower/shorter than this get the small niche margin.
pub const NICHE_MARGIN_THRESHOLD: f64 = 55.0;
/// Niche gap for dimensions below the threshold, inches.
pub const NICHE_MARGIN_SMALL: f64 = 1.5;
/// Niche gap for dimensions at or above the threshold, inches.
pub const NICHE_MARGIN_LARGE: f64 = 2.0;

/// Independent variables of a diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub screen: PhysicalSpec,
    pub media_player_depth: f64,
    pub mount_depth: f64,
    /// Extra depth allowance entered by the user.
    pub variant_depth: f64,
    pub is_horizontal: bool,
    pub is_niche: bool,
    pub is_edge_to_edge: bool,
    /// Floor to screen centreline, inches. `None` uses the scale policy default.
    pub floor_distance: Option<f64>,
    /// Wall width in meters (wall-relative layout).
    pub wall_width: f64,
    /// Wall height in meters (wall-relative layout).
    pub wall_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            screen: PhysicalSpec::default(),
            media_player_depth: 0.0,
            mount_depth: 0.0,
            variant_depth: 0.0,
            is_horizontal: true,
            is_niche: true,
            is_edge_to_edge: false,
            floor_distance: None,
            wall_width: 0.0,
            wall_height: 0.0,
        }
    }
}

/// Logical dimensions derived from a [`LayoutConfig`], in inches.
///
/// Raw values are pre-orientation and feed label text; oriented values feed
/// drawing geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedDimensions {
    pub width: f64,
    pub height: f64,
    pub screen_depth: f64,
    pub oriented_width: f64,
    pub oriented_height: f64,
    pub niche_depth_raw: f64,
    pub niche_depth: f64,
    pub niche_margin_width: f64,
    pub niche_margin_height: f64,
    pub niche_width: f64,
    pub niche_height: f64,
    pub oriented_niche_width: f64,
    pub oriented_niche_height: f64,
}

/// Niche gap for one axis, chosen from that axis's raw (pre-orientation) value.
pub fn niche_margin(raw_dimension: f64) -> f64 {
    if raw_dimension < NICHE_MARGIN_THRESHOLD {
        NICHE_MARGIN_SMALL
    } else {
        NICHE_MARGIN_LARGE
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Derives the logical dimensions of a diagram. Never fails; non-finite
/// inputs count as zero.
pub fn derive(config: &LayoutConfig) -> DerivedDimensions {
    let width = finite_or_zero(config.screen.width);
    let height = finite_or_zero(config.screen.height);
    let screen_depth = finite_or_zero(config.screen.depth);

    let behind_screen = finite_or_zero(config.media_player_depth)
        .max(finite_or_zero(config.mount_depth));
    let niche_depth_raw = screen_depth + behind_screen + finite_or_zero(config.variant_depth);
    let niche_depth = round_to_nearest_eighth(niche_depth_raw);

    let (oriented_width, oriented_height) = if config.is_horizontal {
        (width, height)
    } else {
        (height, width)
    };

    // Margins follow the raw axes, not the oriented ones.
    let niche_margin_width = niche_margin(width);
    let niche_margin_height = niche_margin(height);

    DerivedDimensions {
        width,
        height,
        screen_depth,
        oriented_width,
        oriented_height,
        niche_depth_raw,
        niche_depth,
        niche_margin_width,
        niche_margin_height,
        niche_width: width + 2.0 * niche_margin_width,
        niche_height: height + 2.0 * niche_margin_height,
        oriented_niche_width: oriented_width + 2.0 * niche_margin_width,
        oriented_niche_height: oriented_height + 2.0 * niche_margin_height,
    }
}

impl DerivedDimensions {
    /// Depth shown in the side view: the niche depth when a niche is drawn,
    /// otherwise the bare screen depth.
    pub fn side_view_depth(&self, is_niche: bool) -> f64 {
        if is_niche {
            self.niche_depth
        } else {
            self.screen_depth
        }
    }
}
