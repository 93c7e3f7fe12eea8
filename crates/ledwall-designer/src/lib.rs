//! # LEDWall Designer
//!
//! Installation diagram engine for wall-mounted LED screens. Turns equipment
//! specs and user choices into a scaled 2D diagram: front view with niche and
//! wood backing, side view showing depth, floor and centre lines, and
//! draggable receptacle boxes constrained to the screen.
//!
//! ## Architecture
//!
//! ```text
//! LayoutConfig ──derive──▶ DerivedDimensions ──LayoutEngine + ScalePolicy──▶ PixelGeometry
//!                                                                               │ boundary
//!                                                                               ▼
//! PointerEvent ──CoordinateTransform──▶ ReceptacleBoxStore (Idle ⇄ Dragging, clamped)
//!
//! DiagramState owns all of the above; svg_renderer draws it; serialization
//! persists it as a LayoutDocument.
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledwall_designer::{DiagramState, svg_renderer};
//! use ledwall_core::{EquipmentCategory, PhysicalSpec};
//!
//! let mut state = DiagramState::default();
//! state.select(EquipmentCategory::Screen, Some(PhysicalSpec::new("LG-55", 54.0, 30.0, 3.0)));
//! state.increment_box_count();
//! let svg = svg_renderer::render_document(&state);
//! ```

pub mod boundary;
pub mod diagram_state;
pub mod dimensions;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod receptacle_boxes;
pub mod serialization;
pub mod svg_renderer;
pub mod viewport;

pub use boundary::{clamp_point, clamp_rect, BoundaryModel};
pub use diagram_state::{DiagramState, IntendedPosition, Selections, Visibility};
pub use dimensions::{derive, niche_margin, DerivedDimensions, LayoutConfig};
pub use interaction::{handle_pointer_event, PointerEvent, PointerOutcome};
pub use layout::{CanvasConstants, LayoutEngine, PixelGeometry, ScalePolicy};
pub use model::{Point, Rect, Size};
pub use receptacle_boxes::{
    DragSession, ReceptacleBox, ReceptacleBoxStore, MAX_BOX_COUNT, MAX_RESTORED_ID,
    MIN_BOX_COUNT,
};
pub use serialization::{LayoutDocument, LayoutMetadata, LayoutSettings, WallSize};
pub use viewport::{CoordinateTransform, ViewBoxTransform};
