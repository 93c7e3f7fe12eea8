//! Diagram state manager.
//!
//! [`DiagramState`] owns every input of a diagram and the geometry derived
//! from them. Each setter recomputes dimensions and geometry and pushes the
//! new boundary into the receptacle box store, so the derived state is never
//! stale.

use ledwall_core::units::round_to_nearest_eighth;
use ledwall_core::{EquipmentCategory, PhysicalSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dimensions::{derive, DerivedDimensions, LayoutConfig};
use crate::interaction::{self, PointerEvent, PointerOutcome};
use crate::layout::{CanvasConstants, LayoutEngine, PixelGeometry, ScalePolicy};
use crate::model::{Point, Size};
use crate::receptacle_boxes::{ReceptacleBox, ReceptacleBoxStore, DEFAULT_BOX_SIZE};
use crate::viewport::CoordinateTransform;

/// Selected equipment, one optional spec per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selections {
    pub screen: Option<PhysicalSpec>,
    pub mount: Option<PhysicalSpec>,
    pub media_player: Option<PhysicalSpec>,
    pub receptacle_box: Option<PhysicalSpec>,
}

impl Selections {
    pub fn get(&self, category: EquipmentCategory) -> Option<&PhysicalSpec> {
        match category {
            EquipmentCategory::Screen => self.screen.as_ref(),
            EquipmentCategory::Mount => self.mount.as_ref(),
            EquipmentCategory::MediaPlayer => self.media_player.as_ref(),
            EquipmentCategory::ReceptacleBox => self.receptacle_box.as_ref(),
        }
    }

    fn slot(&mut self, category: EquipmentCategory) -> &mut Option<PhysicalSpec> {
        match category {
            EquipmentCategory::Screen => &mut self.screen,
            EquipmentCategory::Mount => &mut self.mount,
            EquipmentCategory::MediaPlayer => &mut self.media_player,
            EquipmentCategory::ReceptacleBox => &mut self.receptacle_box,
        }
    }

    /// Identifier of the selection in `category`, empty when unselected.
    pub fn id(&self, category: EquipmentCategory) -> String {
        self.get(category)
            .map(|spec| spec.id.clone())
            .unwrap_or_default()
    }
}

/// Visibility of the optional diagram layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub floor_line: bool,
    pub centre_line: bool,
    pub wood_backing: bool,
    pub receptacle_box: bool,
    pub intended_position: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            floor_line: true,
            centre_line: true,
            wood_backing: true,
            receptacle_box: true,
            intended_position: true,
        }
    }
}

/// Offset of a box from the screen's left and bottom edges, inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntendedPosition {
    pub left: f64,
    pub bottom: f64,
}

/// Explicitly passed owner of one diagram.
#[derive(Debug, Clone)]
pub struct DiagramState {
    engine: LayoutEngine,
    policy: ScalePolicy,
    config: LayoutConfig,
    selections: Selections,
    visibility: Visibility,
    dims: DerivedDimensions,
    geometry: PixelGeometry,
    boxes: ReceptacleBoxStore,
    bottom_distance: f64,
    left_distance: f64,
}

impl Default for DiagramState {
    fn default() -> Self {
        Self::new(CanvasConstants::default(), ScalePolicy::default())
    }
}

impl DiagramState {
    pub fn new(constants: CanvasConstants, policy: ScalePolicy) -> Self {
        Self::with_config(constants, policy, LayoutConfig::default())
    }

    pub fn with_config(
        constants: CanvasConstants,
        policy: ScalePolicy,
        config: LayoutConfig,
    ) -> Self {
        let engine = LayoutEngine::new(constants);
        let dims = derive(&config);
        let geometry = engine.compute(&config, &dims, policy);
        let boxes = ReceptacleBoxStore::new(geometry.boundary());
        let mut state = Self {
            engine,
            policy,
            config,
            selections: Selections::default(),
            visibility: Visibility::default(),
            dims,
            geometry,
            boxes,
            bottom_distance: 0.0,
            left_distance: 0.0,
        };
        state.recompute();
        state
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn policy(&self) -> ScalePolicy {
        self.policy
    }

    pub fn constants(&self) -> &CanvasConstants {
        self.engine.constants()
    }

    pub fn dimensions(&self) -> &DerivedDimensions {
        &self.dims
    }

    pub fn geometry(&self) -> &PixelGeometry {
        &self.geometry
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn boxes(&self) -> &ReceptacleBoxStore {
        &self.boxes
    }

    pub fn bottom_distance(&self) -> f64 {
        self.bottom_distance
    }

    pub fn left_distance(&self) -> f64 {
        self.left_distance
    }

    pub fn box_gap(&self) -> f64 {
        self.boxes.gap()
    }

    /// Re-derives dimensions and geometry and re-clamps the boxes.
    fn recompute(&mut self) {
        self.dims = derive(&self.config);
        self.geometry = self.engine.compute(&self.config, &self.dims, self.policy);
        self.boxes.set_boundary(self.geometry.boundary());
        self.boxes.resize_boxes(self.box_drawing_size());
        debug!(
            "Recomputed {} layout: scale {:.3}, screen {:.1}x{:.1}",
            self.policy,
            self.geometry.scale,
            self.geometry.screen.width,
            self.geometry.screen.height
        );
    }

    /// Drawn size of a receptacle box: the selected box at diagram scale, or
    /// the default size when nothing is selected.
    fn box_drawing_size(&self) -> Size {
        match &self.selections.receptacle_box {
            Some(spec) if spec.width > 0.0 && spec.height > 0.0 => Size::new(
                spec.width * self.geometry.scale,
                spec.height * self.geometry.scale,
            ),
            _ => DEFAULT_BOX_SIZE,
        }
    }

    /// Selects (or clears) the equipment for `category`.
    pub fn select(&mut self, category: EquipmentCategory, spec: Option<PhysicalSpec>) {
        let depth = spec.as_ref().map_or(0.0, |s| s.depth);
        match category {
            EquipmentCategory::Screen => {
                self.config.screen = spec.clone().unwrap_or_default();
            }
            EquipmentCategory::Mount => self.config.mount_depth = depth,
            EquipmentCategory::MediaPlayer => self.config.media_player_depth = depth,
            EquipmentCategory::ReceptacleBox => {}
        }
        *self.selections.slot(category) = spec;
        self.recompute();
    }

    pub fn set_policy(&mut self, policy: ScalePolicy) {
        self.policy = policy;
        self.recompute();
    }

    pub fn set_constants(&mut self, constants: CanvasConstants) {
        self.engine = LayoutEngine::new(constants);
        self.recompute();
    }

    pub fn set_horizontal(&mut self, is_horizontal: bool) {
        self.config.is_horizontal = is_horizontal;
        self.recompute();
    }

    pub fn set_niche(&mut self, is_niche: bool) {
        self.config.is_niche = is_niche;
        self.recompute();
    }

    pub fn set_edge_to_edge(&mut self, is_edge_to_edge: bool) {
        self.config.is_edge_to_edge = is_edge_to_edge;
        self.recompute();
    }

    pub fn set_variant_depth(&mut self, depth: f64) {
        self.config.variant_depth = if depth.is_finite() { depth } else { 0.0 };
        self.recompute();
    }

    /// Sets the floor-to-centreline distance; non-positive restores the
    /// policy default.
    pub fn set_floor_distance(&mut self, inches: f64) {
        self.config.floor_distance = (inches.is_finite() && inches > 0.0).then_some(inches);
        self.recompute();
    }

    /// Sets the wall size in meters.
    pub fn set_wall_size(&mut self, width: f64, height: f64) {
        self.config.wall_width = width;
        self.config.wall_height = height;
        self.recompute();
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
        self.recompute();
    }

    pub fn set_bottom_distance(&mut self, inches: f64) {
        self.bottom_distance = sanitize_distance(inches);
        self.recompute();
    }

    pub fn set_left_distance(&mut self, inches: f64) {
        self.left_distance = sanitize_distance(inches);
        self.recompute();
    }

    pub fn set_box_gap(&mut self, gap: f64) {
        self.boxes.set_gap(gap);
        self.recompute();
    }

    /// Replaces the boxes with persisted records, then grows or shrinks to
    /// `count`. Boxes take the current drawing size.
    pub fn restore_boxes(&mut self, records: &[ReceptacleBox], count: usize) {
        self.boxes.restore(records);
        self.boxes.set_box_count(count);
        self.boxes.resize_boxes(self.box_drawing_size());
    }

    // Box edits below never change the layout, so they skip recompute. The
    // store's boundary is only ever set by recompute.

    pub fn increment_box_count(&mut self) -> Option<u64> {
        self.boxes.increment_box_count()
    }

    pub fn decrement_box_count(&mut self) -> Option<ReceptacleBox> {
        self.boxes.decrement_box_count()
    }

    pub fn set_box_count(&mut self, count: usize) {
        self.boxes.set_box_count(count);
    }

    /// Moves box `id` to `position` in drawing space, clamped to the screen.
    pub fn move_box(&mut self, id: u64, position: Point) -> Option<Point> {
        self.boxes.move_box_to(id, position)
    }

    pub fn start_drag(&mut self, id: u64, pointer: Point) -> bool {
        self.boxes.start_drag(id, pointer)
    }

    pub fn update_drag_position(&mut self, pointer: Point) -> Option<Point> {
        self.boxes.update_drag_position(pointer)
    }

    pub fn end_drag(&mut self) -> Option<u64> {
        self.boxes.end_drag()
    }

    /// Routes client-space pointer input to the boxes.
    pub fn handle_pointer_event<T>(&mut self, transform: &T, event: PointerEvent) -> PointerOutcome
    where
        T: CoordinateTransform + ?Sized,
    {
        interaction::handle_pointer_event(&mut self.boxes, transform, event)
    }

    /// Where box `id` sits relative to the screen's left and bottom edges,
    /// rounded to 1/8".
    pub fn intended_position(&self, id: u64) -> Option<IntendedPosition> {
        let b = self.boxes.get(id)?;
        let screen = self.geometry.screen;
        Some(IntendedPosition {
            left: round_to_nearest_eighth(self.geometry.to_inches(b.x - screen.x)),
            bottom: round_to_nearest_eighth(
                self.geometry.to_inches(screen.bottom() - b.rect().bottom()),
            ),
        })
    }

    /// Moves box `id` so it sits `position` away from the screen's left and
    /// bottom edges, clamped into the boundary.
    pub fn place_box(&mut self, id: u64, position: IntendedPosition) -> Option<Point> {
        let screen = self.geometry.screen;
        let scale = self.geometry.scale;
        let height = self.boxes.get(id)?.height;
        let target = Point::new(
            screen.x + position.left * scale,
            screen.bottom() - position.bottom * scale - height,
        );
        self.boxes.move_box_to(id, target)
    }

    /// Places box `id` at the configured left and bottom distances.
    pub fn apply_intended_position(&mut self, id: u64) -> Option<Point> {
        self.place_box(
            id,
            IntendedPosition {
                left: self.left_distance,
                bottom: self.bottom_distance,
            },
        )
    }
}

fn sanitize_distance(inches: f64) -> f64 {
    if inches.is_finite() {
        inches.max(0.0)
    } else {
        0.0
    }
}
