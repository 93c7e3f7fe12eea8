//! Receptacle box store.
//!
//! Owns the placeable receptacle boxes, their count and the drag session.
//! Drag handling is a two-state machine:
//!
//! ```text
//!            start_drag(id, p)
//!   Idle ─────────────────────────▶ Dragging
//!    ▲                                 │ update_drag_position(p)
//!    └──────────── end_drag() ─────────┘
//! ```
//!
//! Calls made in the wrong state are silent no-ops; stale pointer listeners
//! are expected to produce them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::boundary::BoundaryModel;
use crate::model::{Point, Rect, Size};

pub const MIN_BOX_COUNT: usize = 1;
pub const MAX_BOX_COUNT: usize = 10;
/// Grid slots per row when boxes are appended.
pub const BOXES_PER_ROW: usize = 10;
pub const DEFAULT_BOX_SIZE: Size = Size {
    width: 40.0,
    height: 40.0,
};
pub const DEFAULT_BOX_GAP: f64 = 2.0;
/// Anchor of the first grid slot, before clamping.
pub const INITIAL_BOX_POSITION: Point = Point { x: 50.0, y: 50.0 };
/// Largest id kept when restoring persisted boxes; larger ids are re-assigned.
pub const MAX_RESTORED_ID: u64 = u32::MAX as u64;

/// A receptacle box placed in drawing space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReceptacleBox {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ReceptacleBox {
    pub fn new(id: u64, position: Point, size: Size) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }
}

/// An in-flight drag of one box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub box_id: u64,
    pub anchor_pointer: Point,
    pub anchor_box: Point,
}

/// Collection of receptacle boxes constrained to a boundary.
#[derive(Debug, Clone)]
pub struct ReceptacleBoxStore {
    boxes: Vec<ReceptacleBox>,
    next_id: u64,
    box_size: Size,
    gap: f64,
    anchor: Point,
    boundary: BoundaryModel,
    drag: Option<DragSession>,
}

impl ReceptacleBoxStore {
    /// Creates a store holding one default box clamped into `boundary`.
    pub fn new(boundary: Rect) -> Self {
        let mut store = Self {
            boxes: Vec::with_capacity(MAX_BOX_COUNT),
            next_id: 1,
            box_size: DEFAULT_BOX_SIZE,
            gap: DEFAULT_BOX_GAP,
            anchor: INITIAL_BOX_POSITION,
            boundary: BoundaryModel::new(boundary),
            drag: None,
        };
        store.append_box();
        store
    }

    /// Uses `size` for existing and future boxes.
    pub fn with_box_size(mut self, size: Size) -> Self {
        self.resize_boxes(size);
        self
    }

    pub fn boxes(&self) -> &[ReceptacleBox] {
        &self.boxes
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn get(&self, id: u64) -> Option<&ReceptacleBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub fn box_size(&self) -> Size {
        self.box_size
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn set_gap(&mut self, gap: f64) {
        self.gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };
    }

    pub fn boundary(&self) -> Rect {
        self.boundary.boundary()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Replaces the boundary and re-clamps every box into it.
    pub fn set_boundary(&mut self, boundary: Rect) {
        self.reclamp_all(boundary);
    }

    /// Makes `boundary` current and clamps each box's position (not its size)
    /// into it. Boxes are clamped independently, so the result does not
    /// depend on their order and a second call changes nothing.
    pub fn reclamp_all(&mut self, boundary: Rect) {
        if self.boundary.set_boundary(boundary) {
            debug!(
                "Receptacle boundary now ({:.1}, {:.1}) {:.1}x{:.1}",
                boundary.x, boundary.y, boundary.width, boundary.height
            );
        }
        for b in &mut self.boxes {
            let clamped = self.boundary.clamp_point(b.position(), b.size());
            b.set_position(clamped);
        }
    }

    /// Grid position of the `n`th box (1-based), before clamping.
    pub fn grid_slot(&self, n: usize) -> Point {
        let index = n.saturating_sub(1);
        let row = (index / BOXES_PER_ROW) as f64;
        let col = (index % BOXES_PER_ROW) as f64;
        Point::new(
            self.anchor.x + col * (self.box_size.width + self.gap),
            self.anchor.y + row * (self.box_size.height + self.gap),
        )
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn append_box(&mut self) -> u64 {
        let id = self.allocate_id();
        let slot = self.grid_slot(self.boxes.len() + 1);
        let position = self.boundary.clamp_point(slot, self.box_size);
        self.boxes.push(ReceptacleBox::new(id, position, self.box_size));
        id
    }

    /// Appends one box at the next grid slot. No-op at [`MAX_BOX_COUNT`].
    ///
    /// Returns the new box id.
    pub fn increment_box_count(&mut self) -> Option<u64> {
        if self.boxes.len() >= MAX_BOX_COUNT {
            return None;
        }
        let id = self.append_box();
        debug!("Added receptacle box {} ({} total)", id, self.boxes.len());
        Some(id)
    }

    /// Removes the most recently appended box. No-op at [`MIN_BOX_COUNT`].
    ///
    /// Removing the box under drag ends the drag.
    pub fn decrement_box_count(&mut self) -> Option<ReceptacleBox> {
        if self.boxes.len() <= MIN_BOX_COUNT {
            return None;
        }
        let removed = self.boxes.pop()?;
        if self.drag.is_some_and(|d| d.box_id == removed.id) {
            self.drag = None;
        }
        debug!(
            "Removed receptacle box {} ({} total)",
            removed.id,
            self.boxes.len()
        );
        Some(removed)
    }

    /// Grows or shrinks to `count` boxes, clamped to
    /// `[MIN_BOX_COUNT, MAX_BOX_COUNT]`.
    pub fn set_box_count(&mut self, count: usize) {
        let target = count.clamp(MIN_BOX_COUNT, MAX_BOX_COUNT);
        while self.boxes.len() < target {
            self.increment_box_count();
        }
        while self.boxes.len() > target {
            self.decrement_box_count();
        }
    }

    /// Applies a new size to every box and to future boxes, then re-clamps.
    /// Non-positive or non-finite sizes fall back to [`DEFAULT_BOX_SIZE`].
    pub fn resize_boxes(&mut self, size: Size) {
        self.box_size = valid_size(size).unwrap_or(DEFAULT_BOX_SIZE);
        for b in &mut self.boxes {
            b.width = self.box_size.width;
            b.height = self.box_size.height;
        }
        let boundary = self.boundary.boundary();
        self.reclamp_all(boundary);
    }

    /// Moves a box to `position`, clamped into the boundary.
    pub fn move_box_to(&mut self, id: u64, position: Point) -> Option<Point> {
        let boundary = self.boundary;
        let b = self.boxes.iter_mut().find(|b| b.id == id)?;
        let clamped = boundary.clamp_point(position, b.size());
        b.set_position(clamped);
        Some(clamped)
    }

    /// Replaces the boxes with persisted records.
    ///
    /// An empty list yields one default box, extra records beyond
    /// [`MAX_BOX_COUNT`] are dropped, and invalid sizes take the current box
    /// size. Ids that are zero, duplicated or above [`MAX_RESTORED_ID`] are
    /// re-assigned. Ends any drag.
    pub fn restore(&mut self, records: &[ReceptacleBox]) {
        self.drag = None;
        self.boxes.clear();

        let records = &records[..records.len().min(MAX_BOX_COUNT)];
        let max_id = records
            .iter()
            .map(|r| r.id)
            .filter(|&id| id <= MAX_RESTORED_ID)
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);

        let mut seen = HashSet::new();
        for record in records {
            let keep = record.id != 0 && record.id <= MAX_RESTORED_ID;
            let id = if keep && seen.insert(record.id) {
                record.id
            } else {
                let fresh = self.allocate_id();
                seen.insert(fresh);
                fresh
            };
            let size = valid_size(record.size()).unwrap_or(self.box_size);
            let position = if record.x.is_finite() && record.y.is_finite() {
                record.position()
            } else {
                self.anchor
            };
            let position = self.boundary.clamp_point(position, size);
            self.boxes.push(ReceptacleBox::new(id, position, size));
        }

        if self.boxes.is_empty() {
            self.append_box();
        }
    }

    /// Starts dragging box `id` from pointer position `pointer`.
    ///
    /// Ignored when a drag is already active or the id is unknown.
    pub fn start_drag(&mut self, id: u64, pointer: Point) -> bool {
        if let Some(active) = &self.drag {
            debug!(
                "Ignoring drag start on box {}: box {} is already dragging",
                id, active.box_id
            );
            return false;
        }
        let Some(b) = self.get(id) else {
            debug!("Ignoring drag start on unknown box {}", id);
            return false;
        };
        self.drag = Some(DragSession {
            box_id: id,
            anchor_pointer: pointer,
            anchor_box: b.position(),
        });
        true
    }

    /// Moves the dragged box by the pointer's offset from the drag anchor,
    /// clamped into the boundary. Returns the new box position, or `None`
    /// when no drag is active.
    pub fn update_drag_position(&mut self, pointer: Point) -> Option<Point> {
        let session = self.drag?;
        let target = session.anchor_box.offset(
            pointer.x - session.anchor_pointer.x,
            pointer.y - session.anchor_pointer.y,
        );
        let moved = self.move_box_to(session.box_id, target);
        if moved.is_none() {
            self.drag = None;
        }
        moved
    }

    /// Ends the drag unconditionally. Returns the id of the box that was
    /// being dragged, if any.
    pub fn end_drag(&mut self) -> Option<u64> {
        self.drag.take().map(|session| session.box_id)
    }
}

fn valid_size(size: Size) -> Option<Size> {
    (size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0)
        .then_some(size)
}
