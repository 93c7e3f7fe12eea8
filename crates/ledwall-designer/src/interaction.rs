//! Pointer input routed into the receptacle box store.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::Point;
use crate::receptacle_boxes::ReceptacleBoxStore;
use crate::viewport::CoordinateTransform;

/// Pointer input in client pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Pointer pressed on a box.
    Down { box_id: u64, client: Point },
    Move { client: Point },
    Up,
    /// Pointer lost (capture released, window blurred).
    Cancel,
}

/// What an event did to the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    DragStarted(u64),
    Moved { box_id: u64, position: Point },
    DragEnded(u64),
    Ignored,
}

/// Converts `event` into drawing space with `transform` and applies it.
pub fn handle_pointer_event<T>(
    store: &mut ReceptacleBoxStore,
    transform: &T,
    event: PointerEvent,
) -> PointerOutcome
where
    T: CoordinateTransform + ?Sized,
{
    match event {
        PointerEvent::Down { box_id, client } => {
            let pointer = transform.to_drawing(client);
            if store.start_drag(box_id, pointer) {
                PointerOutcome::DragStarted(box_id)
            } else {
                PointerOutcome::Ignored
            }
        }
        PointerEvent::Move { client } => {
            let Some(box_id) = store.drag_session().map(|s| s.box_id) else {
                return PointerOutcome::Ignored;
            };
            let pointer = transform.to_drawing(client);
            match store.update_drag_position(pointer) {
                Some(position) => PointerOutcome::Moved { box_id, position },
                None => PointerOutcome::Ignored,
            }
        }
        PointerEvent::Up | PointerEvent::Cancel => match store.end_drag() {
            Some(box_id) => {
                debug!("Drag of box {} ended by {:?}", box_id, event);
                PointerOutcome::DragEnded(box_id)
            }
            None => PointerOutcome::Ignored,
        },
    }
}
