use ledwall_core::{EquipmentCategory, PhysicalSpec};
use ledwall_designer::diagram_state::{DiagramState, IntendedPosition};
use ledwall_designer::interaction::{PointerEvent, PointerOutcome};
use ledwall_designer::layout::ScalePolicy;
use ledwall_designer::model::Point;

fn state_with_screen() -> DiagramState {
    let mut state = DiagramState::default();
    state.select(
        EquipmentCategory::Screen,
        Some(PhysicalSpec::new("LG-55", 54.0, 30.0, 3.0)),
    );
    state
}

#[test]
fn test_every_setter_keeps_boxes_inside_screen() {
    let mut state = state_with_screen();
    for _ in 0..9 {
        state.increment_box_count();
    }
    let far = Point::new(10_000.0, 10_000.0);
    let ids: Vec<u64> = state.boxes().boxes().iter().map(|b| b.id).collect();
    for id in ids {
        state.move_box(id, far);
    }

    state.set_horizontal(false);
    state.set_floor_distance(80.0);
    state.set_wall_size(3.0, 2.0);
    state.set_policy(ScalePolicy::WallRelative);

    let screen = state.geometry().screen;
    for b in state.boxes().boxes() {
        assert!(screen.contains_rect(&b.rect()), "box {} escaped", b.id);
    }
}

#[test]
fn test_place_box_by_intended_position() {
    let mut state = state_with_screen();
    let placed = state
        .place_box(1, IntendedPosition { left: 12.0, bottom: 6.5 })
        .unwrap();
    let screen = state.geometry().screen;
    assert!((placed.x - (screen.x + 12.0 * state.geometry().scale)).abs() < 1e-9);

    let measured = state.intended_position(1).unwrap();
    assert_eq!(measured, IntendedPosition { left: 12.0, bottom: 6.5 });
}

#[test]
fn test_unknown_box_has_no_intended_position() {
    let state = state_with_screen();
    assert!(state.intended_position(99).is_none());
}

#[test]
fn test_clearing_screen_keeps_minimum_drawing() {
    let mut state = state_with_screen();
    state.select(EquipmentCategory::Screen, None);
    let min = state.constants().min_pixel_size;
    assert_eq!(state.geometry().screen.width, min);
    assert_eq!(state.geometry().screen.height, min);
}

#[test]
fn test_box_edits_keep_boundary_on_screen() {
    let mut state = state_with_screen();
    state.set_box_count(4);
    assert_eq!(state.boxes().box_count(), 4);
    state.decrement_box_count();
    assert_eq!(state.increment_box_count(), Some(5));

    let identity = |p: Point| p;
    let screen = state.geometry().screen;
    let down = PointerEvent::Down {
        box_id: 1,
        client: Point::new(0.0, 0.0),
    };
    assert_eq!(
        state.handle_pointer_event(&identity, down),
        PointerOutcome::DragStarted(1)
    );
    let moved = state.handle_pointer_event(
        &identity,
        PointerEvent::Move {
            client: Point::new(-5_000.0, -5_000.0),
        },
    );
    assert_eq!(
        moved,
        PointerOutcome::Moved {
            box_id: 1,
            position: screen.origin()
        }
    );
    assert_eq!(
        state.handle_pointer_event(&identity, PointerEvent::Up),
        PointerOutcome::DragEnded(1)
    );

    assert!(state.start_drag(2, Point::default()));
    state.update_drag_position(Point::new(1.0, 1.0));
    assert_eq!(state.end_drag(), Some(2));

    assert_eq!(state.boxes().boundary(), state.geometry().screen);
}
