use ledwall_designer::interaction::{handle_pointer_event, PointerEvent, PointerOutcome};
use ledwall_designer::model::{Point, Rect, Size};
use ledwall_designer::receptacle_boxes::ReceptacleBoxStore;
use ledwall_designer::viewport::{CoordinateTransform, ViewBoxTransform};

#[test]
fn test_view_box_transform_scales_down() {
    let t = ViewBoxTransform::for_canvas(
        Rect::new(0.0, 0.0, 400.0, 400.0),
        Size::new(800.0, 800.0),
    );
    let p = t.to_drawing(Point::new(200.0, 100.0));
    assert!((p.x - 400.0).abs() < 0.01);
    assert!((p.y - 200.0).abs() < 0.01);
}

#[test]
fn test_resized_element_updates_mapping() {
    let mut t = ViewBoxTransform::for_canvas(
        Rect::new(0.0, 0.0, 800.0, 800.0),
        Size::new(800.0, 800.0),
    );
    t.set_element(Rect::new(50.0, 0.0, 1600.0, 1600.0));
    let p = t.to_drawing(Point::new(850.0, 800.0));
    assert!((p.x - 400.0).abs() < 0.01);
    assert!((p.y - 400.0).abs() < 0.01);
}

#[test]
fn test_pointer_events_through_boxed_transform() {
    let mut store = ReceptacleBoxStore::new(Rect::new(0.0, 0.0, 800.0, 800.0));
    store.move_box_to(1, Point::new(100.0, 100.0));
    let transform: Box<dyn CoordinateTransform> =
        Box::new(|p: Point| Point::new(p.x * 2.0, p.y * 2.0));

    handle_pointer_event(
        &mut store,
        transform.as_ref(),
        PointerEvent::Down {
            box_id: 1,
            client: Point::new(5.0, 5.0),
        },
    );
    let outcome = handle_pointer_event(
        &mut store,
        transform.as_ref(),
        PointerEvent::Move {
            client: Point::new(7.5, 10.0),
        },
    );
    assert_eq!(
        outcome,
        PointerOutcome::Moved {
            box_id: 1,
            position: Point::new(105.0, 110.0)
        }
    );
    assert_eq!(
        handle_pointer_event(&mut store, transform.as_ref(), PointerEvent::Up),
        PointerOutcome::DragEnded(1)
    );
    assert_eq!(
        handle_pointer_event(&mut store, transform.as_ref(), PointerEvent::Up),
        PointerOutcome::Ignored
    );
}
