use ledwall_designer::model::{Point, Rect, Size};
use ledwall_designer::receptacle_boxes::{
    ReceptacleBox, ReceptacleBoxStore, MAX_BOX_COUNT, MAX_RESTORED_ID,
};
use std::collections::HashSet;

fn store() -> ReceptacleBoxStore {
    ReceptacleBoxStore::new(Rect::new(0.0, 0.0, 800.0, 600.0))
}

#[test]
fn test_drag_scenario() {
    let mut store = store();
    store.move_box_to(1, Point::new(100.0, 100.0));

    assert!(store.start_drag(1, Point::new(10.0, 10.0)));
    store.update_drag_position(Point::new(15.0, 20.0));
    assert_eq!(store.get(1).unwrap().position(), Point::new(105.0, 110.0));

    store.end_drag();
    assert_eq!(store.update_drag_position(Point::new(50.0, 50.0)), None);
    assert_eq!(store.get(1).unwrap().position(), Point::new(105.0, 110.0));
}

#[test]
fn test_increment_at_ceiling_leaves_state_unchanged() {
    let mut store = store();
    for _ in 0..MAX_BOX_COUNT {
        store.increment_box_count();
    }
    assert_eq!(store.box_count(), MAX_BOX_COUNT);
    let snapshot = store.boxes().to_vec();

    assert!(store.increment_box_count().is_none());
    assert_eq!(store.boxes(), snapshot.as_slice());
}

#[test]
fn test_grid_wraps_after_ten_slots() {
    let store = store();
    let eleventh = store.grid_slot(11);
    let first = store.grid_slot(1);
    assert_eq!(eleventh.x, first.x);
    assert_eq!(eleventh.y, first.y + 42.0);
}

#[test]
fn test_drag_stays_inside_boundary() {
    let mut store = store();
    store.start_drag(1, Point::new(0.0, 0.0));
    for step in 0..50 {
        let p = Point::new(step as f64 * 37.0, -(step as f64) * 19.0);
        store.update_drag_position(p);
        let b = store.get(1).unwrap();
        assert!(store.boundary().contains_rect(&b.rect()));
    }
}

#[test]
fn test_stale_events_are_ignored() {
    let mut store = store();
    assert_eq!(store.end_drag(), None);
    assert_eq!(store.update_drag_position(Point::new(1.0, 1.0)), None);
    assert!(!store.start_drag(42, Point::default()));
    assert!(!store.is_dragging());
}

#[test]
fn test_restore_reassigns_out_of_range_ids() {
    let mut store = store();
    let huge = ReceptacleBox::new(u64::MAX, Point::new(60.0, 60.0), Size::new(40.0, 40.0));
    store.restore(&[huge, huge]);

    let ids: Vec<u64> = store.boxes().iter().map(|b| b.id).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert!(ids.iter().all(|&id| id != 0 && id <= MAX_RESTORED_ID));

    store.set_box_count(MAX_BOX_COUNT);
    let unique: HashSet<u64> = store.boxes().iter().map(|b| b.id).collect();
    assert_eq!(unique.len(), MAX_BOX_COUNT);
}

#[test]
fn test_restore_keeps_ids_up_to_limit() {
    let mut store = store();
    let edge = ReceptacleBox::new(MAX_RESTORED_ID, Point::new(60.0, 60.0), Size::new(40.0, 40.0));
    store.restore(&[edge]);
    assert_eq!(store.boxes()[0].id, MAX_RESTORED_ID);

    let next = store.increment_box_count().unwrap();
    assert_eq!(next, MAX_RESTORED_ID + 1);
}
