use ledwall_designer::boundary::BoundaryModel;
use ledwall_designer::model::{Point, Rect, Size};
use ledwall_designer::receptacle_boxes::ReceptacleBoxStore;

#[test]
fn test_shrinking_boundary_moves_box_inside() {
    // 60x60 box at (400, 250) inside a generous boundary
    let mut store = ReceptacleBoxStore::new(Rect::new(0.0, 0.0, 500.0, 400.0))
        .with_box_size(Size::new(60.0, 60.0));
    store.move_box_to(1, Point::new(400.0, 250.0));

    store.set_boundary(Rect::new(0.0, 0.0, 100.0, 100.0));

    let b = store.get(1).unwrap();
    assert_eq!(b.position(), Point::new(40.0, 40.0));
    assert!(store.boundary().contains_rect(&b.rect()));
}

#[test]
fn test_box_larger_than_boundary_pins_to_origin() {
    let mut store = ReceptacleBoxStore::new(Rect::new(0.0, 0.0, 500.0, 300.0))
        .with_box_size(Size::new(60.0, 60.0));
    store.set_boundary(Rect::new(20.0, 30.0, 40.0, 40.0));
    assert_eq!(store.get(1).unwrap().position(), Point::new(20.0, 30.0));
}

#[test]
fn test_boundary_model_clamps_rects() {
    let model = BoundaryModel::new(Rect::new(10.0, 10.0, 100.0, 50.0));
    let clamped = model.clamp_rect(Rect::new(-20.0, 100.0, 30.0, 10.0));
    assert_eq!(clamped, Rect::new(10.0, 50.0, 30.0, 10.0));
}
