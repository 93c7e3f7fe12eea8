use ledwall_core::{EquipmentCategory, PhysicalSpec};
use ledwall_designer::diagram_state::DiagramState;
use ledwall_designer::svg_renderer::{render_document, render_receptacle_boxes};

fn state() -> DiagramState {
    let mut state = DiagramState::default();
    state.select(
        EquipmentCategory::Screen,
        Some(PhysicalSpec::new("LG-55", 54.0, 30.0, 3.0)),
    );
    state
}

#[test]
fn test_one_rect_per_box() {
    let mut state = state();
    state.increment_box_count();
    state.increment_box_count();
    let svg = render_receptacle_boxes(&state);
    assert_eq!(svg.matches("data-box-id").count(), 3);
}

#[test]
fn test_intended_position_labels() {
    let mut state = state();
    state.set_left_distance(10.0);
    state.set_bottom_distance(4.5);
    state.apply_intended_position(1);
    let svg = render_receptacle_boxes(&state);
    assert!(svg.contains(">10\"</text>"));
    assert!(svg.contains(">4 1/2\"</text>"));
}

#[test]
fn test_niche_label_uses_fractions() {
    let mut state = state();
    state.select(
        EquipmentCategory::Mount,
        Some(PhysicalSpec::new("M", 20.0, 20.0, 1.5)),
    );
    state.set_variant_depth(0.3);
    let svg = render_document(&state);
    assert!(svg.contains("Niche 57\" x 33\" x 4 3/4\""));
}

#[test]
fn test_view_box_matches_canvas() {
    let svg = render_document(&state());
    assert!(svg.contains("viewBox=\"0 0 800 800\""));
}
