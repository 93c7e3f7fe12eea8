use ledwall_core::{EquipmentCategory, ReferenceCatalog, ReferenceRecord};
use ledwall_designer::diagram_state::DiagramState;
use ledwall_designer::layout::{CanvasConstants, ScalePolicy};
use ledwall_designer::model::Point;
use ledwall_designer::serialization::{LayoutDocument, LayoutSettings};

fn catalog() -> ReferenceCatalog {
    let mut catalog = ReferenceCatalog::new();
    catalog.add_record(
        EquipmentCategory::Screen,
        ReferenceRecord::new()
            .with("Screen MFR", "LG-55")
            .with("Width", "54")
            .with("Height", "30")
            .with("Depth", "3"),
    );
    catalog.add_record(
        EquipmentCategory::Mount,
        ReferenceRecord::new()
            .with("MFG. PART", "CH-LTM1U")
            .with("Width", "24")
            .with("Height", "16")
            .with("Depth", "1.5"),
    );
    catalog.add_record(
        EquipmentCategory::ReceptacleBox,
        ReferenceRecord::new()
            .with("MFG. PART", "RB-2G")
            .with("Width", "4")
            .with("Height", "4")
            .with("Depth", "2.5"),
    );
    catalog
}

#[test]
fn test_create_new_layout() {
    let doc = LayoutDocument::new("Lobby");
    assert_eq!(doc.version, "1.0");
    assert_eq!(doc.metadata.name, "Lobby");
    assert_eq!(doc.settings, LayoutSettings::default());
    assert!(doc.wall.is_none());
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lobby.json");
    let catalog = catalog();

    let mut state = DiagramState::default();
    LayoutSettings {
        selected_screen: "LG-55".into(),
        selected_mount: "CH-LTM1U".into(),
        selected_receptacle_box: "RB-2G".into(),
        is_edge_to_edge: true,
        box_count: 3,
        ..LayoutSettings::default()
    }
    .apply_to(&mut state, &catalog);
    state.move_box(2, Point::new(150.0, 500.0));

    let doc = LayoutDocument::from_state("Lobby", &state);
    doc.save_to_file(&path).unwrap();

    let loaded = LayoutDocument::load_from_file(&path).unwrap();
    assert_eq!(loaded.metadata.name, "Lobby");
    assert_eq!(loaded.metadata.created, doc.metadata.created);
    assert_eq!(loaded.settings.selected_mount, "CH-LTM1U");
    assert_eq!(loaded.settings.box_count, 3);

    let rebuilt = loaded.to_state(&catalog, CanvasConstants::default());
    assert_eq!(rebuilt.geometry(), state.geometry());
    assert!(rebuilt.config().is_edge_to_edge);
    assert_eq!(rebuilt.boxes().box_count(), 3);
    for (a, b) in rebuilt.boxes().boxes().iter().zip(state.boxes().boxes()) {
        assert_eq!(a.id, b.id);
        assert!(a.position().distance_to(&b.position()) < 1e-9);
    }
}

#[test]
fn test_load_partial_settings() {
    let json = r#"{
        "version": "1.0",
        "metadata": {
            "name": "Partial",
            "created": "2024-05-01T12:00:00Z",
            "modified": "2024-05-01T12:00:00Z"
        },
        "settings": { "selectedScreen": "LG-55", "isHorizontal": false }
    }"#;
    let doc = LayoutDocument::from_json(json).unwrap();
    assert!(!doc.settings.is_horizontal);
    assert!(doc.settings.is_niche);
    assert_eq!(doc.settings.box_gap, 2.0);
    assert_eq!(doc.metadata.author, "");

    let state = doc.to_state(&catalog(), CanvasConstants::default());
    assert_eq!(state.dimensions().oriented_width, 30.0);
    assert_eq!(state.policy(), ScalePolicy::ScreenFit);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(LayoutDocument::load_from_file(dir.path().join("nope.json")).is_err());
}

#[test]
fn test_numeric_settings_accept_form_strings() {
    let settings: LayoutSettings = serde_json::from_str(
        r#"{
            "variantDepth": "0.3",
            "floorDistance": "48 1/2",
            "bottomDistance": "2.5in",
            "leftDistance": 3,
            "boxGap": "4",
            "boxCount": "3"
        }"#,
    )
    .unwrap();
    assert_eq!(settings.variant_depth, 0.3);
    assert_eq!(settings.floor_distance, 48.5);
    assert_eq!(settings.bottom_distance, 2.5);
    assert_eq!(settings.left_distance, 3.0);
    assert_eq!(settings.box_gap, 4.0);
    assert_eq!(settings.box_count, 3);
}

#[test]
fn test_malformed_numeric_settings_take_defaults() {
    let settings: LayoutSettings = serde_json::from_str(
        r#"{
            "variantDepth": null,
            "floorDistance": "",
            "bottomDistance": "abc",
            "leftDistance": true,
            "boxGap": null,
            "boxCount": "many"
        }"#,
    )
    .unwrap();
    assert_eq!(settings.variant_depth, 0.0);
    assert_eq!(settings.floor_distance, 0.0);
    assert_eq!(settings.bottom_distance, 0.0);
    assert_eq!(settings.left_distance, 0.0);
    assert_eq!(settings.box_gap, 2.0);
    assert_eq!(settings.box_count, 1);
}

#[test]
fn test_box_count_is_rounded_and_clamped() {
    let count = |json: &str| serde_json::from_str::<LayoutSettings>(json).unwrap().box_count;
    assert_eq!(count(r#"{"boxCount": -4}"#), 1);
    assert_eq!(count(r#"{"boxCount": 2.6}"#), 3);
    assert_eq!(count(r#"{"boxCount": 25}"#), 10);
}

#[test]
fn test_load_document_with_string_depth_and_oversized_ids() {
    let json = r#"{
        "version": "1.0",
        "metadata": {
            "name": "Form input",
            "created": "2024-05-01T12:00:00Z",
            "modified": "2024-05-01T12:00:00Z"
        },
        "settings": {
            "selectedScreen": "LG-55",
            "selectedMount": "CH-LTM1U",
            "variantDepth": "0.3",
            "boxCount": 2,
            "receptacleBoxes": [
                { "id": 18446744073709551615, "x": 10, "y": 10, "width": 40, "height": 40 },
                { "id": 18446744073709551615, "x": 60, "y": 10, "width": 40, "height": 40 }
            ]
        }
    }"#;
    let doc = LayoutDocument::from_json(json).unwrap();
    let mut state = doc.to_state(&catalog(), CanvasConstants::default());
    assert_eq!(state.dimensions().niche_depth, 4.75);

    let ids: Vec<u64> = state.boxes().boxes().iter().map(|b| b.id).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert!(ids.iter().all(|&id| id < u64::MAX));

    state.set_box_count(10);
    assert_eq!(state.boxes().box_count(), 10);
}
