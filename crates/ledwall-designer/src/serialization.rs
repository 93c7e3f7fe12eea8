//! Serialization and deserialization for layout documents.
//!
//! A layout document is JSON: a format version, metadata and the flat
//! [`LayoutSettings`] record. Equipment is stored by identifier only and
//! resolved against a [`ReferenceCatalog`] on load.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use ledwall_core::{DocumentError, EquipmentCategory, ReferenceCatalog};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::diagram_state::{DiagramState, Visibility};
use crate::layout::{CanvasConstants, ScalePolicy};
use crate::receptacle_boxes::{
    ReceptacleBox, DEFAULT_BOX_GAP, DEFAULT_BOX_SIZE, INITIAL_BOX_POSITION, MAX_BOX_COUNT,
    MIN_BOX_COUNT,
};

/// Layout file format version
pub const FILE_FORMAT_VERSION: &str = "1.0";

/// Persisted layout settings. Absent fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutSettings {
    pub selected_screen: String,
    pub selected_mount: String,
    pub selected_media_player: String,
    pub selected_receptacle_box: String,
    pub is_horizontal: bool,
    pub is_niche: bool,
    pub is_edge_to_edge: bool,
    pub floor_line: bool,
    pub centre_line: bool,
    pub wood_backing: bool,
    pub receptacle_box: bool,
    pub intended_position: bool,
    #[serde(deserialize_with = "lenient::zero_if_invalid")]
    pub variant_depth: f64,
    /// Non-positive means the scale policy default.
    #[serde(deserialize_with = "lenient::zero_if_invalid")]
    pub floor_distance: f64,
    #[serde(deserialize_with = "lenient::zero_if_invalid")]
    pub bottom_distance: f64,
    #[serde(deserialize_with = "lenient::zero_if_invalid")]
    pub left_distance: f64,
    #[serde(deserialize_with = "lenient::box_gap")]
    pub box_gap: f64,
    #[serde(deserialize_with = "lenient::box_count")]
    pub box_count: usize,
    pub receptacle_boxes: Vec<ReceptacleBox>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            selected_screen: String::new(),
            selected_mount: String::new(),
            selected_media_player: String::new(),
            selected_receptacle_box: String::new(),
            is_horizontal: true,
            is_niche: true,
            is_edge_to_edge: false,
            floor_line: true,
            centre_line: true,
            wood_backing: true,
            receptacle_box: true,
            intended_position: true,
            variant_depth: 0.0,
            floor_distance: 0.0,
            bottom_distance: 0.0,
            left_distance: 0.0,
            box_gap: DEFAULT_BOX_GAP,
            box_count: MIN_BOX_COUNT,
            receptacle_boxes: vec![ReceptacleBox::new(
                1,
                INITIAL_BOX_POSITION,
                DEFAULT_BOX_SIZE,
            )],
        }
    }
}

impl LayoutSettings {
    /// Captures `state`, reducing selections to their identifiers.
    pub fn from_state(state: &DiagramState) -> Self {
        let selections = state.selections();
        let config = state.config();
        let visibility = state.visibility();
        Self {
            selected_screen: selections.id(EquipmentCategory::Screen),
            selected_mount: selections.id(EquipmentCategory::Mount),
            selected_media_player: selections.id(EquipmentCategory::MediaPlayer),
            selected_receptacle_box: selections.id(EquipmentCategory::ReceptacleBox),
            is_horizontal: config.is_horizontal,
            is_niche: config.is_niche,
            is_edge_to_edge: config.is_edge_to_edge,
            floor_line: visibility.floor_line,
            centre_line: visibility.centre_line,
            wood_backing: visibility.wood_backing,
            receptacle_box: visibility.receptacle_box,
            intended_position: visibility.intended_position,
            variant_depth: config.variant_depth,
            floor_distance: config.floor_distance.unwrap_or(0.0),
            bottom_distance: state.bottom_distance(),
            left_distance: state.left_distance(),
            box_gap: state.box_gap(),
            box_count: state.boxes().box_count(),
            receptacle_boxes: state.boxes().boxes().to_vec(),
        }
    }

    fn selected_id(&self, category: EquipmentCategory) -> &str {
        match category {
            EquipmentCategory::Screen => &self.selected_screen,
            EquipmentCategory::Mount => &self.selected_mount,
            EquipmentCategory::MediaPlayer => &self.selected_media_player,
            EquipmentCategory::ReceptacleBox => &self.selected_receptacle_box,
        }
    }

    /// Applies the settings to `state`, resolving identifiers in `catalog`.
    ///
    /// Unknown identifiers are logged and leave the selection empty.
    pub fn apply_to(&self, state: &mut DiagramState, catalog: &ReferenceCatalog) {
        for category in EquipmentCategory::ALL {
            let id = self.selected_id(category);
            let spec = if id.is_empty() {
                None
            } else {
                let spec = catalog.spec(category, id);
                if spec.is_none() {
                    warn!(
                        "Unknown {} '{}' in layout settings; leaving it unselected",
                        category, id
                    );
                }
                spec
            };
            state.select(category, spec);
        }

        state.set_horizontal(self.is_horizontal);
        state.set_niche(self.is_niche);
        state.set_edge_to_edge(self.is_edge_to_edge);
        state.set_visibility(Visibility {
            floor_line: self.floor_line,
            centre_line: self.centre_line,
            wood_backing: self.wood_backing,
            receptacle_box: self.receptacle_box,
            intended_position: self.intended_position,
        });
        state.set_variant_depth(self.variant_depth);
        state.set_floor_distance(self.floor_distance);
        state.set_bottom_distance(self.bottom_distance);
        state.set_left_distance(self.left_distance);
        state.set_box_gap(self.box_gap);

        let count = self.box_count.clamp(MIN_BOX_COUNT, MAX_BOX_COUNT);
        state.restore_boxes(&self.receptacle_boxes, count);
    }
}

/// Numeric settings come from form input and may be stored as numbers,
/// strings or null. Anything unusable takes the field's default.
mod lenient {
    use ledwall_core::units::{parse_dimension, parse_inches};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::receptacle_boxes::{DEFAULT_BOX_GAP, MAX_BOX_COUNT, MIN_BOX_COUNT};

    /// Decimal or fractional inches (`"5 1/4"`), else a leading number
    /// (`"2.5mm"`). Blank or non-numeric text is `None`.
    fn parse_text(text: &str) -> Option<f64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Ok(value) = parse_inches(text) {
            return Some(value);
        }
        let unsigned = text.trim_start_matches(['+', '-']);
        unsigned
            .starts_with(|c: char| c.is_ascii_digit() || c == '.')
            .then(|| parse_dimension(text))
    }

    fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_text(&s),
            _ => None,
        };
        Ok(value.filter(|v| v.is_finite()))
    }

    pub fn zero_if_invalid<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(number(deserializer)?.unwrap_or(0.0))
    }

    pub fn box_gap<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(number(deserializer)?.unwrap_or(DEFAULT_BOX_GAP))
    }

    /// Rounded, then clamped to the valid box count range.
    pub fn box_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(number(deserializer)?
            .map(|n| n.round().clamp(MIN_BOX_COUNT as f64, MAX_BOX_COUNT as f64) as usize)
            .unwrap_or(MIN_BOX_COUNT))
    }
}

/// Wall size in meters. Present when the layout is drawn wall-relative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSize {
    pub width: f64,
    pub height: f64,
}

/// Layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
}

/// Complete layout file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub version: String,
    pub metadata: LayoutMetadata,
    #[serde(default)]
    pub settings: LayoutSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall: Option<WallSize>,
}

impl LayoutDocument {
    /// Create a new layout document with default settings
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: LayoutMetadata {
                name: name.into(),
                created: now,
                modified: now,
                author: String::new(),
                description: String::new(),
            },
            settings: LayoutSettings::default(),
            wall: None,
        }
    }

    /// Create a document capturing `state`.
    pub fn from_state(name: impl Into<String>, state: &DiagramState) -> Self {
        let mut doc = Self::new(name);
        doc.update_from_state(state);
        doc
    }

    /// Replaces the settings with those of `state` and bumps `modified`.
    pub fn update_from_state(&mut self, state: &DiagramState) {
        self.settings = LayoutSettings::from_state(state);
        self.wall = match state.policy() {
            ScalePolicy::ScreenFit => None,
            ScalePolicy::WallRelative => Some(WallSize {
                width: state.config().wall_width,
                height: state.config().wall_height,
            }),
        };
        self.touch();
    }

    pub fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }

    pub fn policy(&self) -> ScalePolicy {
        if self.wall.is_some() {
            ScalePolicy::WallRelative
        } else {
            ScalePolicy::ScreenFit
        }
    }

    /// Builds a diagram from this document.
    pub fn to_state(&self, catalog: &ReferenceCatalog, constants: CanvasConstants) -> DiagramState {
        let mut state = DiagramState::new(constants, self.policy());
        if let Some(wall) = self.wall {
            state.set_wall_size(wall.width, wall.height);
        }
        self.settings.apply_to(&mut state, catalog);
        state
    }

    /// Checks the format version; only major version 1 is understood.
    pub fn check_version(&self) -> ledwall_core::Result<()> {
        let major = self.version.split('.').next().unwrap_or_default();
        if major == "1" {
            Ok(())
        } else {
            Err(DocumentError::UnsupportedVersion {
                version: self.version.clone(),
            }
            .into())
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize layout")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let doc: LayoutDocument = serde_json::from_str(json).context("Failed to parse layout")?;
        doc.check_version()?;
        Ok(doc)
    }

    /// Save layout to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json).context("Failed to write layout file")?;
        info!("Saved layout '{}' to {}", self.metadata.name, path.as_ref().display());
        Ok(())
    }

    /// Load layout from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read layout file")?;
        let doc = Self::from_json(&content)?;
        info!("Loaded layout '{}' from {}", doc.metadata.name, path.as_ref().display());
        Ok(doc)
    }
}
