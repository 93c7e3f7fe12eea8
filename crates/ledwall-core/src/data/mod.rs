//! Reference data module
//!
//! This module provides:
//! - Equipment categories (screen, mount, media player, receptacle box)
//! - Raw reference records as delivered by a spreadsheet export
//! - `PhysicalSpec`, the validated shape the layout engine works with
//! - The `ReferenceCatalog` that holds records per category

pub mod catalog;

pub use catalog::ReferenceCatalog;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;
use crate::units::parse_dimension;

/// Column holding the width in inches
pub const WIDTH_COLUMN: &str = "Width";
/// Column holding the height in inches
pub const HEIGHT_COLUMN: &str = "Height";
/// Column holding the depth in inches
pub const DEPTH_COLUMN: &str = "Depth";

/// Equipment categories with a reference table each
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    /// LED screen models
    Screen,
    /// Wall mounts
    Mount,
    /// Media players mounted behind the screen
    MediaPlayer,
    /// In-wall receptacle boxes
    ReceptacleBox,
}

impl EquipmentCategory {
    /// All categories in table order
    pub const ALL: [EquipmentCategory; 4] = [
        Self::Screen,
        Self::Mount,
        Self::MediaPlayer,
        Self::ReceptacleBox,
    ];

    /// Column used to match a record against a stored selection.
    pub fn id_column(&self) -> &'static str {
        match self {
            Self::Screen => "Screen MFR",
            Self::Mount | Self::MediaPlayer | Self::ReceptacleBox => "MFG. PART",
        }
    }

    /// File-name and JSON key form of the category.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Screen => "screens",
            Self::Mount => "mounts",
            Self::MediaPlayer => "media_players",
            Self::ReceptacleBox => "receptacle_boxes",
        }
    }
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Screen => write!(f, "Screen"),
            Self::Mount => write!(f, "Mount"),
            Self::MediaPlayer => write!(f, "Media Player"),
            Self::ReceptacleBox => write!(f, "Receptacle Box"),
        }
    }
}

impl FromStr for EquipmentCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|category| {
                category.slug() == normalized
                    || category.to_string().to_lowercase().replace(' ', "_") == normalized
            })
            .ok_or_else(|| CatalogError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

/// A raw reference-data row: column name to cell text.
///
/// Column lookups are case-insensitive and ignore surrounding whitespace, since
/// spreadsheet headers are hand-maintained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceRecord {
    columns: BTreeMap<String, String>,
}

impl ReferenceRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a column value.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Inserts or replaces a column value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Looks up a column value.
    pub fn get(&self, column: &str) -> Option<&str> {
        let wanted = column.trim();
        self.columns
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, value)| value.as_str())
    }

    /// Numeric value of a column; absent or unparsable cells are `0`.
    pub fn number(&self, column: &str) -> f64 {
        self.get(column).map(parse_dimension).unwrap_or(0.0)
    }

    /// Identifier of this record within `category`, if present and non-empty.
    pub fn id(&self, category: EquipmentCategory) -> Option<&str> {
        self.get(category.id_column())
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Iterates over `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Physical dimensions of a selected item, in inches.
///
/// Always non-negative and finite; the identifier is only used for matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSpec {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl PhysicalSpec {
    /// Creates a spec, coercing invalid dimensions to zero.
    pub fn new(id: impl Into<String>, width: f64, height: f64, depth: f64) -> Self {
        Self {
            id: id.into(),
            width: sanitize(width),
            height: sanitize(height),
            depth: sanitize(depth),
        }
    }

    /// Narrows a reference record into a spec.
    ///
    /// Missing, unparsable, negative or non-finite cells become `0`.
    pub fn from_record(record: &ReferenceRecord, category: EquipmentCategory) -> Self {
        Self::new(
            record.id(category).unwrap_or_default(),
            record.number(WIDTH_COLUMN),
            record.number(HEIGHT_COLUMN),
            record.number(DEPTH_COLUMN),
        )
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
