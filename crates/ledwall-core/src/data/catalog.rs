//! Reference catalog: equipment tables loaded from spreadsheet exports.
//!
//! One table per [`EquipmentCategory`]. Tables come either from a directory of
//! CSV files (`screens.csv`, `mounts.csv`, `media_players.csv`,
//! `receptacle_boxes.csv`) or from a single JSON object keyed by the same names.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use super::{EquipmentCategory, PhysicalSpec, ReferenceRecord};
use crate::error::{CatalogError, Result};

/// Reference records grouped by equipment category.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    tables: BTreeMap<EquipmentCategory, Vec<ReferenceRecord>>,
}

impl ReferenceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to a category table.
    pub fn add_record(&mut self, category: EquipmentCategory, record: ReferenceRecord) {
        self.tables.entry(category).or_default().push(record);
    }

    /// Records of one category, in source order.
    pub fn records(&self, category: EquipmentCategory) -> &[ReferenceRecord] {
        self.tables
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Identifiers of one category, in source order.
    pub fn ids(&self, category: EquipmentCategory) -> Vec<&str> {
        self.records(category)
            .iter()
            .filter_map(|record| record.id(category))
            .collect()
    }

    /// Finds the first record whose identifying column matches `id`.
    pub fn find(&self, category: EquipmentCategory, id: &str) -> Option<&ReferenceRecord> {
        let wanted = id.trim();
        if wanted.is_empty() {
            return None;
        }
        self.records(category)
            .iter()
            .find(|record| record.id(category) == Some(wanted))
    }

    /// Resolves an identifier straight to a [`PhysicalSpec`].
    pub fn spec(&self, category: EquipmentCategory, id: &str) -> Option<PhysicalSpec> {
        self.find(category, id)
            .map(|record| PhysicalSpec::from_record(record, category))
    }

    /// Total number of records across all tables.
    pub fn len(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// Whether no table holds any record.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads one category table from CSV.
    ///
    /// The header row names the columns; it must include the category's
    /// identifying column.
    pub fn load_csv<R: Read>(&mut self, category: EquipmentCategory, reader: R) -> Result<usize> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let id_column = category.id_column();
        if !headers
            .iter()
            .any(|header| header.trim().eq_ignore_ascii_case(id_column))
        {
            return Err(CatalogError::MissingIdColumn {
                category: category.to_string(),
                column: id_column.to_string(),
            }
            .into());
        }

        let mut count = 0;
        for result in rdr.records() {
            let row = result?;
            let mut record = ReferenceRecord::new();
            for (header, value) in headers.iter().zip(row.iter()) {
                record.insert(header, value);
            }
            if record.id(category).is_none() {
                debug!("Skipping {} row without identifier", category);
                continue;
            }
            self.add_record(category, record);
            count += 1;
        }

        debug!("Loaded {} {} records", count, category);
        Ok(count)
    }

    /// Loads every `<slug>.csv` found in `dir`. Missing tables stay empty.
    pub fn load_csv_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut catalog = Self::new();
        for category in EquipmentCategory::ALL {
            let path = dir.join(format!("{}.csv", category.slug()));
            if !path.exists() {
                debug!("No {} table at {}", category, path.display());
                continue;
            }
            let file = std::fs::File::open(&path)?;
            catalog.load_csv(category, file)?;
        }
        info!(
            "Reference catalog loaded from {} ({} records)",
            dir.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Parses a JSON catalog: an object keyed by category holding arrays of
    /// row objects. Cell values may be strings or numbers.
    pub fn from_json(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(tables) = root else {
            return Err(CatalogError::Malformed {
                reason: "expected an object keyed by category".to_string(),
            }
            .into());
        };

        let mut catalog = Self::new();
        for (key, rows) in tables {
            let category: EquipmentCategory = key.parse()?;
            let Value::Array(rows) = rows else {
                return Err(CatalogError::Malformed {
                    reason: format!("table '{}' is not an array", key),
                }
                .into());
            };
            for row in rows {
                let Value::Object(cells) = row else {
                    return Err(CatalogError::Malformed {
                        reason: format!("row in '{}' is not an object", key),
                    }
                    .into());
                };
                let mut record = ReferenceRecord::new();
                for (column, cell) in cells {
                    let text = match cell {
                        Value::String(s) => s,
                        Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    record.insert(column, text);
                }
                catalog.add_record(category, record);
            }
        }
        Ok(catalog)
    }

    /// Reads a JSON catalog file.
    pub fn load_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json(&content)?;
        info!(
            "Reference catalog loaded from {} ({} records)",
            path.as_ref().display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Loads a catalog from a CSV directory or a JSON file, by path type.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::load_csv_dir(path)
        } else {
            Self::load_json_file(path)
        }
    }
}
