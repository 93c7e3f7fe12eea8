//! Layout storage
//!
//! Saves, loads, lists and deletes layout documents behind the
//! [`LayoutRepository`] trait. Documents are identified by UUID v4 strings.
//! [`FileLayoutRepository`] keeps one pretty-printed JSON file per document;
//! [`MemoryLayoutRepository`] keeps them in a map for tests and embedding.

use chrono::{DateTime, Utc};
use ledwall_designer::serialization::LayoutDocument;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{PersistenceError, PersistenceResult};

const LAYOUT_EXTENSION: &str = "json";

/// Listing entry for a stored layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSummary {
    pub id: String,
    pub name: String,
    pub modified: DateTime<Utc>,
}

impl LayoutSummary {
    fn new(id: &str, document: &LayoutDocument) -> Self {
        Self {
            id: id.to_string(),
            name: document.metadata.name.clone(),
            modified: document.metadata.modified,
        }
    }
}

/// Storage for layout documents.
pub trait LayoutRepository {
    /// Stores `document` under a fresh id and returns it.
    fn save(&mut self, document: &LayoutDocument) -> PersistenceResult<String>;

    /// Overwrites the document stored under `id`.
    fn update(&mut self, id: &str, document: &LayoutDocument) -> PersistenceResult<()>;

    fn load(&self, id: &str) -> PersistenceResult<LayoutDocument>;

    /// All stored layouts, most recently modified first.
    fn list(&self) -> PersistenceResult<Vec<LayoutSummary>>;

    fn delete(&mut self, id: &str) -> PersistenceResult<()>;
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Accepts only canonical UUIDs so ids never escape the storage directory.
fn check_id(id: &str) -> PersistenceResult<()> {
    match Uuid::parse_str(id) {
        Ok(uuid) if uuid.hyphenated().to_string() == id => Ok(()),
        _ => Err(PersistenceError::invalid_id(id)),
    }
}

fn sort_newest_first(summaries: &mut [LayoutSummary]) {
    summaries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
}

/// One JSON file per layout in a directory
#[derive(Debug, Clone)]
pub struct FileLayoutRepository {
    dir: PathBuf,
}

impl FileLayoutRepository {
    /// Opens (creating if needed) the repository at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> PersistenceResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        debug!("Layout repository at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", id, LAYOUT_EXTENSION))
    }

    fn write(&self, id: &str, document: &LayoutDocument) -> PersistenceResult<()> {
        let json = serde_json::to_string_pretty(document)?;
        std::fs::write(self.path_for(id), json)?;
        info!("Saved layout '{}' as {}", document.metadata.name, id);
        Ok(())
    }

    fn read(&self, id: &str) -> PersistenceResult<LayoutDocument> {
        let path = self.path_for(id);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::not_found(id))
            }
            Err(e) => return Err(e.into()),
        };
        let document: LayoutDocument =
            serde_json::from_str(&content).map_err(|e| PersistenceError::Corrupted {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        document.check_version()?;
        Ok(document)
    }
}

impl LayoutRepository for FileLayoutRepository {
    fn save(&mut self, document: &LayoutDocument) -> PersistenceResult<String> {
        let id = new_id();
        self.write(&id, document)?;
        Ok(id)
    }

    fn update(&mut self, id: &str, document: &LayoutDocument) -> PersistenceResult<()> {
        check_id(id)?;
        if !self.path_for(id).exists() {
            return Err(PersistenceError::not_found(id));
        }
        self.write(id, document)
    }

    fn load(&self, id: &str) -> PersistenceResult<LayoutDocument> {
        check_id(id)?;
        let document = self.read(id)?;
        info!("Loaded layout '{}' ({})", document.metadata.name, id);
        Ok(document)
    }

    fn list(&self) -> PersistenceResult<Vec<LayoutSummary>> {
        let mut summaries = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(LAYOUT_EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if check_id(id).is_err() {
                continue;
            }
            match self.read(id) {
                Ok(document) => summaries.push(LayoutSummary::new(id, &document)),
                Err(e) => warn!("Skipping unreadable layout {}: {}", path.display(), e),
            }
        }
        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    fn delete(&mut self, id: &str) -> PersistenceResult<()> {
        check_id(id)?;
        match std::fs::remove_file(self.path_for(id)) {
            Ok(()) => {
                info!("Deleted layout {}", id);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PersistenceError::not_found(id))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory layout storage
#[derive(Debug, Clone, Default)]
pub struct MemoryLayoutRepository {
    documents: BTreeMap<String, LayoutDocument>,
}

impl MemoryLayoutRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl LayoutRepository for MemoryLayoutRepository {
    fn save(&mut self, document: &LayoutDocument) -> PersistenceResult<String> {
        let id = new_id();
        self.documents.insert(id.clone(), document.clone());
        Ok(id)
    }

    fn update(&mut self, id: &str, document: &LayoutDocument) -> PersistenceResult<()> {
        match self.documents.get_mut(id) {
            Some(stored) => {
                *stored = document.clone();
                Ok(())
            }
            None => Err(PersistenceError::not_found(id)),
        }
    }

    fn load(&self, id: &str) -> PersistenceResult<LayoutDocument> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found(id))
    }

    fn list(&self) -> PersistenceResult<Vec<LayoutSummary>> {
        let mut summaries: Vec<_> = self
            .documents
            .iter()
            .map(|(id, doc)| LayoutSummary::new(id, doc))
            .collect();
        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    fn delete(&mut self, id: &str) -> PersistenceResult<()> {
        self.documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| PersistenceError::not_found(id))
    }
}
