//! LEDWall Settings Crate
//!
//! Handles application configuration and layout document storage.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, DiagramDefaults, StorageSettings};
pub use error::{ConfigError, PersistenceError, PersistenceResult, SettingsError, SettingsResult};
pub use persistence::{
    FileLayoutRepository, LayoutRepository, LayoutSummary, MemoryLayoutRepository,
};
