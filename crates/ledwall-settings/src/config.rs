//! Configuration and settings management for LEDWall
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Canvas constants (drawing space, scale bounds, fixed positions)
//! - Storage locations (reference catalog, saved layouts)
//! - Diagram defaults (scale policy, wall size, author)

pub use ledwall_core::units::LengthUnit;
use ledwall_designer::layout::{CanvasConstants, ScalePolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ConfigError, SettingsError, SettingsResult};

const APP_DIR: &str = "ledwall";

/// Where reference data and saved layouts live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Catalog source: a directory of per-category CSV files or a JSON file
    pub catalog_path: PathBuf,
    /// Directory holding one JSON file per saved layout
    pub layouts_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self {
            catalog_path: base.join("catalog"),
            layouts_dir: base.join("layouts"),
        }
    }
}

/// Defaults applied to new diagrams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramDefaults {
    /// Scale policy for new layouts
    pub policy: ScalePolicy,
    /// Wall width in meters (wall-relative layouts)
    pub wall_width: f64,
    /// Wall height in meters (wall-relative layouts)
    pub wall_height: f64,
    /// Unit used when echoing dimensions on the command line
    pub unit: LengthUnit,
    /// Author recorded in new layout documents
    pub author: String,
}

impl Default for DiagramDefaults {
    fn default() -> Self {
        Self {
            policy: ScalePolicy::ScreenFit,
            wall_width: 4.0,
            wall_height: 2.7,
            unit: LengthUnit::Inches,
            author: String::new(),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Drawing-space constants
    pub canvas: CanvasConstants,
    /// Storage locations
    pub storage: StorageSettings,
    /// New-diagram defaults
    pub defaults: DiagramDefaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string()).into()),
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        }
        .into())
    }
}

fn non_negative(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        }
        .into())
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file location, e.g. `~/.config/ledwall/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        Ok(dir.join(APP_DIR).join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let c = &self.canvas;
        positive("canvas.canvas_width", c.canvas_width)?;
        positive("canvas.canvas_height", c.canvas_height)?;
        positive("canvas.max_pixels_per_inch", c.max_pixels_per_inch)?;
        positive("canvas.min_scale", c.min_scale)?;
        positive("canvas.max_pixel_width", c.max_pixel_width)?;
        positive("canvas.max_pixel_height", c.max_pixel_height)?;
        positive("canvas.max_wall_pixel_width", c.max_wall_pixel_width)?;
        positive("canvas.max_wall_pixel_height", c.max_wall_pixel_height)?;
        non_negative("canvas.min_pixel_size", c.min_pixel_size)?;
        non_negative("canvas.min_depth_px", c.min_depth_px)?;
        non_negative("canvas.wood_backing_inset", c.wood_backing_inset)?;
        non_negative(
            "canvas.wood_backing_inset_edge_to_edge",
            c.wood_backing_inset_edge_to_edge,
        )?;

        if c.min_scale > c.max_pixels_per_inch {
            return Err(SettingsError::InvalidSetting {
                key: "canvas.min_scale".into(),
                reason: "must not exceed max_pixels_per_inch".into(),
            });
        }
        if c.min_depth_px > c.max_depth_px {
            return Err(SettingsError::InvalidSetting {
                key: "canvas.min_depth_px".into(),
                reason: "must not exceed max_depth_px".into(),
            });
        }

        non_negative("defaults.wall_width", self.defaults.wall_width)?;
        non_negative("defaults.wall_height", self.defaults.wall_height)?;
        Ok(())
    }
}
