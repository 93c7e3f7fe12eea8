//! # LEDWall
//!
//! Installation diagram engine for wall-mounted LED screens:
//! - Physical dimension derivation (oriented screen, niche margins, 1/8" depth)
//! - Scaled front and side views under a screen-fit or wall-relative policy
//! - Draggable receptacle boxes clamped to the screen
//! - Layout documents stored as JSON, rendered to SVG
//!
//! ## Architecture
//!
//! LEDWall is organized as a workspace with multiple crates:
//!
//! 1. **ledwall-core** - Units, errors, reference catalog
//! 2. **ledwall-designer** - Dimensions, layout engine, boxes, SVG, layout documents
//! 3. **ledwall-settings** - Configuration and layout storage
//! 4. **ledwall** - Command-line binary that integrates all crates

pub mod cli;

pub use ledwall_designer as designer;
pub use ledwall_settings as settings;

pub use ledwall_core::{EquipmentCategory, PhysicalSpec, ReferenceCatalog};
pub use ledwall_designer::{
    svg_renderer, DiagramState, LayoutDocument, LayoutEngine, ReceptacleBoxStore, ScalePolicy,
};
pub use ledwall_settings::{Config, FileLayoutRepository, LayoutRepository};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr (stdout carries rendered SVG)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(LogFormat::Pretty, tracing::Level::INFO)
}

/// Initialize logging with an explicit format and minimum level
pub fn init_logging_with(format: LogFormat, level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();
            registry.with(fmt_layer).try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(false);
            registry.with(fmt_layer).try_init()?;
        }
    }

    Ok(())
}
