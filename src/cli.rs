//! Command-line interface.
//!
//! ```text
//! ledwall [--config FILE] [--json-logs] [-v] render <LAYOUT> [--catalog PATH] [--output FILE]
//! ledwall new <NAME> [--output FILE]
//! ledwall list
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledwall_core::units::format_length;
use ledwall_core::ReferenceCatalog;
use ledwall_designer::serialization::{LayoutDocument, WallSize};
use ledwall_designer::svg_renderer::render_document;
use ledwall_designer::ScalePolicy;
use ledwall_settings::{Config, FileLayoutRepository, LayoutRepository};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "ledwall", author, version, about = "LED video-wall installation diagrams")]
pub struct Cli {
    /// Config file (.toml or .json); defaults to the platform config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Log debug events
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a layout document to SVG
    Render {
        /// Layout file, or the id of a stored layout
        layout: String,
        /// Catalog directory (CSV per category) or JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Write the SVG here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create a layout document with default settings
    New {
        name: String,
        /// Write to this file instead of the layout store
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List stored layouts
    List,
}

impl Cli {
    pub fn log_format(&self) -> LogFormat {
        if self.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// Loads the config named on the command line, or the platform default.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            Err(e) => {
                warn!("{}; using default config", e);
                Ok(Config::default())
            }
        },
    }
}

fn load_catalog(path: &Path) -> Result<ReferenceCatalog> {
    if !path.exists() {
        warn!(
            "Catalog {} not found; equipment selections will be empty",
            path.display()
        );
        return Ok(ReferenceCatalog::new());
    }
    ReferenceCatalog::load(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))
}

fn load_layout(config: &Config, layout: &str) -> Result<LayoutDocument> {
    let path = Path::new(layout);
    if path.exists() {
        return LayoutDocument::load_from_file(path);
    }
    let repo = FileLayoutRepository::open(&config.storage.layouts_dir)?;
    repo.load(layout)
        .with_context(|| format!("No layout file or stored layout named '{}'", layout))
}

/// Renders `layout` to SVG.
pub fn render(config: &Config, layout: &str, catalog: Option<&Path>) -> Result<String> {
    let catalog = load_catalog(catalog.unwrap_or(config.storage.catalog_path.as_path()))?;
    let document = load_layout(config, layout)?;
    let state = document.to_state(&catalog, config.canvas);

    let dims = state.dimensions();
    let unit = config.defaults.unit;
    info!(
        "Rendering '{}': niche {} x {} x {}",
        document.metadata.name,
        format_length(dims.niche_width, unit),
        format_length(dims.niche_height, unit),
        format_length(dims.niche_depth, unit)
    );
    Ok(render_document(&state))
}

/// Builds a new document from the configured defaults.
pub fn new_document(config: &Config, name: &str) -> LayoutDocument {
    let mut document = LayoutDocument::new(name);
    document.metadata.author = config.defaults.author.clone();
    if config.defaults.policy == ScalePolicy::WallRelative {
        document.wall = Some(WallSize {
            width: config.defaults.wall_width,
            height: config.defaults.wall_height,
        });
    }
    document
}

/// Executes `cli`, writing command output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Command::Render {
            layout,
            catalog,
            output,
        } => {
            let svg = render(&config, layout, catalog.as_deref())?;
            match output {
                Some(path) => {
                    std::fs::write(path, svg)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
                None => out.write_all(svg.as_bytes())?,
            }
        }
        Command::New { name, output } => {
            let document = new_document(&config, name);
            match output {
                Some(path) => {
                    document.save_to_file(path)?;
                    writeln!(out, "{}", path.display())?;
                }
                None => {
                    let mut repo = FileLayoutRepository::open(&config.storage.layouts_dir)?;
                    let id = repo.save(&document)?;
                    writeln!(out, "{}", id)?;
                }
            }
        }
        Command::List => {
            let repo = FileLayoutRepository::open(&config.storage.layouts_dir)?;
            for summary in repo.list()? {
                writeln!(
                    out,
                    "{}  {}  {}",
                    summary.id,
                    summary.modified.format("%Y-%m-%d %H:%M"),
                    summary.name
                )?;
            }
        }
    }

    Ok(())
}
