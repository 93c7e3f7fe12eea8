//! # LEDWall Core
//!
//! Core types and utilities for LEDWall.
//! Provides unit conversion, the error types shared by the workspace and the
//! reference-data model (equipment tables narrowed into physical specs).

pub mod data;
pub mod error;
pub mod units;

pub use data::{
    EquipmentCategory, PhysicalSpec, ReferenceCatalog, ReferenceRecord, DEPTH_COLUMN,
    HEIGHT_COLUMN, WIDTH_COLUMN,
};

pub use error::{CatalogError, DocumentError, Error, Result};

pub use units::{
    format_inches, format_length, inches_to_meters, meters_to_inches, parse_dimension,
    parse_inches, round_to_nearest_eighth, LengthUnit,
};
