//! Unit conversion utilities
//!
//! Handles conversion between inches and meters, rounding to the nearest
//! eighth of an inch, and lenient parsing of user-entered and spreadsheet values.
//! Supports decimal and fractional inch parsing and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meters per inch
pub const METERS_PER_INCH: f64 = 0.0254;

/// Rounding resolution for displayed and stored inch values
pub const EIGHTH: f64 = 0.125;

/// Length unit used for labels and input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Inches (fractional, eighth resolution)
    #[default]
    Inches,
    /// Meters
    Meters,
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inches => write!(f, "Inches"),
            Self::Meters => write!(f, "Meters"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inches" | "inch" | "in" => Ok(Self::Inches),
            "meters" | "metres" | "m" => Ok(Self::Meters),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Rounds a value to the nearest 1/8.
///
/// The fractional part is compared against the nine candidates `0, 1/8, .., 1`
/// and the closest one wins; on an exact tie the lower candidate is kept. A
/// winning candidate of `1` carries into the integer part. Negative values are
/// rounded symmetrically (`-5.3` becomes `-5.25`).
///
/// Non-finite input is returned unchanged.
pub fn round_to_nearest_eighth(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let whole = value.trunc();
    let fraction = (value - whole).abs();

    let mut best = 0.0;
    let mut best_distance = f64::INFINITY;
    for step in 0..=8 {
        let candidate = f64::from(step) * EIGHTH;
        let distance = (fraction - candidate).abs();
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }

    if value.is_sign_negative() {
        whole - best
    } else {
        whole + best
    }
}

/// Converts inches to meters.
pub fn inches_to_meters(inches: f64) -> f64 {
    inches * METERS_PER_INCH
}

/// Converts meters to inches.
pub fn meters_to_inches(meters: f64) -> f64 {
    meters / METERS_PER_INCH
}

/// Parses the leading number of a reference-data cell.
///
/// Behaves like a lenient spreadsheet read: `"54.5 in"` yields `54.5`,
/// surrounding whitespace is ignored, and anything without a leading number
/// (including an empty cell) yields `0`.
pub fn parse_dimension(input: &str) -> f64 {
    let input = input.trim();
    let bytes = input.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    let number = &input[..end];
    if !number[digits_start..].bytes().any(|b| b.is_ascii_digit()) {
        return 0.0;
    }

    number
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Parses a user-entered inch value.
///
/// Accepts decimal (`"0.3"`) and fractional (`"5 1/4"`, `"3/8"`) input with an
/// optional leading sign and an optional trailing `"` or `in`. An empty string
/// is zero.
pub fn parse_inches(input: &str) -> Result<f64, String> {
    let mut input = input.trim();
    if let Some(stripped) = input.strip_suffix('"') {
        input = stripped.trim_end();
    } else if let Some(stripped) = input.strip_suffix("in") {
        input = stripped.trim_end();
    }
    if input.is_empty() {
        return Ok(0.0);
    }

    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let mut total_inches = 0.0;
    for part in body.split_whitespace() {
        if part.contains('/') {
            let frac_parts: Vec<&str> = part.split('/').collect();
            if frac_parts.len() != 2 {
                return Err("Invalid fraction format".to_string());
            }
            let num = frac_parts[0]
                .parse::<f64>()
                .map_err(|_| "Invalid numerator")?;
            let den = frac_parts[1]
                .parse::<f64>()
                .map_err(|_| "Invalid denominator")?;
            if den == 0.0 {
                return Err("Division by zero".to_string());
            }
            total_inches += num / den;
        } else {
            total_inches += part.parse::<f64>().map_err(|e| e.to_string())?;
        }
    }

    if !total_inches.is_finite() {
        return Err(format!("Value out of range: {}", input));
    }

    Ok(if negative { -total_inches } else { total_inches })
}

/// Formats an inch value as a fractional label rounded to the nearest 1/8.
///
/// `5.25` becomes `5 1/4"`, `0.375` becomes `3/8"` and `12.0` becomes `12"`.
pub fn format_inches(inches: f64) -> String {
    let rounded = round_to_nearest_eighth(inches);
    if !rounded.is_finite() {
        return format!("{}\"", rounded);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    let eighths = (rounded.abs() / EIGHTH).round() as u64;
    let whole = eighths / 8;
    let mut numerator = eighths % 8;
    let mut denominator = 8;
    while numerator != 0 && numerator % 2 == 0 {
        numerator /= 2;
        denominator /= 2;
    }

    match (whole, numerator) {
        (w, 0) => format!("{}{}\"", sign, w),
        (0, n) => format!("{}{}/{}\"", sign, n, denominator),
        (w, n) => format!("{}{} {}/{}\"", sign, w, n, denominator),
    }
}

/// Formats a length given in inches for display in the requested unit.
pub fn format_length(inches: f64, unit: LengthUnit) -> String {
    match unit {
        LengthUnit::Inches => format_inches(inches),
        LengthUnit::Meters => format!("{:.2} m", inches_to_meters(inches)),
    }
}
