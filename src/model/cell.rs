//! Cell value model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-empty cell value.
///
/// Empty cells are never represented by a variant; callers use
/// `Option<CellValue>` and treat `None` as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Returns the text content if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value if this is a number cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a boolean cell.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Renders the value the way it reads in a header cell:
/// numbers rounded to 15 significant digits, booleans as `TRUE`/`FALSE`.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
        }
    }
}

/// Format a number with the 15 significant digits a spreadsheet keeps.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, use exponent notation
/// (`1E+21`, `1.5E-07`). Column width rules of General format are not applied.
fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let rounded: f64 = format!("{:.14e}", n).parse().unwrap_or(n);
    let magnitude = rounded.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return rounded.to_string();
    }

    let scientific = format!("{:.14e}", rounded);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}E{}{:02}", mantissa, sign, exponent.abs())
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}
