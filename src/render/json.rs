//! JSON renderer implementation.

use crate::error::{Error, Result};
use serde::Serialize;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Serialize rows (projected rows or records) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(value),
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
    };
    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize with default (pretty) formatting.
pub fn to_json_default<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    to_json(value, JsonFormat::Pretty)
}
