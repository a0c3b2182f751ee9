//! Output rendering for extracted rows.
//!
//! # Example
//!
//! ```no_run
//! use sheetpick::render::{to_json, JsonFormat};
//!
//! let data = std::fs::read("techniques.xlsx")?;
//! let rows = sheetpick::project_bytes(&data)?;
//! let json = to_json(&rows, JsonFormat::Pretty)?;
//! println!("{}", json);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod json;

pub use json::{to_json, to_json_default, JsonFormat};
