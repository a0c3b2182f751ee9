//! # sheetpick
//!
//! Fetch an Excel workbook, read its first sheet, and project every row onto
//! a fixed set of named columns.
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> sheetpick::Result<()> {
//! use sheetpick::{extract_rows, Field};
//!
//! let rows = extract_rows("https://example.com/techniques.xlsx").await?;
//! for row in &rows {
//!     match row.get(Field::Display) {
//!         Some(display) => println!("{}", display),
//!         None => println!("(no display)"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The first row of the sheet is the header row; each later non-blank row is
//! keyed by those headers and reduced to the nine fields in [`Field::ALL`].
//! A field the row has no value for is `None`.
//!
//! ## Working with bytes
//!
//! ```no_run
//! let data = std::fs::read("techniques.xlsx")?;
//!
//! // Every column of the first sheet
//! let records = sheetpick::read_records(&data)?;
//!
//! // Only the fixed fields
//! let rows = sheetpick::project_records(&records);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `http` (default): fetch `http(s)` locations with `reqwest`

pub mod cell_ref;
pub mod container;
pub mod detect;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod records;
pub mod render;
pub mod xlsx;

// Re-exports
pub use detect::{detect_format_from_bytes, FormatType};
pub use error::{Error, ErrorKind, Result};
pub use extract::{extract_rows, extract_rows_with, project_bytes, project_records, read_records};
pub use fetch::{ByteSource, DefaultSource, FetchConfig, Location};
pub use model::{CellValue, Field, ProjectedRow, Record};
