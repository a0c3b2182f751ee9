//! XLSX (Excel) workbook decoding.
//!
//! This module reads Office Open XML workbooks (.xlsx, .xlsm) into a plain
//! cell grid per worksheet.
//!
//! # Example
//!
//! ```no_run
//! use sheetpick::xlsx::WorkbookReader;
//!
//! let data = std::fs::read("techniques.xlsx")?;
//! let reader = WorkbookReader::from_bytes(data)?;
//! let sheet = reader.first_sheet()?;
//! println!("First sheet: {}", sheet.name());
//! # Ok::<(), sheetpick::Error>(())
//! ```

mod parser;
mod shared_strings;
mod worksheet;

pub use parser::WorkbookReader;
pub use shared_strings::SharedStrings;
pub use worksheet::Worksheet;
