//! Data model for decoded workbook rows.
//!
//! This module contains the types produced while reading a worksheet:
//! cell values, header-keyed records, and the fixed-field projected rows.

mod cell;
mod projected;
mod record;

pub use cell::CellValue;
pub use projected::{Field, ProjectedRow};
pub use record::Record;
