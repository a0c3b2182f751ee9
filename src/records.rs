//! Worksheet to record conversion.
//!
//! The first row of the sheet's range is the header row. Every later row that
//! has at least one value becomes a [`Record`] mapping header text to value.

use crate::model::{CellValue, Record};
use crate::xlsx::Worksheet;
use std::collections::HashMap;

/// Header name used for a column whose header cell is empty.
pub const EMPTY_HEADER: &str = "__EMPTY";

/// Header names for each column of the sheet's range, left to right.
///
/// Empty header cells are named [`EMPTY_HEADER`]; repeated names get a
/// `_1`, `_2`, ... suffix so every column has a distinct key.
pub fn headers(sheet: &Worksheet) -> Vec<String> {
    let Some(range) = sheet.range() else {
        return Vec::new();
    };

    let mut seen: HashMap<String, usize> = HashMap::new();
    (range.start.col..=range.end.col)
        .map(|col| {
            let base = sheet
                .cell(range.start.row, col)
                .map(CellValue::to_string)
                .unwrap_or_else(|| EMPTY_HEADER.to_string());
            unique_header(base, &mut seen)
        })
        .collect()
}

fn unique_header(base: String, seen: &mut HashMap<String, usize>) -> String {
    let Some(&counter) = seen.get(&base) else {
        seen.insert(base.clone(), 1);
        return base;
    };

    let mut counter = counter;
    let mut candidate = format!("{}_{}", base, counter);
    while seen.contains_key(&candidate) {
        counter += 1;
        candidate = format!("{}_{}", base, counter);
    }
    seen.insert(base, counter + 1);
    seen.insert(candidate.clone(), 1);
    candidate
}

/// Convert a worksheet into records, one per non-blank row below the header.
pub fn sheet_to_records(sheet: &Worksheet) -> Vec<Record> {
    let Some(range) = sheet.range() else {
        return Vec::new();
    };
    let headers = headers(sheet);

    // Populated cells only, row-major
    let mut records: Vec<Record> = Vec::new();
    let mut current_row = None;
    for (pos, value) in sheet.cells().filter(|(pos, _)| pos.row > range.start.row) {
        let Some(header) = pos
            .col
            .checked_sub(range.start.col)
            .and_then(|offset| headers.get(offset as usize))
        else {
            continue;
        };

        if current_row != Some(pos.row) {
            current_row = Some(pos.row);
            records.push(Record::new());
        }
        if let Some(record) = records.last_mut() {
            record.insert(header.as_str(), value.clone());
        }
    }

    tracing::debug!(
        sheet = sheet.name(),
        columns = headers.len(),
        records = records.len(),
        "converted worksheet to records"
    );
    records
}
