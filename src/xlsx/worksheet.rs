//! Worksheet cell grid and its XML parser.

use crate::cell_ref::{parse_cell_range, parse_cell_ref, parse_row_number, CellPos, CellRange};
use crate::error::{Error, Result};
use crate::model::CellValue;
use quick_xml::events::{BytesStart, Event};
use std::collections::BTreeMap;

use super::shared_strings::{unescape_ooxml, SharedStrings};

/// A decoded worksheet: every non-empty cell keyed by position.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    name: String,
    cells: BTreeMap<CellPos, CellValue>,
    range: Option<CellRange>,
}

impl Worksheet {
    /// Create an empty worksheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sheet name as listed in the workbook.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The used range: the declared dimension extended to every populated cell.
    ///
    /// `None` for a sheet without cells or dimension.
    pub fn range(&self) -> Option<CellRange> {
        self.range
    }

    /// Value at a zero-based position.
    pub fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&CellPos::new(row, col))
    }

    /// Number of populated cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterate over populated cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, &CellValue)> {
        self.cells.iter().map(|(pos, value)| (*pos, value))
    }

    /// Store a value, growing the range to cover it.
    pub fn set_cell(&mut self, pos: CellPos, value: CellValue) {
        self.include(pos);
        self.cells.insert(pos, value);
    }

    fn include(&mut self, pos: CellPos) {
        match self.range.as_mut() {
            Some(range) => range.extend_to(pos),
            None => self.range = Some(CellRange::single(pos)),
        }
    }

    /// Grow the range to cover a declared `<dimension>`.
    pub fn set_dimension(&mut self, dimension: CellRange) {
        self.include(dimension.start);
        self.include(dimension.end);
    }
}

/// Cell being assembled while its element is open.
struct PendingCell {
    pos: CellPos,
    cell_type: Option<String>,
    value: String,
    has_value: bool,
}

/// Parse a worksheet part into a [`Worksheet`].
///
/// Cells are placed by their `r` reference; cells and rows without one follow
/// the previous cell or row.
pub(crate) fn parse_worksheet(
    name: &str,
    xml: &str,
    shared_strings: &SharedStrings,
) -> Result<Worksheet> {
    let mut sheet = Worksheet::new(name);
    let mut reader = quick_xml::Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut next_row: u32 = 0;
    let mut current_row: u32 = 0;
    let mut next_col: u32 = 0;
    let mut in_sheet_data = false;
    let mut pending: Option<PendingCell> = None;
    let mut in_value = false;
    let mut in_inline = false;
    let mut phonetic_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"sheetData" => in_sheet_data = true,
                b"row" if in_sheet_data => {
                    current_row = row_index(e, next_row);
                    next_row = current_row.saturating_add(1);
                    next_col = 0;
                }
                b"c" if in_sheet_data => {
                    let cell = start_cell(e, current_row, next_col);
                    next_col = cell.pos.col.saturating_add(1);
                    pending = Some(cell);
                }
                b"v" if pending.is_some() => in_value = true,
                b"is" if pending.is_some() => in_inline = true,
                b"rPh" => phonetic_depth += 1,
                b"t" if in_inline && phonetic_depth == 0 => in_value = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"dimension" => {
                    if let Some(range) = dimension_attr(e) {
                        sheet.set_dimension(range);
                    }
                }
                b"row" if in_sheet_data => {
                    current_row = row_index(e, next_row);
                    next_row = current_row.saturating_add(1);
                }
                b"c" if in_sheet_data => {
                    // Style-only cell, no value
                    let cell = start_cell(e, current_row, next_col);
                    next_col = cell.pos.col.saturating_add(1);
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_value => {
                let text = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                if let Some(cell) = pending.as_mut() {
                    cell.value.push_str(&text);
                    cell.has_value = true;
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"sheetData" => in_sheet_data = false,
                b"c" => {
                    if let Some(cell) = pending.take() {
                        if let Some(value) = resolve_cell_value(&cell, shared_strings) {
                            sheet.set_cell(cell.pos, value);
                        }
                    }
                    in_value = false;
                    in_inline = false;
                }
                b"v" => in_value = false,
                b"t" if in_inline => in_value = false,
                b"is" => in_inline = false,
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheet)
}

fn row_index(e: &BytesStart<'_>, fallback: u32) -> u32 {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"r")
        .and_then(|attr| parse_row_number(&attr.value))
        .unwrap_or(fallback)
}

fn start_cell(e: &BytesStart<'_>, row: u32, fallback_col: u32) -> PendingCell {
    let mut pos = CellPos::new(row, fallback_col);
    let mut cell_type = None;

    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"r" => {
                if let Some(parsed) = parse_cell_ref(&attr.value) {
                    pos = parsed;
                }
            }
            b"t" => cell_type = Some(String::from_utf8_lossy(&attr.value).to_string()),
            _ => {}
        }
    }

    PendingCell {
        pos,
        cell_type,
        value: String::new(),
        has_value: false,
    }
}

fn dimension_attr(e: &BytesStart<'_>) -> Option<CellRange> {
    let attr = e
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"ref")?;
    let text = String::from_utf8_lossy(&attr.value);
    let range = parse_cell_range(&text);
    if range.is_none() {
        tracing::warn!(dimension = %text, "ignoring unparseable worksheet dimension");
    }
    range
}

/// Turn the raw text of a cell into a value.
///
/// Error cells and cells without content yield `None`.
fn resolve_cell_value(cell: &PendingCell, shared_strings: &SharedStrings) -> Option<CellValue> {
    if !cell.has_value {
        return None;
    }
    let raw = cell.value.as_str();

    match cell.cell_type.as_deref() {
        Some("s") => {
            let resolved = raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| shared_strings.get(idx));
            if resolved.is_none() {
                tracing::warn!(index = raw, "shared string index out of range");
            }
            resolved.map(CellValue::from)
        }
        Some("b") => Some(CellValue::Bool(matches!(raw.trim(), "1" | "true" | "TRUE"))),
        Some("e") => None,
        Some("str") | Some("inlineStr") | Some("d") => {
            Some(CellValue::Text(unescape_ooxml(raw).into_owned()))
        }
        _ => match raw.trim().parse::<f64>() {
            Ok(n) => Some(CellValue::Number(n)),
            Err(_) if raw.is_empty() => None,
            Err(_) => Some(CellValue::Text(raw.to_string())),
        },
    }
}
