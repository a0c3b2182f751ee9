//! Utilities for parsing A1-style cell references and ranges.

/// Zero-based position of a cell in a worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellPos {
    pub row: u32,
    pub col: u32,
}

impl CellPos {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Inclusive rectangular range of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPos,
    pub end: CellPos,
}

impl CellRange {
    /// A range covering exactly one cell.
    pub fn single(pos: CellPos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Grow the range so that it covers `pos`.
    pub fn extend_to(&mut self, pos: CellPos) {
        self.start.row = self.start.row.min(pos.row);
        self.start.col = self.start.col.min(pos.col);
        self.end.row = self.end.row.max(pos.row);
        self.end.col = self.end.col.max(pos.col);
    }
}

/// Parse a cell reference like "B3" or "$B$3" from raw attribute bytes.
///
/// Letters must precede digits. Returns `None` for anything else.
pub fn parse_cell_ref(ref_bytes: &[u8]) -> Option<CellPos> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for &b in ref_bytes.iter().filter(|&&b| b != b'$') {
        if b.is_ascii_alphabetic() && !saw_row {
            let upper = b.to_ascii_uppercase();
            col = col.checked_mul(26)?.checked_add(u32::from(upper - b'A') + 1)?;
            saw_col = true;
        } else if b.is_ascii_digit() && saw_col {
            row = row.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return None;
    }

    Some(CellPos::new(row - 1, col - 1))
}

/// Parse a range like "A1:C10" or a single reference like "A1".
pub fn parse_cell_range(range: &str) -> Option<CellRange> {
    let range = range.trim();
    match range.split_once(':') {
        Some((start, end)) => {
            let start = parse_cell_ref(start.as_bytes())?;
            let end = parse_cell_ref(end.as_bytes())?;
            let mut normalized = CellRange::single(start);
            normalized.extend_to(end);
            Some(normalized)
        }
        None => parse_cell_ref(range.as_bytes()).map(CellRange::single),
    }
}

/// Parse a 1-based row number attribute (`<row r="5">`) into a zero-based index.
pub fn parse_row_number(value: &[u8]) -> Option<u32> {
    let row: u32 = std::str::from_utf8(value).ok()?.trim().parse().ok()?;
    row.checked_sub(1)
}
