//! Header-keyed worksheet records.

use super::CellValue;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One worksheet row keyed by the header text of its columns.
///
/// Entries keep worksheet column order. Only non-empty cells are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, CellValue)>,
}

impl Record {
    /// Create a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `header`.
    ///
    /// Headers are unique within a worksheet, so a later insert under the same
    /// header replaces the earlier value.
    pub fn insert(&mut self, header: impl Into<String>, value: CellValue) {
        let header = header.into();
        match self.entries.iter_mut().find(|(h, _)| *h == header) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((header, value)),
        }
    }

    /// Look up the value stored under an exact, case-sensitive header.
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    /// Iterate over `(header, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.entries.iter().map(|(h, v)| (h.as_str(), v))
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the record has no values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (header, value) in iter {
            record.insert(header, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (header, value) in &self.entries {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}
