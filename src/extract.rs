//! The row extraction pipeline: fetch, decode, first sheet, records, projection.

use crate::error::Result;
use crate::fetch::{ByteSource, DefaultSource, Location};
use crate::model::{ProjectedRow, Record};
use crate::records::sheet_to_records;
use crate::xlsx::WorkbookReader;
use tracing::debug;

/// Fetch a workbook and project every record of its first sheet onto the
/// fixed fields.
///
/// `location` is a local path or an `http(s)` URL. Rows come back in sheet
/// order; a field the sheet has no column for is `None` in every row.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> sheetpick::Result<()> {
/// let rows = sheetpick::extract_rows("https://example.com/techniques.xlsx").await?;
/// for row in &rows {
///     println!("{:?}", row.display);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn extract_rows(location: &str) -> Result<Vec<ProjectedRow>> {
    let source = DefaultSource::new()?;
    extract_rows_with(&source, &Location::parse(location)?).await
}

/// Like [`extract_rows`], with the bytes supplied by `source`.
pub async fn extract_rows_with<S: ByteSource>(
    source: &S,
    location: &Location,
) -> Result<Vec<ProjectedRow>> {
    let bytes = source.fetch(location).await?;
    debug!(%location, bytes = bytes.len(), "extracting rows");
    project_bytes(&bytes)
}

/// Decode workbook bytes and project the first sheet's records.
pub fn project_bytes(data: &[u8]) -> Result<Vec<ProjectedRow>> {
    let records = read_records(data)?;
    Ok(project_records(&records))
}

/// Decode workbook bytes into the first sheet's records, all columns kept.
pub fn read_records(data: &[u8]) -> Result<Vec<Record>> {
    let reader = WorkbookReader::from_bytes(data.to_vec())?;
    let sheet = reader.first_sheet()?;
    Ok(sheet_to_records(&sheet))
}

/// Project records onto the fixed fields, preserving order.
pub fn project_records(records: &[Record]) -> Vec<ProjectedRow> {
    records.iter().map(ProjectedRow::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use crate::model::CellValue;
    use std::collections::HashMap;

    /// Serves fixed bytes per location.
    struct MemorySource {
        files: HashMap<String, Vec<u8>>,
    }

    impl ByteSource for MemorySource {
        async fn fetch(&self, location: &Location) -> Result<Vec<u8>> {
            self.files
                .get(&location.to_string())
                .cloned()
                .ok_or_else(|| Error::fetch(location, "not found"))
        }
    }

    #[test]
    fn test_project_records_keeps_order_and_length() {
        let records: Vec<Record> = ["first", "second", "third"]
            .into_iter()
            .map(|name| [("Display", CellValue::from(name))].into_iter().collect())
            .collect();

        let rows = project_records(&records);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].display, Some(CellValue::from("first")));
        assert_eq!(rows[2].display, Some(CellValue::from("third")));
    }

    #[test]
    fn test_rows_without_known_fields_are_kept() {
        let records: Vec<Record> = vec![[("Other", CellValue::from(1.0))].into_iter().collect()];
        let rows = project_records(&records);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_empty());
    }

    #[test]
    fn test_project_bytes_rejects_text() {
        let err = project_bytes(b"Display\tOverview\nWalking\tdesc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let source = MemorySource {
            files: HashMap::new(),
        };
        let err = extract_rows_with(&source, &Location::parse("missing.xlsx").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }

    #[tokio::test]
    async fn test_decode_failure_propagates() {
        let source = MemorySource {
            files: HashMap::from([("notes.txt".to_string(), b"plain text".to_vec())]),
        };
        let err = extract_rows_with(&source, &Location::parse("notes.txt").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownFormat));
    }
}
