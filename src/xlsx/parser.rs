//! XLSX workbook reader.

use crate::container::Package;
use crate::detect::{detect_format_from_bytes, FormatType};
use crate::error::{Error, Result};
use quick_xml::events::Event;
use std::path::Path;
use tracing::debug;

use super::shared_strings::SharedStrings;
use super::worksheet::{parse_worksheet, Worksheet};

const DEFAULT_WORKBOOK_PART: &str = "xl/workbook.xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
const SHARED_STRINGS_REL: &str = "/sharedStrings";

/// Sheet entry from workbook.xml.
#[derive(Debug, Clone)]
struct SheetInfo {
    name: String,
    /// Resolved part path, if the workbook relationships name one
    part: Option<String>,
}

/// Reader for XLSX (Excel) workbooks.
///
/// Opening a reader decodes the workbook index and shared strings; worksheets
/// are decoded on request.
///
/// # Example
///
/// ```no_run
/// use sheetpick::xlsx::WorkbookReader;
///
/// let reader = WorkbookReader::open("data.xlsx")?;
/// println!("Sheets: {:?}", reader.sheet_names());
/// let sheet = reader.first_sheet()?;
/// println!("{} cells", sheet.cell_count());
/// # Ok::<(), sheetpick::Error>(())
/// ```
pub struct WorkbookReader {
    package: Package,
    format: FormatType,
    shared_strings: SharedStrings,
    sheets: Vec<SheetInfo>,
}

impl WorkbookReader {
    /// Open an XLSX file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Create a reader from the raw bytes of a workbook file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = detect_format_from_bytes(&data)?;
        let package = Package::from_bytes(data)?;

        let workbook_part = Self::locate_workbook(&package)?;
        let workbook_rels = package.read_relationships(&workbook_part)?;

        let shared_strings_part = workbook_rels
            .iter()
            .find(|rel| rel.rel_type.ends_with(SHARED_STRINGS_REL))
            .map(|rel| Package::resolve_path(&workbook_part, &rel.target))
            .unwrap_or_else(|| "xl/sharedStrings.xml".to_string());
        let shared_strings = match package.read_xml(&shared_strings_part) {
            Ok(xml) => SharedStrings::parse(&xml)?,
            Err(Error::MissingComponent(_)) => SharedStrings::default(),
            Err(e) => return Err(e),
        };

        let xml = package.read_xml(&workbook_part)?;
        let sheets = parse_sheet_list(&xml)?
            .into_iter()
            .map(|(name, rel_id)| SheetInfo {
                part: workbook_rels
                    .get(&rel_id)
                    .map(|rel| Package::resolve_path(&workbook_part, &rel.target)),
                name,
            })
            .collect::<Vec<_>>();

        debug!(
            format = %format,
            sheets = sheets.len(),
            shared_strings = shared_strings.len(),
            "decoded workbook index"
        );

        Ok(Self {
            package,
            format,
            shared_strings,
            sheets,
        })
    }

    /// Find the main workbook part via the package relationships.
    fn locate_workbook(package: &Package) -> Result<String> {
        let package_rels = package.read_relationships("")?;
        let part = package_rels
            .iter()
            .find(|rel| rel.rel_type.ends_with(OFFICE_DOCUMENT_REL))
            .map(|rel| Package::resolve_path("", &rel.target))
            .filter(|part| package.exists(part))
            .unwrap_or_else(|| DEFAULT_WORKBOOK_PART.to_string());

        if package.exists(&part) {
            Ok(part)
        } else {
            Err(Error::MissingComponent(part))
        }
    }

    /// The detected workbook format.
    pub fn format(&self) -> FormatType {
        self.format
    }

    /// Get the number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Decode the first worksheet by position.
    ///
    /// Fails with [`Error::EmptyWorkbook`] when the workbook lists no sheets.
    pub fn first_sheet(&self) -> Result<Worksheet> {
        if self.sheets.is_empty() {
            return Err(Error::EmptyWorkbook);
        }
        self.sheet(0)
    }

    /// Decode the worksheet at `index`.
    pub fn sheet(&self, index: usize) -> Result<Worksheet> {
        let info = self.sheets.get(index).ok_or_else(|| {
            Error::MissingComponent(format!(
                "sheet #{} (workbook has {})",
                index,
                self.sheets.len()
            ))
        })?;
        let part = info
            .part
            .as_deref()
            .ok_or_else(|| Error::MissingComponent(format!("part for sheet '{}'", info.name)))?;

        let xml = self.package.read_xml(part)?;
        let sheet = parse_worksheet(&info.name, &xml, &self.shared_strings)?;
        debug!(
            sheet = %info.name,
            part,
            cells = sheet.cell_count(),
            "decoded worksheet"
        );
        Ok(sheet)
    }
}

impl std::fmt::Debug for WorkbookReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbookReader")
            .field("format", &self.format)
            .field("sheets", &self.sheet_names())
            .finish()
    }
}

/// Parse the `<sheets>` list of workbook.xml into `(name, relationship id)` pairs.
fn parse_sheet_list(xml: &str) -> Result<Vec<(String, String)>> {
    let mut sheets = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"sheet" => {
                let mut name = String::new();
                let mut rel_id = String::new();

                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"name" => {
                            name = attr
                                .unescape_value()
                                .map(|v| v.into_owned())
                                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string());
                        }
                        // `r:id`; the prefix is bound to the relationships namespace
                        b"id" => rel_id = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }

                if !name.is_empty() {
                    sheets.push((name, rel_id));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheet_list() {
        let xml = r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
  <sheet name="Techniques" sheetId="1" r:id="rId1"/>
  <sheet name="Notes &amp; refs" sheetId="2" state="hidden" r:id="rId2"/>
</sheets></workbook>"#;

        let sheets = parse_sheet_list(xml).unwrap();
        assert_eq!(
            sheets,
            vec![
                ("Techniques".to_string(), "rId1".to_string()),
                ("Notes & refs".to_string(), "rId2".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_empty_sheet_list() {
        let xml = r#"<workbook><sheets/></workbook>"#;
        assert!(parse_sheet_list(xml).unwrap().is_empty());
    }

    #[test]
    fn test_plain_text_is_not_a_workbook() {
        let result = WorkbookReader::from_bytes(b"just some text".to_vec());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }
}
