//! Workbook format detection.

use crate::container::decode_xml_bytes;
use crate::error::{Error, Result};
use std::io::{Cursor, Read, Seek};

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Content type for the XLSX workbook part.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Content type for the macro-enabled (XLSM) workbook part.
const XLSM_CONTENT_TYPE: &str = "application/vnd.ms-excel.sheet.macroEnabled.main+xml";

/// Content types of Office packages that are not spreadsheets.
const OTHER_OFFICE_TYPES: [(&str, &str); 2] = [
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        "Word document",
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        "PowerPoint presentation",
    ),
];

/// Detected workbook format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Excel workbook (.xlsx)
    Xlsx,
    /// Macro-enabled Excel workbook (.xlsm)
    Xlsm,
}

impl FormatType {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Xlsx => "xlsx",
            FormatType::Xlsm => "xlsm",
        }
    }

    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::Xlsx => "Excel Workbook",
            FormatType::Xlsm => "Excel Macro-Enabled Workbook",
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the workbook format of a byte buffer.
///
/// Anything that is not a ZIP archive is rejected with [`Error::UnknownFormat`]
/// before the archive reader ever sees it.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<FormatType> {
    if !is_zip_file(data) {
        return Err(Error::UnknownFormat);
    }

    detect_format_from_reader(Cursor::new(data))
}

/// Detect the workbook format from a ZIP reader.
pub fn detect_format_from_reader<R: Read + Seek>(reader: R) -> Result<FormatType> {
    let mut archive = zip::ZipArchive::new(reader)?;

    let content_types = match archive.by_name("[Content_Types].xml") {
        Ok(mut file) => {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)
                .map_err(|e| Error::ZipArchive(e.to_string()))?;
            Some(decode_xml_bytes(&bytes)?)
        }
        Err(_) => None,
    };
    let Some(content_types) = content_types else {
        return detect_by_folder_structure(&archive);
    };

    if content_types.contains(XLSX_CONTENT_TYPE) {
        return Ok(FormatType::Xlsx);
    }
    if content_types.contains(XLSM_CONTENT_TYPE) {
        return Ok(FormatType::Xlsm);
    }
    if let Some((_, name)) = OTHER_OFFICE_TYPES
        .iter()
        .find(|(content_type, _)| content_types.contains(*content_type))
    {
        return Err(Error::UnsupportedFormat(name.to_string()));
    }

    detect_by_folder_structure(&archive)
}

/// Fallback detection for packages with an incomplete content type list.
fn detect_by_folder_structure<R: Read + Seek>(archive: &zip::ZipArchive<R>) -> Result<FormatType> {
    let mut names = archive.file_names();
    if names.any(|n| n.starts_with("xl/")) {
        Ok(FormatType::Xlsx)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}
