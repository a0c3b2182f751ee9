//! Error types for the sheetpick library.

use std::io;
use thiserror::Error;

/// Result type alias for sheetpick operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching, decoding or projecting a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// The bytes behind a location could not be acquired.
    #[error("Failed to fetch {location}: {reason}")]
    Fetch { location: String, reason: String },

    /// I/O error outside of fetching (e.g. writing output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The bytes are not a recognized spreadsheet format.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The bytes are an Office package, but not a spreadsheet.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required workbook part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Invalid or malformed data in the workbook.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The workbook does not contain any worksheet.
    #[error("Workbook contains no worksheets")]
    EmptyWorkbook,

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Byte acquisition failed.
    Fetch,
    /// The bytes could not be decoded as a workbook.
    Decode,
    /// The workbook has no worksheet to read.
    EmptyWorkbook,
    /// Anything else (output, rendering).
    Other,
}

impl Error {
    pub(crate) fn fetch(location: impl ToString, reason: impl ToString) -> Self {
        Error::Fetch {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Fetch { .. } => ErrorKind::Fetch,
            Error::UnknownFormat
            | Error::UnsupportedFormat(_)
            | Error::ZipArchive(_)
            | Error::XmlParse(_)
            | Error::MissingComponent(_)
            | Error::InvalidData(_) => ErrorKind::Decode,
            Error::EmptyWorkbook => ErrorKind::EmptyWorkbook,
            Error::Io(_) | Error::Render(_) => ErrorKind::Other,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
