//! Spreadsheet codec for the event program.
//!
//! One sheet, a header row with the three column names below, one data row
//! per item. Reading goes through `calamine` (xlsx and legacy xls), writing
//! through `rust_xlsxwriter`.

pub mod export;
pub mod import;

use std::fmt;

pub const COLUMN_LABEL: &str = "순서";
pub const COLUMN_DURATION: &str = "소요시간(분)";
pub const COLUMN_DETAIL: &str = "세부사항";

/// Header row, in the order the columns are written.
pub const COLUMNS: [&str; 3] = [COLUMN_LABEL, COLUMN_DURATION, COLUMN_DETAIL];

pub const SHEET_NAME: &str = "행사순서";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Why an uploaded workbook was rejected. Both variants leave the current
/// program untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Readable workbook with the wrong shape: missing columns or unusable cells.
    Format(String),
    /// The bytes are not a workbook at all.
    Parse(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Format(msg) => write!(f, "Format error: {msg}"),
            ImportError::Parse(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ImportError {}

#[derive(Debug)]
pub struct ExportError(pub String);

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spreadsheet export failed: {}", self.0)
    }
}

impl std::error::Error for ExportError {}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ExportError(e.to_string())
    }
}
