//! Error types for worksheet ingestion.

use std::path::PathBuf;

use qmap_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading or exporting a worksheet.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read or write a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not one of the supported inputs.
    #[error("unsupported input format: {path} (expected xlsx, xlsm, xls, xlsb, ods, csv or json)")]
    UnsupportedFormat { path: PathBuf },

    // === Workbook Errors ===
    /// The workbook could not be opened or parsed.
    #[error("failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// The selected sheet does not exist.
    #[error("sheet {sheet} not found in {path} (available: {available})")]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: String,
    },

    /// Failed to parse a CSV file.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// The sheet has no header row.
    #[error("no header row found in {path}")]
    EmptySheet { path: PathBuf },

    // === Header Errors ===
    /// A header cell normalizes to an empty name but its column has data.
    #[error("column {column} has data but header '{raw}' gives no usable field name")]
    EmptyHeader { column: usize, raw: String },

    /// Two header cells normalize to the same field name.
    #[error("headers '{first}' and '{second}' both normalize to '{field}'")]
    DuplicateHeader {
        field: String,
        first: String,
        second: String,
    },

    /// A header normalizes to a name reserved for record bookkeeping.
    #[error("header '{raw}' normalizes to reserved name '{field}'")]
    ReservedHeader { field: String, raw: String },

    // === Data Errors ===
    /// Preloaded mapping or export JSON could not be (de)serialized.
    #[error("invalid mapping JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The loaded rows do not form a valid store.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Maps an I/O error on `path` to `FileNotFound` or `FileRead`.
pub(crate) fn io_error(path: &std::path::Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
