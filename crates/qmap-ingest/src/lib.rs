//! Loading questionnaire worksheets into row stores.
//!
//! Supported inputs are workbooks (`xlsx`, `xlsm`, `xls`, `xlsb`, `ods`),
//! CSV files, and preloaded JSON mapping files. Workbook and CSV headers are
//! normalized into snake_case field names and every row is keyed
//! `row-<n>` by its worksheet row number.

mod cell;
mod csv_file;
mod error;
mod header;
mod options;
mod preload;
mod table;
mod workbook;

use std::path::Path;

use qmap_model::RowStore;
use tracing::info;

pub use cell::cell_to_string;
pub use csv_file::read_csv;
pub use error::{IngestError, Result};
pub use header::{normalize_header, resolve_headers};
pub use options::{IngestOptions, SheetSelector};
pub use preload::{
    HeaderColumn, MappingDocument, export_json, load_preloaded, write_export,
};
pub use table::{RawRow, RawTable, build_store};
pub use workbook::{list_sheets, read_workbook};

/// Input kinds recognized by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Workbook,
    Csv,
    Preloaded,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Preloaded),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Loads any supported input into the initial row store.
pub fn load_store(path: &Path, options: &IngestOptions) -> Result<RowStore> {
    let kind = SourceKind::from_path(path)?;
    let store = match kind {
        SourceKind::Workbook => build_store(&read_workbook(path, &options.sheet)?, options)?,
        SourceKind::Csv => build_store(&read_csv(path)?, options)?,
        SourceKind::Preloaded => load_preloaded(path)?,
    };
    info!(
        path = %path.display(),
        rows = store.len(),
        fields = store.schema().len(),
        "loaded worksheet"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind() {
        assert_eq!(SourceKind::from_path(Path::new("q.XLSM")).unwrap(), SourceKind::Workbook);
        assert_eq!(SourceKind::from_path(Path::new("q.csv")).unwrap(), SourceKind::Csv);
        assert_eq!(SourceKind::from_path(Path::new("q.json")).unwrap(), SourceKind::Preloaded);
        assert!(matches!(
            SourceKind::from_path(Path::new("q.txt")),
            Err(IngestError::UnsupportedFormat { .. })
        ));
    }
}
