//! Workbook reading via calamine.

use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use tracing::debug;

use crate::cell::cell_to_string;
use crate::error::{IngestError, Result, io_error};
use crate::options::SheetSelector;
use crate::table::{RawRow, RawTable};

/// Lists the sheet names of a workbook in workbook order.
pub fn list_sheets(path: &Path) -> Result<Vec<String>> {
    ensure_exists(path)?;
    let workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(workbook.sheet_names())
}

/// Reads one sheet of a workbook.
///
/// The first non-empty row of the sheet is the header row; row numbers are
/// the worksheet's own 1-based numbers.
pub fn read_workbook(path: &Path, sheet: &SheetSelector) -> Result<RawTable> {
    ensure_exists(path)?;
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let names = workbook.sheet_names();
    let name = select_sheet(&names, sheet).ok_or_else(|| IngestError::SheetNotFound {
        path: path.to_path_buf(),
        sheet: sheet.to_string(),
        available: names.join(", "),
    })?;

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: format!("sheet '{name}': {e}"),
        })?;

    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows = range.rows().enumerate().map(|(offset, cells)| {
        RawRow::new(
            first_row + offset + 1,
            cells.iter().map(cell_to_string).collect(),
        )
    });

    let header = rows
        .next()
        .map(|row| row.cells)
        .ok_or_else(|| IngestError::EmptySheet {
            path: path.to_path_buf(),
        })?;
    let rows: Vec<RawRow> = rows.collect();
    debug!(sheet = %name, columns = header.len(), rows = rows.len(), "read worksheet");
    Ok(RawTable::new(header, rows))
}

fn select_sheet(names: &[String], sheet: &SheetSelector) -> Option<String> {
    match sheet {
        SheetSelector::Index(index) => names.get(*index).cloned(),
        SheetSelector::Name(wanted) => names
            .iter()
            .find(|name| *name == wanted)
            .or_else(|| names.iter().find(|name| name.eq_ignore_ascii_case(wanted)))
            .cloned(),
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    std::fs::metadata(path).map(|_| ()).map_err(|e| io_error(path, e))
}
