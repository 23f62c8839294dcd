//! CSV reading.

use std::path::Path;

use crate::error::{IngestError, Result, io_error};
use crate::table::{RawRow, RawTable};

/// Reads a CSV file as a raw table.
///
/// The first record is the header row. Rows may have differing lengths.
pub fn read_csv(path: &Path) -> Result<RawTable> {
    std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut header = None;
    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let number = record
            .position()
            .map_or(index + 1, |position| position.line() as usize);
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if header.is_none() {
            header = Some(strip_bom(cells));
        } else {
            rows.push(RawRow::new(number, cells));
        }
    }

    let header = header.ok_or_else(|| IngestError::EmptySheet {
        path: path.to_path_buf(),
    })?;
    Ok(RawTable::new(header, rows))
}

fn strip_bom(mut cells: Vec<String>) -> Vec<String> {
    if let Some(first) = cells.first_mut()
        && let Some(stripped) = first.strip_prefix('\u{feff}')
    {
        *first = stripped.to_string();
    }
    cells
}

fn csv_error(path: &Path, err: csv::Error) -> IngestError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => io_error(path, io),
        _ => IngestError::CsvParse {
            path: path.to_path_buf(),
            message,
        },
    }
}
