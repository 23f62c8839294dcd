//! Raw sheet grid and its conversion into a row store.

use qmap_model::{FieldValue, Record, RowKey, RowStore};
use tracing::{debug, warn};

use crate::error::Result;
use crate::header::resolve_headers;
use crate::options::IngestOptions;

/// One data row of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based worksheet row number, used to derive the row key.
    pub number: usize,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(number: usize, cells: Vec<String>) -> Self {
        Self { number, cells }
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.trim().is_empty())
    }

    fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or_default()
    }
}

/// Sheet contents as text: a header row followed by data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(header: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { header, rows }
    }

    fn column_is_blank(&self, index: usize) -> bool {
        self.rows.iter().all(|row| row.cell(index).trim().is_empty())
    }
}

/// Builds the initial row store from a raw table.
///
/// Headers are normalized into field names, each row gets the key
/// `row-<n>` from its worksheet row number, and cells follow the `||`
/// multi-value convention.
pub fn build_store(table: &RawTable, options: &IngestOptions) -> Result<RowStore> {
    let fields = resolve_headers(&table.header, |index| table.column_is_blank(index))?;
    let schema: Vec<String> = fields.iter().flatten().cloned().collect();

    let mut records = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;
    for row in &table.rows {
        if options.skip_blank_rows && row.is_blank() {
            skipped += 1;
            continue;
        }
        if row.cells[fields.len().min(row.cells.len())..]
            .iter()
            .any(|cell| !cell.trim().is_empty())
        {
            warn!(row = row.number, "ignoring cells beyond the header row");
        }

        let mut record = Record::new(RowKey::for_sheet_row(row.number));
        for (index, field) in fields.iter().enumerate() {
            if let Some(field) = field {
                record.set(field.as_str(), FieldValue::from_cell(row.cell(index)));
            }
        }
        records.push(record);
    }
    if skipped > 0 {
        debug!(skipped, "skipped blank rows");
    }

    Ok(RowStore::from_records(schema, records)?)
}
