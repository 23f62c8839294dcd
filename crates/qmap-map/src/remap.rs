//! Renaming a field across every record of a store.

use qmap_model::{ModelError, RESERVED_NAMES, Record, Result, RowStore};
use tracing::debug;

use crate::mappings::ColumnMappings;

/// What a remap call did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapOutcome {
    /// The source field was moved to the target on this many records.
    Renamed { records: usize },
    /// No record carries the source field; the store is unchanged.
    SourceAbsent,
    /// Source and target are the same field; the store is unchanged.
    Unchanged,
}

/// New snapshot produced by [`ColumnRemapper::remap`].
#[derive(Debug, Clone)]
pub struct Remapped {
    pub store: RowStore,
    pub outcome: RemapOutcome,
}

/// Moves the value of `source` into `target` on every record that has `source`.
///
/// Records without `source` are passed through untouched. When `target`
/// already exists on a record it is overwritten.
pub fn remap_records(records: &[Record], target: &str, source: &str) -> Vec<Record> {
    records
        .iter()
        .map(|record| match record.get(source) {
            Some(value) if target != source => {
                let mut moved = record.clone();
                moved.set(target, value.clone());
                moved.remove(source);
                moved
            }
            _ => record.clone(),
        })
        .collect()
}

/// Applies column remaps to store snapshots and tracks the resulting mappings.
#[derive(Debug, Clone, Default)]
pub struct ColumnRemapper {
    mappings: ColumnMappings,
}

impl ColumnRemapper {
    pub fn new(mappings: ColumnMappings) -> Self {
        Self { mappings }
    }

    /// Remapper whose mappings start as the identity over the store's schema.
    pub fn for_store(store: &RowStore) -> Self {
        Self::new(ColumnMappings::identity(store.schema()))
    }

    pub fn mappings(&self) -> &ColumnMappings {
        &self.mappings
    }

    /// Declares that `target` is populated from `source`.
    ///
    /// The mapping is recorded on every call, including calls that leave the
    /// store unchanged. When the source column is renamed away its own entry
    /// is dropped. A source no record carries (for example one already
    /// remapped away) is not an error.
    pub fn remap(&mut self, store: &RowStore, target: &str, source: &str) -> Result<Remapped> {
        if RESERVED_NAMES.contains(&target) {
            return Err(ModelError::ReservedField {
                field: target.to_string(),
            });
        }
        self.mappings.assign(target, source);

        if target == source {
            return Ok(Remapped {
                store: store.clone(),
                outcome: RemapOutcome::Unchanged,
            });
        }

        let records_with_source = store.iter().filter(|r| r.contains(source)).count();
        if records_with_source == 0 {
            debug!(logical = target, source, "remap source absent, store unchanged");
            return Ok(Remapped {
                store: store.clone(),
                outcome: RemapOutcome::SourceAbsent,
            });
        }

        let schema = renamed_schema(store.schema(), target, source);
        let records = remap_records(store.records(), target, source);
        let store = RowStore::from_records(schema, records)?;
        self.mappings.remove(source);
        debug!(logical = target, source, records = records_with_source, "field remapped");
        Ok(Remapped {
            store,
            outcome: RemapOutcome::Renamed {
                records: records_with_source,
            },
        })
    }
}

/// Schema with `source` replaced by `target` in place, or dropped when
/// `target` is already a column.
fn renamed_schema(schema: &[String], target: &str, source: &str) -> Vec<String> {
    let target_exists = schema.iter().any(|field| field == target);
    schema
        .iter()
        .filter_map(|field| {
            if field != source {
                Some(field.clone())
            } else if target_exists {
                None
            } else {
                Some(target.to_string())
            }
        })
        .collect()
}
