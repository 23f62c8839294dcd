//! In-memory row store snapshots.
//!
//! A [`RowStore`] is an immutable snapshot: every change produces a new value,
//! so a caller either sees the old rows or the new rows, never a mix.
//!
//! Every snapshot upholds two invariants:
//! - row keys are unique;
//! - every record carries exactly the fields listed in the schema (missing
//!   fields are padded with empty text when the snapshot is built).

use std::collections::HashSet;

use crate::error::{ModelError, Result};
use crate::record::{RESERVED_NAMES, Record, RowKey};
use crate::value::FieldValue;

/// Ordered list of records sharing one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowStore {
    schema: Vec<String>,
    records: Vec<Record>,
}

impl RowStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from a schema and records.
    ///
    /// Fields found on records but missing from `schema` are appended to the
    /// schema in first-seen order; records lacking a schema field get an empty
    /// value for it.
    pub fn from_records(schema: Vec<String>, records: Vec<Record>) -> Result<Self> {
        let mut seen_fields = HashSet::new();
        for field in &schema {
            if RESERVED_NAMES.contains(&field.as_str()) {
                return Err(ModelError::ReservedField {
                    field: field.clone(),
                });
            }
            if !seen_fields.insert(field.clone()) {
                return Err(ModelError::DuplicateField {
                    field: field.clone(),
                });
            }
        }

        let mut schema = schema;
        for record in &records {
            for name in record.field_names() {
                if seen_fields.insert(name.to_string()) {
                    schema.push(name.to_string());
                }
            }
        }

        let mut seen_keys = HashSet::new();
        for record in &records {
            if !seen_keys.insert(record.key().clone()) {
                return Err(ModelError::DuplicateKey {
                    key: record.key().clone(),
                });
            }
        }

        let records = records
            .into_iter()
            .map(|record| conform(record, &schema))
            .collect();
        Ok(Self { schema, records })
    }

    /// Field names in column order.
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.schema.iter().any(|name| name == field)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &RowKey) -> Option<&Record> {
        self.records.iter().find(|record| record.key() == key)
    }

    pub fn contains_key(&self, key: &RowKey) -> bool {
        self.get(key).is_some()
    }

    /// Non-empty trimmed order values with the key of the record holding them.
    pub fn orders(&self) -> impl Iterator<Item = (&RowKey, &str)> {
        self.records
            .iter()
            .map(|record| (record.key(), record.order()))
            .filter(|(_, order)| !order.is_empty())
    }

    /// Returns a snapshot where the record with the same key is replaced.
    ///
    /// The replacement may omit schema fields (they are padded) but may not
    /// introduce fields outside the schema.
    pub fn replace(&self, record: Record) -> Result<Self> {
        let index = self.index_of(record.key())?;
        if let Some(extra) = record.field_names().find(|name| !self.has_field(name)) {
            return Err(ModelError::UnknownField {
                field: extra.to_string(),
            });
        }
        let mut records = self.records.clone();
        records[index] = conform(record, &self.schema);
        Ok(Self {
            schema: self.schema.clone(),
            records,
        })
    }

    /// Returns a snapshot without the record with this key, plus the removed record.
    pub fn remove(&self, key: &RowKey) -> Result<(Self, Record)> {
        let index = self.index_of(key)?;
        let mut records = self.records.clone();
        let removed = records.remove(index);
        Ok((
            Self {
                schema: self.schema.clone(),
                records,
            },
            removed,
        ))
    }

    /// Consumes the store, yielding its schema and records.
    pub fn into_parts(self) -> (Vec<String>, Vec<Record>) {
        (self.schema, self.records)
    }

    fn index_of(&self, key: &RowKey) -> Result<usize> {
        self.records
            .iter()
            .position(|record| record.key() == key)
            .ok_or_else(|| ModelError::UnknownKey { key: key.clone() })
    }
}

impl<'a> IntoIterator for &'a RowStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Pads a record with empty values for schema fields it lacks.
fn conform(mut record: Record, schema: &[String]) -> Record {
    for field in schema {
        if !record.contains(field) {
            record.set(field.clone(), FieldValue::empty());
        }
    }
    record
}
