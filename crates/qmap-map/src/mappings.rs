//! Bookkeeping of which source column feeds each logical field.

use std::collections::BTreeMap;

use qmap_model::LOGICAL_FIELDS;
use serde::{Deserialize, Serialize};

/// Logical field name -> source field name currently assigned to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMappings(BTreeMap<String, String>);

impl ColumnMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each field mapped to itself, as after a fresh ingest.
    pub fn identity<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            fields
                .into_iter()
                .map(|field| (field.as_ref().to_string(), field.as_ref().to_string()))
                .collect(),
        )
    }

    /// Identity mapping over the logical fields, used for preloaded data.
    pub fn logical_defaults() -> Self {
        Self::identity(LOGICAL_FIELDS)
    }

    /// Records that `logical` is now fed from `source`, returning the previous source.
    pub fn assign(&mut self, logical: &str, source: &str) -> Option<String> {
        self.0.insert(logical.to_string(), source.to_string())
    }

    /// Forgets the entry for `logical`, returning its source.
    pub fn remove(&mut self, logical: &str) -> Option<String> {
        self.0.remove(logical)
    }

    pub fn source_for(&self, logical: &str) -> Option<&str> {
        self.0.get(logical).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(logical, source)| (logical.as_str(), source.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Column header text for a snake_case field name.
///
/// `variable_name` becomes `Variable Name`.
pub fn column_title(field: &str) -> String {
    field
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
