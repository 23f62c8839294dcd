//! Editing state for one loaded worksheet.

use qmap_map::{ColumnMappings, ColumnRemapper, RemapOutcome};
use qmap_model::{
    FieldValue, ModelError, ORDER_FIELD, POSSIBLE_OPTIONS_FIELD, QUESTION_TYPE_FIELD, QuestionType,
    Record, RowKey, RowStore,
};
use qmap_validate::{OrderError, OrderValidator, ValidationReport, validate_store};
use tracing::{debug, info};

use crate::coercion::{apply_question_type, normalize_options};
use crate::error::Result;

/// Current row store snapshot plus the column mappings applied to it.
///
/// Every operation either replaces the snapshot as a whole or leaves it
/// untouched and returns an error.
#[derive(Debug, Clone)]
pub struct EditSession {
    store: RowStore,
    remapper: ColumnRemapper,
}

impl EditSession {
    /// Starts a session whose mappings are the identity over the store's columns.
    pub fn new(store: RowStore) -> Self {
        let remapper = ColumnRemapper::for_store(&store);
        Self { store, remapper }
    }

    pub fn with_mappings(store: RowStore, mappings: ColumnMappings) -> Self {
        Self {
            store,
            remapper: ColumnRemapper::new(mappings),
        }
    }

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    pub fn mappings(&self) -> &ColumnMappings {
        self.remapper.mappings()
    }

    pub fn into_store(self) -> RowStore {
        self.store
    }

    /// Live duplicate check for an order being typed into row `key`.
    pub fn check_order(&self, value: &str, key: &RowKey) -> bool {
        OrderValidator::new(&self.store).is_duplicate(value, key)
    }

    /// Commits a single-field edit.
    ///
    /// Orders are trimmed and fully validated unless blank. Question types and
    /// option lists go through the same handling as [`Self::set_question_type`]
    /// and [`Self::set_options`].
    pub fn commit(&mut self, key: &RowKey, field: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        match field {
            ORDER_FIELD => self.commit_order(key, &value),
            QUESTION_TYPE_FIELD => {
                let tag = value.to_options().join(" ");
                self.set_question_type(key, &QuestionType::parse(&tag))
            }
            POSSIBLE_OPTIONS_FIELD => self.set_options(key, value.to_options()),
            _ => {
                let mut record = self.record(key)?.clone();
                record.set(field, value);
                self.replace(record)
            }
        }
    }

    /// Switches the question type of row `key`, adjusting its options.
    pub fn set_question_type(&mut self, key: &RowKey, question_type: &QuestionType) -> Result<()> {
        let record = apply_question_type(self.record(key)?, question_type);
        debug!(row = %key, question_type = %question_type, "question type changed");
        self.replace(record)
    }

    /// Replaces the option tags of row `key`.
    pub fn set_options<I, S>(&mut self, key: &RowKey, options: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut record = self.record(key)?.clone();
        record.set(POSSIBLE_OPTIONS_FIELD, FieldValue::List(normalize_options(options)));
        self.replace(record)
    }

    /// Removes row `key` and returns it.
    pub fn delete(&mut self, key: &RowKey) -> Result<Record> {
        let (store, removed) = self.store.remove(key)?;
        self.store = store;
        info!(row = %key, remaining = self.store.len(), "row deleted");
        Ok(removed)
    }

    /// Fills logical field `target` from source column `source`.
    pub fn remap(&mut self, target: &str, source: &str) -> Result<RemapOutcome> {
        let remapped = self.remapper.remap(&self.store, target, source)?;
        self.store = remapped.store;
        Ok(remapped.outcome)
    }

    /// Validates the whole store before the rows are handed on.
    pub fn proceed(&self) -> ValidationReport {
        validate_store(&self.store)
    }

    fn commit_order(&mut self, key: &RowKey, value: &FieldValue) -> Result<()> {
        let mut record = self.record(key)?.clone();
        let Some(text) = value.as_text() else {
            return Err(OrderError::InvalidFormat {
                value: value.to_string(),
            }
            .into());
        };
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            OrderValidator::new(&self.store).validate(trimmed, key)?;
        }
        record.set(ORDER_FIELD, trimmed);
        debug!(row = %key, order = trimmed, "order committed");
        self.replace(record)
    }

    fn record(&self, key: &RowKey) -> Result<&Record> {
        self.store
            .get(key)
            .ok_or_else(|| ModelError::UnknownKey { key: key.clone() }.into())
    }

    fn replace(&mut self, record: Record) -> Result<()> {
        self.store = self.store.replace(record)?;
        Ok(())
    }
}
