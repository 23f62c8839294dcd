//! Worksheet rows and their stable keys.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::question::QuestionType;
use crate::value::FieldValue;

/// Field holding the hierarchical order number.
pub const ORDER_FIELD: &str = "order";
/// Field holding the question text.
pub const QUESTIONS_FIELD: &str = "questions";
/// Field holding the variable name.
pub const VARIABLE_NAME_FIELD: &str = "variable_name";
/// Field holding the question type tag.
pub const QUESTION_TYPE_FIELD: &str = "question_type";
/// Field holding the selectable option tags.
pub const POSSIBLE_OPTIONS_FIELD: &str = "possible_options";

/// Logical fields a downstream consumer expects, in column order.
pub const LOGICAL_FIELDS: [&str; 5] = [
    ORDER_FIELD,
    QUESTIONS_FIELD,
    VARIABLE_NAME_FIELD,
    QUESTION_TYPE_FIELD,
    POSSIBLE_OPTIONS_FIELD,
];

/// Serialized name of the row key.
pub const KEY_NAME: &str = "key";
/// Serialized name of the stashed option list.
pub const TEMP_OPTIONS_NAME: &str = "temp_options_array";

/// Names that cannot be used as field names.
pub const RESERVED_NAMES: [&str; 2] = [KEY_NAME, TEMP_OPTIONS_NAME];

/// Stable identifier of a row, assigned once at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key for the row at the given 1-based worksheet row number.
    pub fn for_sheet_row(row_number: usize) -> Self {
        Self(format!("row-{row_number}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// One worksheet row.
///
/// Fields are keyed by normalized header name. The stashed option list is
/// bookkeeping for question-type switches and is not a field; it is `None`
/// until something is stashed, so an empty stash still round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    key: RowKey,
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
    #[serde(
        rename = "temp_options_array",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    temp_options: Option<Vec<String>>,
}

impl Record {
    pub fn new(key: RowKey) -> Self {
        Self {
            key,
            fields: BTreeMap::new(),
            temp_options: None,
        }
    }

    /// Builder-style field assignment.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn key(&self) -> &RowKey {
        &self.key
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Scalar text of a field; list values yield `None`.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(FieldValue::as_text)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.remove(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Trimmed order value; empty when the field is missing or not scalar.
    pub fn order(&self) -> &str {
        self.text(ORDER_FIELD).map(str::trim).unwrap_or_default()
    }

    /// Parsed question type, if the record has a non-blank type tag.
    pub fn question_type(&self) -> Option<QuestionType> {
        self.text(QUESTION_TYPE_FIELD)
            .filter(|tag| !tag.trim().is_empty())
            .map(QuestionType::parse)
    }

    /// Option tags stored in `possible_options`.
    pub fn options(&self) -> Vec<String> {
        self.get(POSSIBLE_OPTIONS_FIELD)
            .map(FieldValue::to_options)
            .unwrap_or_default()
    }

    /// Stashed option list, if one is held.
    pub fn temp_options(&self) -> Option<&[String]> {
        self.temp_options.as_deref()
    }

    pub fn set_temp_options(&mut self, options: Vec<String>) {
        self.temp_options = Some(options);
    }

    /// Removes and returns the stashed option list.
    pub fn take_temp_options(&mut self) -> Option<Vec<String>> {
        self.temp_options.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new(RowKey::for_sheet_row(2))
            .with_field(ORDER_FIELD, " 1.2 ")
            .with_field(QUESTION_TYPE_FIELD, "CAT-ME")
            .with_field(POSSIBLE_OPTIONS_FIELD, FieldValue::list(["A", "B"]))
    }

    #[test]
    fn test_accessors() {
        let record = sample();
        assert_eq!(record.key().as_str(), "row-2");
        assert_eq!(record.order(), "1.2");
        assert_eq!(
            record.question_type(),
            Some(QuestionType::CategoricalExclusive)
        );
        assert_eq!(record.options(), vec!["A", "B"]);
    }

    #[test]
    fn test_json_shape() {
        let mut record = sample();
        record.set_temp_options(vec!["X".to_string()]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["key"], "row-2");
        assert_eq!(json["order"], " 1.2 ");
        assert_eq!(json["possible_options"][1], "B");
        assert_eq!(json["temp_options_array"][0], "X");

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_temp_options_only_serialized_when_stashed() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("temp_options_array").is_none());

        let mut record = sample();
        record.set_temp_options(Vec::new());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["temp_options_array"], serde_json::json!([]));
        assert_eq!(record.take_temp_options(), Some(Vec::new()));
        assert_eq!(record.temp_options(), None);
    }
}
