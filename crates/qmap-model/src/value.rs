//! Cell values held by a record field.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used by worksheets to pack several values into one cell.
pub const MULTI_VALUE_SEPARATOR: &str = "||";

/// Value of a single record field.
///
/// Serialized untagged: a plain JSON string for [`FieldValue::Text`] and an
/// array of strings for [`FieldValue::List`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Scalar text value.
    Text(String),
    /// Ordered multi-value cell.
    List(Vec<String>),
}

impl FieldValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates an empty text value, used to pad records to the store schema.
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Creates a list value.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Parses a raw cell string using the `||` multi-value convention.
    ///
    /// Pieces and scalars are trimmed.
    pub fn from_cell(raw: &str) -> Self {
        if raw.contains(MULTI_VALUE_SEPARATOR) {
            Self::List(
                raw.split(MULTI_VALUE_SEPARATOR)
                    .map(|piece| piece.trim().to_string())
                    .collect(),
            )
        } else {
            Self::Text(raw.trim().to_string())
        }
    }

    /// Returns the scalar text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::List(_) => None,
        }
    }

    /// Returns the list items, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(values) => Some(values),
        }
    }

    /// True when the value carries no visible content.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(value) => value.trim().is_empty(),
            Self::List(values) => values.iter().all(|v| v.trim().is_empty()),
        }
    }

    /// Interprets the value as a tag list.
    ///
    /// A blank scalar is no tags, a non-blank scalar is a single tag.
    pub fn to_options(&self) -> Vec<String> {
        match self {
            Self::Text(value) if value.trim().is_empty() => Vec::new(),
            Self::Text(value) => vec![value.clone()],
            Self::List(values) => values.clone(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::List(values) => f.write_str(&values.join(" || ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}
