//! Question type tags carried in the `question_type` field.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type of a questionnaire row.
///
/// Unknown tags from the source sheet are kept verbatim in [`QuestionType::Other`]
/// so a round trip through the store never loses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    /// Yes/no question (`BIN`).
    Binary,
    /// Categorical, mutually exclusive options (`CAT-ME`).
    CategoricalExclusive,
    /// Categorical, check-all-that-apply options (`CAT-CA`).
    CategoricalCheckAll,
    /// Free text answer (`TEXT`).
    Text,
    /// Numeric answer (`NUMBER`).
    Number,
    /// Date answer (`DATE`).
    Date,
    /// Any other tag found in the source data.
    Other(String),
}

impl QuestionType {
    /// Options shown for binary questions.
    pub const BINARY_OPTIONS: [&'static str; 2] = ["YES", "NO"];

    /// Tags offered by the type selector, in display order.
    pub const KNOWN: [QuestionType; 6] = [
        QuestionType::Binary,
        QuestionType::CategoricalExclusive,
        QuestionType::CategoricalCheckAll,
        QuestionType::Text,
        QuestionType::Number,
        QuestionType::Date,
    ];

    /// Parses a tag, ignoring surrounding whitespace and case.
    pub fn parse(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "BIN" => Self::Binary,
            "CAT-ME" => Self::CategoricalExclusive,
            "CAT-CA" => Self::CategoricalCheckAll,
            "TEXT" => Self::Text,
            "NUMBER" => Self::Number,
            "DATE" => Self::Date,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Tag as written in the sheet.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Binary => "BIN",
            Self::CategoricalExclusive => "CAT-ME",
            Self::CategoricalCheckAll => "CAT-CA",
            Self::Text => "TEXT",
            Self::Number => "NUMBER",
            Self::Date => "DATE",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for QuestionType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<QuestionType> for String {
    fn from(question_type: QuestionType) -> Self {
        question_type.as_str().to_string()
    }
}
