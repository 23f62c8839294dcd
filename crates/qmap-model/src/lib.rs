//! Data model for questionnaire worksheets.
//!
//! A worksheet row becomes a [`Record`]: a stable [`RowKey`] plus a map from
//! normalized header name to [`FieldValue`]. Records live in a [`RowStore`]
//! snapshot that keeps keys unique and the field set uniform.

mod error;
mod question;
mod record;
mod store;
mod value;

pub use error::{ModelError, Result};
pub use question::QuestionType;
pub use record::{
    KEY_NAME, LOGICAL_FIELDS, ORDER_FIELD, POSSIBLE_OPTIONS_FIELD, QUESTION_TYPE_FIELD,
    QUESTIONS_FIELD, RESERVED_NAMES, Record, RowKey, TEMP_OPTIONS_NAME, VARIABLE_NAME_FIELD,
};
pub use store::RowStore;
pub use value::{FieldValue, MULTI_VALUE_SEPARATOR};
