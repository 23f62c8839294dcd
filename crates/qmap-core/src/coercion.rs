//! Option handling when a row's question type changes.

use qmap_model::{FieldValue, POSSIBLE_OPTIONS_FIELD, QUESTION_TYPE_FIELD, QuestionType, Record};
use tracing::debug;

/// Returns `record` with its question type set to `question_type`.
///
/// - Binary: the current options are stashed and replaced with `YES`/`NO`.
///   Nothing is stashed when the row is already binary or still holds a
///   stash from an earlier switch (binary, then text, then binary again).
/// - Text: options are left as they are.
/// - Anything else: a stashed option list is restored and the stash cleared.
pub fn apply_question_type(record: &Record, question_type: &QuestionType) -> Record {
    let mut updated = record.clone();
    let was_binary = record.question_type().is_some_and(|current| current.is_binary());

    if question_type.is_binary() {
        if !was_binary && record.temp_options().is_none() {
            updated.set_temp_options(record.options());
        }
        updated.set(
            POSSIBLE_OPTIONS_FIELD,
            FieldValue::list(QuestionType::BINARY_OPTIONS),
        );
    } else if !question_type.is_text()
        && let Some(stashed) = updated.take_temp_options()
    {
        debug!(row = %record.key(), options = stashed.len(), "restoring stashed options");
        // An empty stash is restored too, as empty options, so a row that had
        // none before going binary gets none back.
        let restored = if stashed.is_empty() {
            FieldValue::empty()
        } else {
            FieldValue::List(stashed)
        };
        updated.set(POSSIBLE_OPTIONS_FIELD, restored);
    }

    updated.set(QUESTION_TYPE_FIELD, question_type.as_str());
    updated
}

/// Options a front end should show for the row; `None` for text questions.
pub fn displayed_options(record: &Record) -> Option<Vec<String>> {
    match record.question_type() {
        Some(question_type) if question_type.is_text() => None,
        _ => Some(record.options()),
    }
}

/// Trims tags and drops empties and repeats, keeping first-seen order.
pub fn normalize_options<I, S>(options: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for option in options {
        let tag = option.as_ref().trim();
        if !tag.is_empty() && !normalized.iter().any(|existing| existing == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}
