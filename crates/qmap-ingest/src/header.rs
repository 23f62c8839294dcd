//! Header row normalization.

use std::collections::HashMap;
use std::sync::LazyLock;

use qmap_model::RESERVED_NAMES;
use regex::Regex;
use tracing::warn;

use crate::error::{IngestError, Result};

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid separator regex"));

/// Turns a raw header cell into a field name.
///
/// Lower-cases, collapses every run of characters other than ASCII letters
/// and digits into one `_`, and trims leading and trailing `_`.
/// `"Question Type"` becomes `question_type`, `"S.No."` becomes `s_no`.
pub fn normalize_header(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    SEPARATOR_RUN
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Field name for each header column; `None` marks a dropped column.
///
/// `column_is_blank(index)` reports whether every data cell of the column is
/// empty. A header without a usable name is dropped only for such columns.
pub fn resolve_headers<F>(raw_headers: &[String], column_is_blank: F) -> Result<Vec<Option<String>>>
where
    F: Fn(usize) -> bool,
{
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut resolved = Vec::with_capacity(raw_headers.len());

    for (index, raw) in raw_headers.iter().enumerate() {
        let field = normalize_header(raw);
        if field.is_empty() {
            if column_is_blank(index) {
                if !raw.trim().is_empty() {
                    warn!(column = index + 1, header = %raw, "dropping blank column with unusable header");
                }
                resolved.push(None);
                continue;
            }
            return Err(IngestError::EmptyHeader {
                column: index + 1,
                raw: raw.clone(),
            });
        }
        if RESERVED_NAMES.contains(&field.as_str()) {
            return Err(IngestError::ReservedHeader {
                field,
                raw: raw.clone(),
            });
        }
        if let Some(first) = seen.get(&field) {
            return Err(IngestError::DuplicateHeader {
                field,
                first: (*first).to_string(),
                second: raw.clone(),
            });
        }
        seen.insert(field.clone(), raw);
        resolved.push(Some(field));
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|h| (*h).to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Question Type"), "question_type");
        assert_eq!(normalize_header("S.No."), "s_no");
        assert_eq!(normalize_header("  Possible -- Options "), "possible_options");
        assert_eq!(normalize_header("var_name"), "var_name");
        assert_eq!(normalize_header("Q1 (text)"), "q1_text");
        assert_eq!(normalize_header("***"), "");
    }

    #[test]
    fn test_blank_header_over_blank_column_is_dropped() {
        let resolved = resolve_headers(&headers(&["Order", ""]), |_| true).unwrap();
        assert_eq!(resolved, vec![Some("order".to_string()), None]);
    }

    #[test]
    fn test_blank_header_over_data_is_rejected() {
        let err = resolve_headers(&headers(&["Order", " "]), |index| index == 0).unwrap_err();
        assert!(matches!(err, IngestError::EmptyHeader { column: 2, .. }));
    }

    #[test]
    fn test_duplicate_after_normalization() {
        let err = resolve_headers(&headers(&["Var Name", "var_name"]), |_| false).unwrap_err();
        match err {
            IngestError::DuplicateHeader { field, first, second } => {
                assert_eq!(field, "var_name");
                assert_eq!(first, "Var Name");
                assert_eq!(second, "var_name");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_reserved_header() {
        let err = resolve_headers(&headers(&["Key"]), |_| false).unwrap_err();
        assert!(matches!(err, IngestError::ReservedHeader { .. }));
    }
}
