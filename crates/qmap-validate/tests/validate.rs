//! Integration tests for order validation and the whole-store report.

use qmap_model::{
    FieldValue, ORDER_FIELD, POSSIBLE_OPTIONS_FIELD, QUESTION_TYPE_FIELD, QUESTIONS_FIELD,
    Record, RowKey, RowStore, VARIABLE_NAME_FIELD,
};
use qmap_validate::{Issue, OrderError, OrderValidator, Severity, validate_store};

fn full_schema() -> Vec<String> {
    [
        ORDER_FIELD,
        QUESTIONS_FIELD,
        VARIABLE_NAME_FIELD,
        QUESTION_TYPE_FIELD,
        POSSIBLE_OPTIONS_FIELD,
    ]
    .iter()
    .map(|f| (*f).to_string())
    .collect()
}

fn row(key: &str, order: &str) -> Record {
    Record::new(RowKey::new(key))
        .with_field(ORDER_FIELD, order)
        .with_field(QUESTIONS_FIELD, format!("Question {order}"))
        .with_field(POSSIBLE_OPTIONS_FIELD, FieldValue::list(["A", "B"]))
}

fn store(rows: Vec<Record>) -> RowStore {
    RowStore::from_records(full_schema(), rows).unwrap()
}

#[test]
fn test_sibling_gap_message() {
    let store = store(vec![row("row-2", "1"), row("row-3", "1.1")]);
    let validator = OrderValidator::new(&store);
    let err = validator
        .validate("1.3", &RowKey::new("row-4"))
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"order 1.3 skips 1.2; add 1.2 first");
}

#[test]
fn test_duplicate_message() {
    let store = store(vec![row("row-2", "1"), row("row-3", "2")]);
    let validator = OrderValidator::new(&store);
    let err = validator.validate("2", &RowKey::new("row-2")).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"order 2 is already used by row row-3");
}

#[test]
fn test_deleting_a_row_keeps_other_judgments() {
    let before = store(vec![
        row("row-2", "1"),
        row("row-3", "1.1"),
        row("row-4", "2"),
    ]);
    let (after, removed) = before.remove(&RowKey::new("row-4")).unwrap();
    assert_eq!(removed.order(), "2");
    assert_eq!(after.len(), 2);
    assert!(!after.contains_key(&RowKey::new("row-4")));

    let validator = OrderValidator::new(&after);
    assert!(validator.validate("1.1", &RowKey::new("row-3")).is_ok());
    assert!(validator.validate("1.2", &RowKey::new("row-9")).is_ok());
    // The freed order can now be claimed.
    assert!(validator.validate("2", &RowKey::new("row-9")).is_ok());
}

#[test]
fn test_clean_store_has_no_issues() {
    let store = store(vec![
        row("row-2", "1"),
        row("row-3", "1.1"),
        row("row-4", "1.2"),
        row("row-5", "2"),
        row("row-6", "2.1"),
        row("row-7", "2.1.1"),
    ]);
    let report = validate_store(&store);
    assert!(report.is_empty(), "{:?}", report.issues);
    assert_eq!(report.records, 6);
}

#[test]
fn test_report_collects_row_issues() {
    let store = store(vec![
        row("row-2", "1"),
        row("row-3", "1"),
        row("row-4", ""),
        row("row-5", "3"),
        row("row-6", "1.x"),
    ]);
    let report = validate_store(&store);

    assert!(report.has_errors());
    assert_eq!(report.error_count(), 5);
    assert_eq!(report.warning_count(), 0);

    let codes: Vec<(Option<&str>, &str)> = report
        .issues
        .iter()
        .map(|i| (i.key().map(RowKey::as_str), i.code()))
        .collect();
    assert_eq!(
        codes,
        vec![
            (Some("row-2"), "DuplicateOrder"),
            (Some("row-3"), "DuplicateOrder"),
            (Some("row-4"), "EmptyOrder"),
            (Some("row-5"), "MissingSibling"),
            (Some("row-6"), "InvalidFormat"),
        ]
    );
}

#[test]
fn test_report_flags_missing_logical_fields() {
    let records = vec![
        Record::new(RowKey::new("row-2"))
            .with_field(ORDER_FIELD, "1")
            .with_field("var_name", "AGE"),
    ];
    let store = RowStore::from_records(vec![ORDER_FIELD.to_string()], records).unwrap();
    let report = validate_store(&store);

    assert!(!report.has_errors());
    assert_eq!(report.warning_count(), 4);
    assert!(report.issues.contains(&Issue::MissingLogicalField {
        field: VARIABLE_NAME_FIELD.to_string()
    }));
}

#[test]
fn test_missing_order_column_is_an_error() {
    let records = vec![Record::new(RowKey::new("row-2")).with_field("serial", "1")];
    let store = RowStore::from_records(Vec::new(), records).unwrap();
    let report = validate_store(&store);

    let order_issue = report
        .issues
        .iter()
        .find(|i| matches!(i, Issue::MissingLogicalField { field } if field == ORDER_FIELD))
        .unwrap();
    assert_eq!(order_issue.severity(), Severity::Error);
    assert!(
        !report
            .issues
            .iter()
            .any(|i| matches!(i, Issue::EmptyOrder { .. }))
    );
}

#[test]
fn test_invalid_order_issue_carries_error() {
    let store = store(vec![row("row-2", "2")]);
    let report = validate_store(&store);
    assert_eq!(report.issues.len(), 1);
    assert!(matches!(
        &report.issues[0],
        Issue::InvalidOrder {
            error: OrderError::MissingSibling { .. },
            ..
        }
    ));
}
