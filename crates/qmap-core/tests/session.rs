use qmap_core::{CommandOutcome, EditCommand, EditError, EditSession};
use qmap_map::RemapOutcome;
use qmap_model::{FieldValue, ModelError, QuestionType, Record, RowKey, RowStore};
use qmap_validate::OrderError;

fn key(n: usize) -> RowKey {
    RowKey::for_sheet_row(n)
}

fn question(n: usize, order: &str, question_type: &str, options: &[&str]) -> Record {
    Record::new(key(n))
        .with_field("order", order)
        .with_field("questions", format!("Question {n}"))
        .with_field("variable_name", format!("q{n}"))
        .with_field("question_type", question_type)
        .with_field("possible_options", FieldValue::list(options.iter().copied()))
}

fn session() -> EditSession {
    let schema = ["order", "questions", "variable_name", "question_type", "possible_options"]
        .map(String::from)
        .to_vec();
    let records = vec![
        question(2, "1", "NUMBER", &[]),
        question(3, "1.1", "CAT-ME", &["Under 18", "Adult"]),
        question(4, "2", "CAT-CA", &["Red", "Blue"]),
        question(5, "", "TEXT", &[]),
    ];
    EditSession::new(RowStore::from_records(schema, records).unwrap())
}

#[test]
fn skipped_sibling_is_rejected_and_store_unchanged() {
    let mut session = session();
    let before = session.store().clone();

    let err = session.commit(&key(5), "order", "1.3").unwrap_err();

    match err {
        EditError::Order(OrderError::MissingSibling { sibling, .. }) => {
            assert_eq!(sibling.to_string(), "1.2");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(session.store(), &before);

    session.commit(&key(5), "order", " 1.2 ").unwrap();
    assert_eq!(session.store().get(&key(5)).unwrap().order(), "1.2");
}

#[test]
fn duplicate_order_excludes_the_edited_row() {
    let mut session = session();

    assert!(session.check_order("2", &key(5)));
    assert!(!session.check_order("2", &key(4)));
    session.commit(&key(4), "order", "2").unwrap();

    let err = session.commit(&key(5), "order", "2").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"order 2 is already used by row row-4");
}

#[test]
fn binary_round_trip_restores_options() {
    let mut session = session();

    session.set_question_type(&key(3), &QuestionType::Binary).unwrap();
    let binary = session.store().get(&key(3)).unwrap();
    assert_eq!(binary.options(), ["YES", "NO"]);
    assert_eq!(binary.text("question_type"), Some("BIN"));

    session
        .set_question_type(&key(3), &QuestionType::CategoricalExclusive)
        .unwrap();
    let restored = session.store().get(&key(3)).unwrap();
    assert_eq!(restored.options(), ["Under 18", "Adult"]);
    assert_eq!(restored.temp_options(), None);
}

#[test]
fn text_between_binary_switches_keeps_the_stash() {
    let mut session = session();

    for question_type in [QuestionType::Binary, QuestionType::Text, QuestionType::Binary] {
        session.set_question_type(&key(4), &question_type).unwrap();
    }
    let binary = session.store().get(&key(4)).unwrap();
    assert_eq!(binary.options(), ["YES", "NO"]);
    assert_eq!(binary.temp_options(), Some(&["Red".to_string(), "Blue".to_string()][..]));

    session
        .set_question_type(&key(4), &QuestionType::CategoricalExclusive)
        .unwrap();
    let restored = session.store().get(&key(4)).unwrap();
    assert_eq!(restored.options(), ["Red", "Blue"]);
    assert_eq!(restored.temp_options(), None);
}

#[test]
fn committing_question_type_field_applies_coercion() {
    let mut session = session();

    session.commit(&key(4), "question_type", "BIN").unwrap();

    assert_eq!(session.store().get(&key(4)).unwrap().options(), ["YES", "NO"]);
}

#[test]
fn delete_removes_exactly_one_row() {
    let mut session = session();

    let removed = session.delete(&key(3)).unwrap();

    assert_eq!(removed.key(), &key(3));
    assert_eq!(session.store().len(), 3);
    assert!(!session.store().contains_key(&key(3)));
    // 1.1 is free again; 2 is still held by row-4
    session.commit(&key(5), "order", "1.1").unwrap();
    assert!(session.check_order("2", &key(5)));

    let err = session.delete(&key(3)).unwrap_err();
    assert_eq!(err, EditError::Model(ModelError::UnknownKey { key: key(3) }));
}

#[test]
fn unknown_field_is_rejected() {
    let mut session = session();
    let err = session.commit(&key(2), "comments", "x").unwrap_err();
    assert!(matches!(err, EditError::Model(ModelError::UnknownField { .. })));
}

#[test]
fn options_are_treated_as_a_set() {
    let mut session = session();

    session
        .set_options(&key(4), ["Red", " Green ", "", "Red"])
        .unwrap();

    assert_eq!(session.store().get(&key(4)).unwrap().options(), ["Red", "Green"]);
}

#[test]
fn proceed_reports_empty_orders() {
    let session = session();

    let report = session.proceed();

    assert!(report.has_errors());
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.issues[0].key(), Some(&key(5)));
}

#[test]
fn remap_then_proceed() {
    let schema = ["sno", "questions"].map(String::from).to_vec();
    let records = vec![
        Record::new(key(2)).with_field("sno", "1").with_field("questions", "Age?"),
        Record::new(key(3)).with_field("sno", "2").with_field("questions", "Sex?"),
    ];
    let mut session = EditSession::new(RowStore::from_records(schema, records).unwrap());

    let outcome = session.remap("order", "sno").unwrap();

    assert_eq!(outcome, RemapOutcome::Renamed { records: 2 });
    assert_eq!(session.mappings().source_for("order"), Some("sno"));
    let report = session.proceed();
    assert!(!report.has_errors());
    assert_eq!(report.warning_count(), 3);
    assert_eq!(session.remap("order", "sno").unwrap(), RemapOutcome::SourceAbsent);
}

#[test]
fn applies_a_command_script() {
    let mut session = session();
    let script: Vec<EditCommand> = serde_json::from_str(
        r#"[
            {"op": "edit", "key": "row-5", "field": "order", "value": "3"},
            {"op": "set_type", "key": "row-5", "question_type": "BIN"},
            {"op": "set_options", "key": "row-2", "options": ["0-17", "18+"]},
            {"op": "delete", "key": "row-3"}
        ]"#,
    )
    .unwrap();

    let outcomes: Vec<CommandOutcome> = script
        .iter()
        .map(|command| session.apply(command).unwrap())
        .collect();

    assert!(matches!(outcomes[3], CommandOutcome::Deleted(_)));
    let row5 = session.store().get(&key(5)).unwrap();
    assert_eq!(row5.order(), "3");
    assert_eq!(row5.options(), ["YES", "NO"]);
    assert!(!session.proceed().has_errors());
}
