use qmap_ingest::{
    IngestError, IngestOptions, SheetSelector, list_sheets, load_store, write_export,
};
use qmap_model::FieldValue;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn write_questionnaire(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("questionnaire.xlsx");
    let mut workbook = Workbook::new();

    let intro = workbook.add_worksheet();
    intro.set_name("Intro").unwrap();
    intro.write_string(0, 0, "Read me first").unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Questions").unwrap();
    let header = ["S.No", "Questions", "Var Name", "Question Type", "Possible Options"];
    for (col, title) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *title).unwrap();
    }
    sheet.write_number(1, 0, 1.0).unwrap();
    sheet.write_string(1, 1, "Age?").unwrap();
    sheet.write_string(1, 2, "age").unwrap();
    sheet.write_string(1, 3, "NUMBER").unwrap();
    // row 3 left blank
    sheet.write_number(3, 0, 2.0).unwrap();
    sheet.write_string(3, 1, "Sex?").unwrap();
    sheet.write_string(3, 2, "sex").unwrap();
    sheet.write_string(3, 3, "CAT-ME").unwrap();
    sheet.write_string(3, 4, "Male || Female || Other").unwrap();
    sheet.write_string(4, 0, "2.1").unwrap();
    sheet.write_string(4, 1, "Pregnant?").unwrap();
    sheet.write_boolean(4, 2, true).unwrap();

    workbook.save(&path).unwrap();
    path
}

#[test]
fn loads_selected_sheet_with_row_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_questionnaire(&dir);
    let options = IngestOptions::new().with_sheet(SheetSelector::Name("Questions".into()));

    let store = load_store(&path, &options).unwrap();

    assert_eq!(
        store.schema(),
        ["s_no", "questions", "var_name", "question_type", "possible_options"]
    );
    let keys: Vec<&str> = store.iter().map(|r| r.key().as_str()).collect();
    assert_eq!(keys, ["row-2", "row-4", "row-5"]);

    let first = &store.records()[0];
    assert_eq!(first.text("s_no"), Some("1"));
    assert_eq!(first.text("possible_options"), Some(""));

    let second = &store.records()[1];
    assert_eq!(
        second.get("possible_options"),
        Some(&FieldValue::list(["Male", "Female", "Other"]))
    );
    assert_eq!(store.records()[2].text("var_name"), Some("TRUE"));
}

#[test]
fn sheet_index_defaults_to_first() {
    let dir = TempDir::new().unwrap();
    let path = write_questionnaire(&dir);

    let store = load_store(&path, &IngestOptions::default()).unwrap();

    assert_eq!(store.schema(), ["read_me_first"]);
    assert!(store.is_empty());
    assert_eq!(list_sheets(&path).unwrap(), ["Intro", "Questions"]);
}

#[test]
fn unknown_sheet_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_questionnaire(&dir);
    let options = IngestOptions::new().with_sheet(SheetSelector::Index(7));

    let err = load_store(&path, &options).unwrap_err();

    match err {
        IngestError::SheetNotFound { sheet, available, .. } => {
            assert_eq!(sheet, "#7");
            assert_eq!(available, "Intro, Questions");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn missing_file_is_a_read_failure() {
    let dir = TempDir::new().unwrap();
    let err = load_store(&dir.path().join("absent.xlsx"), &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn export_round_trips_through_preloaded_json() {
    let dir = TempDir::new().unwrap();
    let path = write_questionnaire(&dir);
    let options = IngestOptions::new().with_sheet(SheetSelector::Index(1));
    let store = load_store(&path, &options).unwrap();

    let exported = dir.path().join("mapping.json");
    write_export(&exported, &store).unwrap();
    let reloaded = load_store(&exported, &IngestOptions::default()).unwrap();

    assert_eq!(reloaded, store);
}
