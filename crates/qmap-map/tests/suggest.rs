use qmap_map::SuggestionEngine;
use qmap_model::LOGICAL_FIELDS;

#[test]
fn suggests_sources_for_logical_fields() {
    let engine = SuggestionEngine::new(0.8);
    let sources = ["sno", "question", "var_name", "qtype"];

    let result = engine.suggest(&LOGICAL_FIELDS, &sources);

    let variable = result.for_field("variable_name").unwrap();
    assert_eq!(variable.source_field, "var_name");
    assert!(variable.confidence >= 0.9);
    assert_eq!(
        result.for_field("questions").map(|s| s.source_field.as_str()),
        Some("question")
    );
    assert!(result.unmatched.contains(&"order".to_string()));
}

#[test]
fn each_source_is_suggested_at_most_once() {
    let engine = SuggestionEngine::new(0.8);
    let sources = ["question"];

    let result = engine.suggest(&LOGICAL_FIELDS, &sources);

    assert_eq!(result.suggestions.len(), 1);
    assert_eq!(result.suggestions[0].logical_field, "questions");
    assert!(result.unmatched.contains(&"question_type".to_string()));
}

#[test]
fn exact_names_score_one() {
    let engine = SuggestionEngine::default();
    let result = engine.suggest(&["order"], &["Order"]);
    assert_eq!(result.suggestions[0].confidence, 1.0);
    assert!(result.unmatched.is_empty());
}
