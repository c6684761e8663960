use campaign_map::{ConfidenceLevel, ConfidenceThresholds, MappingSession, SuggestionEngine};
use campaign_model::{ColumnDataType, DetectedColumn};
use campaign_standards::canonical_schema;

fn facebook_export() -> Vec<DetectedColumn> {
    vec![
        DetectedColumn::new("Reporting Starts", ColumnDataType::Date),
        DetectedColumn::new("Campaign ID", ColumnDataType::String),
        DetectedColumn::new("Amount Spent (USD)", ColumnDataType::Number),
        DetectedColumn::new("Impressions", ColumnDataType::Number),
        DetectedColumn::new("Link Clicks", ColumnDataType::Number),
        DetectedColumn::new("zzqxv", ColumnDataType::String),
    ]
}

#[test]
fn suggests_aliases_and_leaves_unknown_columns() {
    let engine = SuggestionEngine::new(canonical_schema(), 0.85);
    let result = engine.suggest(&facebook_export());

    let pairs: Vec<(&str, &str)> = result
        .suggestions
        .iter()
        .map(|s| (s.column.as_str(), s.field.as_str()))
        .collect();
    assert!(pairs.contains(&("Reporting Starts", "date")));
    assert!(pairs.contains(&("Campaign ID", "campaign_id")));
    assert!(pairs.contains(&("Amount Spent (USD)", "spend")));
    assert!(pairs.contains(&("Impressions", "impressions")));
    assert!(pairs.contains(&("Link Clicks", "clicks")));
    assert_eq!(result.unmapped_columns, vec!["zzqxv".to_string()]);
    assert_eq!(result.min_confidence(), Some(1.0));
}

#[test]
fn suggestions_are_one_to_one() {
    let columns = vec![
        DetectedColumn::new("Cost", ColumnDataType::Number),
        DetectedColumn::new("Amount Spent", ColumnDataType::Number),
    ];
    let engine = SuggestionEngine::new(canonical_schema(), 0.99);
    let result = engine.suggest(&columns);

    let spend: Vec<&str> = result
        .suggestions
        .iter()
        .filter(|s| s.field == "spend")
        .map(|s| s.column.as_str())
        .collect();
    // Both are exact aliases; the first column in detection order wins.
    assert_eq!(spend, vec!["Cost"]);
    assert_eq!(result.unmapped_columns, vec!["Amount Spent".to_string()]);
}

#[test]
fn incompatible_types_are_penalized() {
    let columns = vec![DetectedColumn::new("Impressions", ColumnDataType::String)];
    let engine = SuggestionEngine::new(canonical_schema(), 0.6);
    let result = engine.suggest(&columns);
    assert!(
        result
            .suggestions
            .iter()
            .all(|s| s.field != "impressions")
    );
}

#[test]
fn suggestions_load_into_a_valid_session() {
    let columns = facebook_export();
    let engine = SuggestionEngine::new(canonical_schema(), 0.85);
    let template = engine.suggest(&columns).into_template("auto", "facebook");

    let mut session = MappingSession::new(columns, canonical_schema());
    session.load_template(&template);
    assert!(session.validate().is_valid);
    assert_eq!(
        session.validate().warnings,
        vec!["1 columns remain unmapped".to_string()]
    );
}

#[test]
fn levels_group_suggestions() {
    let engine = SuggestionEngine::new(canonical_schema(), 0.85);
    let result = engine.suggest(&facebook_export());
    let thresholds = ConfidenceThresholds::default();

    let counts = result.count_by_level(&thresholds);
    assert_eq!(counts.get(&ConfidenceLevel::High), Some(&5));
    assert_eq!(
        result
            .filter_by_level(ConfidenceLevel::High, &thresholds)
            .len(),
        5
    );
    assert_eq!(result.to_assignment().len(), 5);
}

#[test]
fn empty_input_yields_nothing() {
    let engine = SuggestionEngine::new(canonical_schema(), 0.6);
    let result = engine.suggest(&[]);
    assert!(result.suggestions.is_empty());
    assert!(result.unmapped_columns.is_empty());
    assert_eq!(result.mean_confidence(), None);
}
