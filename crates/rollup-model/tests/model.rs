//! Tests for rollup-model types.

use rollup_model::{ConflictMarking, ConsolidateOptions, MarkerColumns, OutputMode};

#[test]
fn builder_sets_every_field() {
    let options = ConsolidateOptions::new("t", ["a", "b"])
        .with_overrides(["b"])
        .with_flag_conflicts(true)
        .with_delete_coincident(false)
        .with_conflict_marking(ConflictMarking::LaterRowOnly);

    assert_eq!(options.timestamp_column, "t");
    assert_eq!(options.data_columns, vec!["a", "b"]);
    assert!(options.is_override("b"));
    assert!(!options.is_override("a"));
    assert!(options.flag_conflicts);
    assert_eq!(options.output_mode, OutputMode::Flagged);
    assert_eq!(options.conflict_marking, ConflictMarking::LaterRowOnly);
    assert_eq!(options.markers, MarkerColumns::default());
}

#[test]
fn defaults_are_cleaned_without_flags() {
    let options = ConsolidateOptions::new("t", Vec::<String>::new());
    assert_eq!(options.output_mode, OutputMode::Cleaned);
    assert!(!options.flag_conflicts);
    assert_eq!(options.conflict_marking, ConflictMarking::BothRows);
    assert_eq!(options.markers.keep, "keep");
    assert_eq!(options.markers.conflict, "conflict");
    assert_eq!(options.markers.coincident, "coincident");
}

#[test]
fn options_deserialize_with_defaults() {
    let json = r#"{
        "timestamp_column": "when",
        "data_columns": ["x", "y"],
        "override_columns": ["y"],
        "output_mode": "flagged",
        "markers": { "conflict": "RowConflict" }
    }"#;
    let options: ConsolidateOptions = serde_json::from_str(json).expect("deserialize options");

    assert_eq!(options.timestamp_column, "when");
    assert!(options.is_override("y"));
    assert_eq!(options.output_mode, OutputMode::Flagged);
    assert!(!options.flag_conflicts);
    assert_eq!(options.markers.conflict, "RowConflict");
    assert_eq!(options.markers.keep, "keep");
}

#[test]
fn options_round_trip_through_json() {
    let options = ConsolidateOptions::new("t", ["a"]).with_flag_conflicts(true);
    let json = serde_json::to_string(&options).expect("serialize options");
    let round: ConsolidateOptions = serde_json::from_str(&json).expect("deserialize options");
    assert_eq!(round, options);
}
