#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use matchtree_core::codec::PatternOptions;
use matchtree_core::{Formula, MatchConfig, MatchTreeError, Relation, Scalar};
use serde_json::json;

fn events_pattern() -> matchtree_core::ExpectedTree {
    let options = PatternOptions::new()
        .with_capture("$/events/0/ts", "ts")
        .with_capture("$/events/0/seq", "seq")
        .with_capture("$/events/0/left", "left");
    expected_json_with(
        json!({"events": [{"ts": 0, "seq": 0, "left": 0}]}),
        &options,
    )
}

#[test]
fn test_timestamps_increase_with_sequence() {
    // GIVEN events whose ts and seq move together and left counts down
    let actual = actual_json(json!({"events": [
        {"ts": 100, "seq": 1, "left": 9},
        {"ts": 200, "seq": 2, "left": 8},
        {"ts": 300, "seq": 3, "left": 7}
    ]}));
    let expected = events_pattern();

    // WHEN matching
    let report = expected.run(&actual, &MatchConfig::default()).unwrap();
    assert!(report.is_match());

    // THEN derived checks hold
    assert!(report.evaluate(&Formula::increasing("ts")).unwrap());
    assert!(report.evaluate(&Formula::increasing("seq")).unwrap());
    assert!(!report.evaluate(&Formula::increasing("left")).unwrap());
    assert!(report
        .evaluate(&Formula::pairwise("seq", "left", Relation::ConstantSum))
        .unwrap());
    assert!(report
        .evaluate(&Formula::pairwise("seq", "ts", Relation::LessThan))
        .unwrap());
}

#[test]
fn test_non_monotonic_detected() {
    let actual = actual_json(json!({"events": [
        {"ts": 100, "seq": 1, "left": 0},
        {"ts": 50, "seq": 2, "left": 0}
    ]}));
    let expected = events_pattern();
    let report = expected.run(&actual, &MatchConfig::default()).unwrap();
    assert!(!report.evaluate(&Formula::increasing("ts")).unwrap());
    assert!(report.evaluate(&Formula::non_decreasing("left")).unwrap());
}

#[test]
fn test_captured_values_in_document_order() {
    let actual = actual_json(json!({"events": [
        {"ts": "a", "seq": 1, "left": 0},
        {"ts": "b", "seq": 2, "left": 0}
    ]}));
    let expected = events_pattern();
    let report = expected.run(&actual, &MatchConfig::default()).unwrap();
    let ts: Vec<Scalar> = report
        .captures()
        .values("ts")
        .unwrap()
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(ts, vec![Scalar::from("a"), Scalar::from("b")]);

    let err = report.evaluate(&Formula::increasing("ts")).unwrap_err();
    assert!(matches!(err, MatchTreeError::NonNumericCapture { .. }));
}

#[test]
fn test_evaluate_after_failed_match() {
    let actual = actual_json(json!({"events": []}));
    let expected = events_pattern();
    let report = expected.run(&actual, &MatchConfig::default()).unwrap();
    assert!(!report.is_match());
    assert_eq!(
        report.evaluate(&Formula::increasing("nope")).unwrap_err(),
        MatchTreeError::MatchFailed
    );
}

#[test]
fn test_unknown_label_after_success() {
    let actual = actual_json(json!({"events": [{"ts": 1, "seq": 1, "left": 1}]}));
    let expected = events_pattern();
    let report = expected.run(&actual, &MatchConfig::default()).unwrap();
    assert_eq!(
        report.evaluate(&Formula::increasing("nope")).unwrap_err(),
        MatchTreeError::CaptureNotFound {
            label: "nope".to_string()
        }
    );
}

#[test]
fn test_formula_from_toml_fixture() {
    #[derive(serde::Deserialize)]
    struct Fixture {
        checks: Vec<Formula>,
    }
    let fixture: Fixture = toml::from_str(
        r#"
        [[checks]]
        type = "monotonic"
        label = "ts"
        strict = true

        [[checks]]
        type = "pairwise"
        left = "seq"
        right = "left"
        relation = "constant_sum"
        "#,
    )
    .unwrap();
    assert_eq!(fixture.checks[0], Formula::increasing("ts"));
    assert_eq!(
        fixture.checks[1],
        Formula::pairwise("seq", "left", Relation::ConstantSum)
    );
}
