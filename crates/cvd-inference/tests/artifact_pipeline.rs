//! End-to-end tests against the JSON artifact fixtures.

mod common;

use std::io::Write;

use cvd_core::enums::{AgeCategory, CheckupRecency, YesNo};
use cvd_core::{PredictionReport, RiskTier, classify_tier};
use cvd_inference::{
    ArtifactError, Classifier, LabelEncoders, PredictionPipeline, ProbabilityModel, load_pipeline,
};
use pretty_assertions::assert_eq;

use common::{fixture, reference_record};

fn fixture_pipeline() -> PredictionPipeline<LabelEncoders, Classifier> {
    load_pipeline(&fixture("label_encoders.json"), &fixture("model.json"))
        .expect("fixtures should load")
}

#[test]
fn reference_record_scores_low() {
    let pipeline = fixture_pipeline();
    let result = pipeline.predict(&reference_record()).unwrap();

    assert!((0.0..=1.0).contains(&result.probability));
    assert_eq!(result.risk_tier, classify_tier(result.probability));
    // Tree leaves: 0.10, 0.15, 0.20.
    assert!((result.probability - 0.15).abs() < 1e-9);
    assert_eq!(result.risk_tier, RiskTier::Low);

    let report = PredictionReport::from(result);
    assert!((report.percent - 15.0).abs() < 1e-9);
    assert_eq!(report.color, "#6FCF97");
}

#[test]
fn older_sedentary_record_scores_high() {
    let pipeline = fixture_pipeline();
    let mut record = reference_record();
    record.age_category = AgeCategory::EightyPlus;
    record.weight_kg = 120;
    record.exercise = YesNo::No;
    record.fried_potato_servings = 40;
    record.checkup_recency = CheckupRecency::Never;

    let result = pipeline.predict(&record).unwrap();
    // Tree leaves: 0.80, 0.80, 0.55.
    assert!((result.probability - 2.15 / 3.0).abs() < 1e-9);
    assert_eq!(result.risk_tier, RiskTier::High);
}

#[test]
fn active_smoker_scores_moderate() {
    let pipeline = fixture_pipeline();
    let mut record = reference_record();
    record.age_category = AgeCategory::EightyPlus;
    record.weight_kg = 120;
    record.smoking_history = YesNo::Yes;
    record.fried_potato_servings = 40;
    record.checkup_recency = CheckupRecency::Never;

    let result = pipeline.predict(&record).unwrap();
    // Tree leaves: 0.80, 0.30, 0.55.
    assert!((result.probability - 0.55).abs() < 1e-9);
    assert_eq!(result.risk_tier, RiskTier::Moderate);
}

#[test]
fn fixture_model_declares_training_order() {
    let pipeline = fixture_pipeline();
    let names = pipeline.model().feature_names();
    assert_eq!(names.len(), 17);
    assert_eq!(names[0], "General_Health");
    assert_eq!(names[16], "FriedPotato_Consumption");
}

#[test]
fn missing_model_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_pipeline(&fixture("label_encoders.json"), &dir.path().join("absent.json"))
        .err()
        .expect("load should fail");
    assert!(matches!(err, ArtifactError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_encoders_are_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ \"Sex\": ").unwrap();

    let err = load_pipeline(file.path(), &fixture("model.json"))
        .err()
        .expect("load should fail");
    let ArtifactError::Parse { path, .. } = &err else {
        panic!("expected parse error, got {err}");
    };
    assert_eq!(path.as_deref(), Some(file.path()));
}

#[test]
fn malformed_json_is_a_parse_error_from_file_or_memory() {
    let raw = r#"{ "feature_names": ["Sex"], "model": "#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(raw.as_bytes()).unwrap();

    let from_file = Classifier::from_path(file.path()).unwrap_err();
    let from_memory = Classifier::from_json_str(raw).unwrap_err();
    assert!(matches!(from_file, ArtifactError::Parse { path: Some(_), .. }));
    assert!(matches!(from_memory, ArtifactError::Parse { path: None, .. }));
}

#[test]
fn encoders_missing_a_model_column_fail_at_startup() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{ "Sex": ["Female", "Male"] }"#).unwrap();

    let err = load_pipeline(file.path(), &fixture("model.json"))
        .err()
        .expect("load should fail");
    let ArtifactError::Invalid { reason, .. } = err else {
        panic!("expected invalid artifact, got {err}");
    };
    assert!(reason.contains("Age_Category"));
}

#[test]
fn forest_splitting_past_declared_features_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"{
            "feature_names": ["Sex"],
            "model": {
                "type": "random_forest",
                "trees": [{
                    "children_left": [1, -1, -1],
                    "children_right": [2, -1, -1],
                    "feature": [3, -2, -2],
                    "threshold": [0.5, -2.0, -2.0],
                    "value": [[1.0, 1.0], [1.0, 0.0], [0.0, 1.0]]
                }]
            }
        }"#,
    )
    .unwrap();

    let err = Classifier::from_path(file.path()).unwrap_err();
    assert!(matches!(err, ArtifactError::Invalid { .. }));
    assert!(err.to_string().contains("splits on feature 3"));
}
