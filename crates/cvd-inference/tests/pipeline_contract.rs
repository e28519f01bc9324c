//! Pipeline behavior against fake encoders and models.

mod common;

use std::cell::Cell;
use std::collections::HashMap;

use cvd_core::enums::GeneralHealth;
use cvd_core::{RiskTier, SurveyField};
use cvd_inference::{
    ArtifactError, CategoryEncoder, EncodingError, PipelineError, PredictionPipeline,
    ProbabilityModel, SchemaMismatchError,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

use common::reference_record;

/// Encodes every categorical column by option index.
struct IndexEncoder {
    columns: HashMap<&'static str, Vec<&'static str>>,
}

impl IndexEncoder {
    fn full() -> Self {
        let columns = SurveyField::ALL
            .iter()
            .filter_map(|field| field.options().map(|options| (field.column(), options)))
            .collect();
        Self { columns }
    }

    fn without(column: &str) -> Self {
        let mut encoder = Self::full();
        encoder.columns.remove(column);
        encoder
    }

    fn restricted(column: &'static str, options: Vec<&'static str>) -> Self {
        let mut encoder = Self::full();
        encoder.columns.insert(column, options);
        encoder
    }
}

impl CategoryEncoder for IndexEncoder {
    fn covers(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    fn encode(&self, column: &str, raw: &str) -> Result<i64, EncodingError> {
        let options = self
            .columns
            .get(column)
            .ok_or_else(|| EncodingError::MissingEncoder {
                column: column.to_string(),
            })?;
        options
            .iter()
            .position(|option| *option == raw)
            .map(|index| i64::try_from(index).unwrap())
            .ok_or_else(|| EncodingError::UnseenCategory {
                column: column.to_string(),
                value: raw.to_string(),
            })
    }
}

/// Returns a fixed probability and records what it was called with.
struct FixedModel {
    features: Vec<String>,
    probability: f64,
    last_input: Cell<Option<Vec<f64>>>,
}

impl FixedModel {
    fn new(features: &[&str], probability: f64) -> Self {
        Self {
            features: features.iter().map(ToString::to_string).collect(),
            probability,
            last_input: Cell::new(None),
        }
    }

    fn all_columns(probability: f64) -> Self {
        let columns: Vec<_> = SurveyField::ALL.iter().map(|f| f.column()).collect();
        Self::new(&columns, probability)
    }
}

impl ProbabilityModel for FixedModel {
    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], SchemaMismatchError> {
        self.last_input.set(Some(features.to_vec()));
        Ok([1.0 - self.probability, self.probability])
    }
}

#[rstest]
#[case(0.3999, RiskTier::Low)]
#[case(0.40, RiskTier::Moderate)]
#[case(0.6999, RiskTier::Moderate)]
#[case(0.70, RiskTier::High)]
fn tier_follows_model_probability(#[case] probability: f64, #[case] expected: RiskTier) {
    let pipeline =
        PredictionPipeline::new(IndexEncoder::full(), FixedModel::all_columns(probability));
    let result = pipeline.predict(&reference_record()).unwrap();
    assert_eq!(result.probability, probability);
    assert_eq!(result.risk_tier, expected);
}

#[test]
fn identical_records_give_identical_results() {
    let pipeline = PredictionPipeline::new(IndexEncoder::full(), FixedModel::all_columns(0.42));
    let record = reference_record();
    let first = pipeline.predict(&record).unwrap();
    let second = pipeline.predict(&record).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unseen_category_is_an_encoding_error() {
    let encoder = IndexEncoder::restricted("General_Health", vec!["Excellent", "Poor"]);
    let pipeline = PredictionPipeline::new(encoder, FixedModel::all_columns(0.5));

    let mut record = reference_record();
    record.general_health = GeneralHealth::Good;
    let err = pipeline.predict(&record).unwrap_err();

    assert_eq!(
        err,
        PipelineError::Encoding(EncodingError::UnseenCategory {
            column: "General_Health".into(),
            value: "Good".into(),
        })
    );
}

#[test]
fn uncovered_categorical_column_is_not_passed_through() {
    let pipeline =
        PredictionPipeline::new(IndexEncoder::without("Checkup"), FixedModel::all_columns(0.5));
    let err = pipeline.predict(&reference_record()).unwrap_err();
    assert_eq!(
        err,
        PipelineError::Encoding(EncodingError::MissingEncoder {
            column: "Checkup".into()
        })
    );
}

#[test]
fn checked_rejects_uncovered_categorical_column() {
    let result = PredictionPipeline::checked(
        IndexEncoder::without("Diabetes"),
        FixedModel::all_columns(0.5),
    );
    let Err(ArtifactError::Invalid { reason, .. }) = result else {
        panic!("expected invalid artifact error");
    };
    assert!(reason.contains("Diabetes"));
}

#[test]
fn checked_ignores_columns_the_model_does_not_use() {
    let model = FixedModel::new(&["Height_(cm)", "Sex"], 0.1);
    let pipeline = PredictionPipeline::checked(IndexEncoder::without("Diabetes"), model);
    assert!(pipeline.is_ok());
}

#[test]
fn missing_declared_feature_is_a_schema_mismatch() {
    let model = FixedModel::new(&["Sex", "BMI"], 0.5);
    let pipeline = PredictionPipeline::new(IndexEncoder::full(), model);
    let err = pipeline.predict(&reference_record()).unwrap_err();
    assert_eq!(
        err,
        PipelineError::SchemaMismatch(SchemaMismatchError::MissingFeature {
            feature: "BMI".into()
        })
    );
}

#[test]
fn projection_follows_declared_order_and_drops_extras() {
    let model = FixedModel::new(&["Weight_(kg)", "Sex", "Height_(cm)"], 0.5);
    let pipeline = PredictionPipeline::new(IndexEncoder::full(), model);
    pipeline.predict(&reference_record()).unwrap();

    // Male is option 1.
    let input = pipeline.model().last_input.take().unwrap();
    assert_eq!(input, vec![80.0, 1.0, 175.0]);
}

#[test]
fn encode_keeps_numeric_values_and_codes_categories() {
    let pipeline = PredictionPipeline::new(IndexEncoder::full(), FixedModel::all_columns(0.5));
    let encoded = pipeline.encode(&reference_record()).unwrap();
    assert_eq!(encoded.columns().len(), 17);
    assert_eq!(encoded.get("Alcohol_Consumption"), Some(2.0));
    assert_eq!(encoded.get("General_Health"), Some(2.0));
    assert_eq!(encoded.get("Checkup"), Some(0.0));
    assert_eq!(encoded.get("BMI"), None);
}

#[rstest]
#[case(f64::NAN)]
#[case(1.5)]
#[case(-0.1)]
fn out_of_range_probability_is_reported(#[case] probability: f64) {
    let pipeline =
        PredictionPipeline::new(IndexEncoder::full(), FixedModel::all_columns(probability));
    let err = pipeline.predict(&reference_record()).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidProbability { .. }));
}
