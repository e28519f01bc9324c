//! The survey-to-risk prediction pipeline.
//!
//! ```text
//! SurveyRecord -> encode -> project -> predict_proba -> classify_tier
//! ```
//!
//! Every step is a pure function of the record and the two immutable
//! artifacts, so identical records always produce identical results.

use cvd_core::{FieldKind, PredictionResult, SurveyField, SurveyRecord};

use crate::classifier::ProbabilityModel;
use crate::encoder::CategoryEncoder;
use crate::error::{ArtifactError, EncodingError, PipelineError, SchemaMismatchError};

/// Record columns after encoding, still in form order.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRecord {
    columns: Vec<(&'static str, f64)>,
}

impl EncodedRecord {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| *value)
    }

    #[must_use]
    pub fn columns(&self) -> &[(&'static str, f64)] {
        &self.columns
    }
}

/// Encoded values in the model's declared feature order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Encoder and model bundled for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct PredictionPipeline<E, M> {
    encoder: E,
    model: M,
}

impl<E: CategoryEncoder, M: ProbabilityModel> PredictionPipeline<E, M> {
    /// Bundle without startup checks. Every request is still fully checked.
    pub const fn new(encoder: E, model: M) -> Self {
        Self { encoder, model }
    }

    /// Bundle after checking the artifacts fit together.
    ///
    /// Every categorical survey column the model consumes must have an
    /// encoder; numeric columns pass through. Declared features the survey
    /// cannot provide are logged, and every request will then fail with
    /// [`SchemaMismatchError`].
    pub fn checked(encoder: E, model: M) -> Result<Self, ArtifactError> {
        let declared = model.feature_names();
        let uncovered: Vec<&str> = SurveyField::ALL
            .iter()
            .filter(|field| field.kind() == FieldKind::Categorical)
            .map(|field| field.column())
            .filter(|column| declared.iter().any(|name| name.as_str() == *column))
            .filter(|column| !encoder.covers(column))
            .collect();
        if !uncovered.is_empty() {
            return Err(ArtifactError::Invalid {
                artifact: "encoder artifact",
                reason: format!("no encoder for categorical columns: {}", uncovered.join(", ")),
            });
        }

        for name in declared {
            if !SurveyField::ALL.iter().any(|field| *name == field.column()) {
                tracing::warn!(
                    feature = %name,
                    "model declares a feature the survey does not collect"
                );
            }
        }
        for field in SurveyField::ALL {
            if field.kind() == FieldKind::Numeric && encoder.covers(field.column()) {
                tracing::warn!(
                    column = field.column(),
                    "numeric column has an encoder; values are looked up, not passed through"
                );
            }
        }

        Ok(Self::new(encoder, model))
    }

    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Step 1: replace categorical values by their codes.
    ///
    /// A column covered by the encoder is always looked up, even when it is
    /// numeric. An uncovered categorical column is an error rather than a
    /// silent passthrough.
    pub fn encode(&self, record: &SurveyRecord) -> Result<EncodedRecord, EncodingError> {
        let mut columns = Vec::with_capacity(SurveyField::ALL.len());
        for (field, value) in record.features() {
            let column = field.column();
            let encoded = if self.encoder.covers(column) {
                code_to_feature(self.encoder.encode(column, &value.lookup_key())?)
            } else {
                value.as_number().ok_or_else(|| EncodingError::MissingEncoder {
                    column: column.to_string(),
                })?
            };
            columns.push((column, encoded));
        }
        Ok(EncodedRecord { columns })
    }

    /// Step 2: select and order columns exactly as the model declares them.
    ///
    /// Columns the model does not declare are dropped.
    pub fn project(&self, encoded: &EncodedRecord) -> Result<FeatureVector, SchemaMismatchError> {
        self.model
            .feature_names()
            .iter()
            .map(|name| {
                encoded
                    .get(name)
                    .ok_or_else(|| SchemaMismatchError::MissingFeature {
                        feature: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FeatureVector)
    }

    /// Run every step and classify the class-1 probability.
    pub fn predict(&self, record: &SurveyRecord) -> Result<PredictionResult, PipelineError> {
        let encoded = self.encode(record)?;
        let vector = self.project(&encoded)?;
        let [_, positive] = self.model.predict_proba(vector.as_slice())?;
        if !positive.is_finite() || !(0.0..=1.0).contains(&positive) {
            return Err(PipelineError::InvalidProbability { value: positive });
        }

        let result = PredictionResult::from_probability(positive);
        tracing::debug!(
            probability = result.probability,
            tier = %result.risk_tier,
            features = vector.len(),
            "prediction complete"
        );
        Ok(result)
    }
}

// Codes are small label indices.
#[allow(clippy::cast_precision_loss)]
fn code_to_feature(code: i64) -> f64 {
    code as f64
}
