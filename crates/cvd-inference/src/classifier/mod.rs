//! Trained binary classifiers.
//!
//! The artifact declares the feature order the model was trained with and
//! the model parameters:
//!
//! ```json
//! {
//!   "feature_names": ["General_Health", "Checkup", "..."],
//!   "model": { "type": "random_forest", "trees": [ ... ] }
//! }
//! ```
//!
//! Structural problems are rejected at load time, so prediction itself can
//! only fail on a vector of the wrong width.

mod forest;
mod logistic;

pub use forest::{DecisionTree, RandomForest};
pub use logistic::LogisticRegression;

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ArtifactError, SchemaMismatchError};

const ARTIFACT: &str = "classifier artifact";

/// An opaque model that declares its inputs and scores a feature vector.
pub trait ProbabilityModel {
    /// Feature names in the exact order `predict_proba` expects them.
    fn feature_names(&self) -> &[String];

    /// Class probabilities `[P(class=0), P(class=1)]`.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], SchemaMismatchError>;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    RandomForest(RandomForest),
    LogisticRegression(LogisticRegression),
}

impl ModelSpec {
    const fn kind(&self) -> &'static str {
        match self {
            Self::RandomForest(_) => "random_forest",
            Self::LogisticRegression(_) => "logistic_regression",
        }
    }

    /// Check the parameters against the declared input width.
    fn check_width(&self, width: usize) -> Result<(), String> {
        match self {
            Self::RandomForest(forest) => forest.check_width(width),
            Self::LogisticRegression(model) => model.check_width(width),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawClassifier {
    feature_names: Vec<String>,
    model: ModelSpec,
}

/// A loaded classifier artifact. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    feature_names: Vec<String>,
    model: ModelSpec,
}

impl TryFrom<RawClassifier> for Classifier {
    type Error = String;

    fn try_from(raw: RawClassifier) -> Result<Self, Self::Error> {
        if raw.feature_names.is_empty() {
            return Err("feature_names must not be empty".to_string());
        }
        let mut seen = HashSet::with_capacity(raw.feature_names.len());
        for name in &raw.feature_names {
            if !seen.insert(name.as_str()) {
                return Err(format!("duplicate feature name '{name}'"));
            }
        }
        raw.model.check_width(raw.feature_names.len())?;
        Ok(Self {
            feature_names: raw.feature_names,
            model: raw.model,
        })
    }
}

impl Classifier {
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            artifact: ARTIFACT,
            path: path.to_path_buf(),
            source,
        })?;
        let classifier = Self::parse(&raw, Some(path))?;
        tracing::debug!(
            kind = classifier.model.kind(),
            features = classifier.feature_names.len(),
            "classifier loaded"
        );
        Ok(classifier)
    }

    /// Parse an in-memory artifact.
    pub fn from_json_str(raw: &str) -> Result<Self, ArtifactError> {
        Self::parse(raw, None)
    }

    fn parse(raw: &str, path: Option<&Path>) -> Result<Self, ArtifactError> {
        let raw: RawClassifier =
            serde_json::from_str(raw).map_err(|source| ArtifactError::Parse {
                artifact: ARTIFACT,
                path: path.map(Path::to_path_buf),
                source,
            })?;
        Self::try_from(raw).map_err(|reason| ArtifactError::Invalid {
            artifact: ARTIFACT,
            reason,
        })
    }

    /// Build a classifier from parts, applying the same checks as loading.
    pub fn new(feature_names: Vec<String>, model: ModelSpec) -> Result<Self, ArtifactError> {
        Self::try_from(RawClassifier {
            feature_names,
            model,
        })
        .map_err(|reason| ArtifactError::Invalid {
            artifact: ARTIFACT,
            reason,
        })
    }

    #[must_use]
    pub const fn model(&self) -> &ModelSpec {
        &self.model
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.model.kind()
    }
}

impl ProbabilityModel for Classifier {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], SchemaMismatchError> {
        if features.len() != self.feature_names.len() {
            return Err(SchemaMismatchError::WidthMismatch {
                expected: self.feature_names.len(),
                actual: features.len(),
            });
        }
        let positive = match &self.model {
            ModelSpec::RandomForest(forest) => forest.positive_probability(features),
            ModelSpec::LogisticRegression(model) => model.positive_probability(features),
        };
        Ok([1.0 - positive, positive])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const LOGISTIC: &str = r#"{
        "feature_names": ["a", "b"],
        "model": { "type": "logistic_regression", "coefficients": [1.0, -1.0], "intercept": 0.0 }
    }"#;

    #[test]
    fn parses_logistic_artifact() {
        let classifier = Classifier::from_json_str(LOGISTIC).unwrap();
        assert_eq!(classifier.kind(), "logistic_regression");
        assert_eq!(classifier.feature_names(), ["a".to_string(), "b".to_string()]);
        let [negative, positive] = classifier.predict_proba(&[2.0, 2.0]).unwrap();
        assert!((positive - 0.5).abs() < 1e-12);
        assert!((negative + positive - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wrong_width_is_schema_mismatch() {
        let classifier = Classifier::from_json_str(LOGISTIC).unwrap();
        assert_eq!(
            classifier.predict_proba(&[1.0]),
            Err(SchemaMismatchError::WidthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn short_vector_for_forest_is_schema_mismatch() {
        let classifier = Classifier::from_json_str(
            r#"{
                "feature_names": ["a", "b"],
                "model": { "type": "random_forest", "trees": [{
                    "children_left": [1, -1, -1],
                    "children_right": [2, -1, -1],
                    "feature": [1, -2, -2],
                    "threshold": [0.5, -2.0, -2.0],
                    "value": [[1.0, 1.0], [1.0, 0.0], [0.0, 1.0]]
                }] }
            }"#,
        )
        .unwrap();
        assert_eq!(
            classifier.predict_proba(&[0.0]),
            Err(SchemaMismatchError::WidthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn duplicate_feature_names_are_rejected() {
        let err = Classifier::from_json_str(
            r#"{
                "feature_names": ["a", "a"],
                "model": {
                    "type": "logistic_regression",
                    "coefficients": [1.0, 1.0],
                    "intercept": 0.0
                }
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate feature name 'a'"));
    }

    #[test]
    fn coefficient_count_must_match_features() {
        let err = Classifier::from_json_str(
            r#"{
                "feature_names": ["a", "b", "c"],
                "model": { "type": "logistic_regression", "coefficients": [1.0], "intercept": 0.0 }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }));
    }

    #[test]
    fn unknown_model_type_is_a_parse_error() {
        let err =
            Classifier::from_json_str(r#"{ "feature_names": ["a"], "model": { "type": "svm" } }"#)
                .unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { path: None, .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error_without_path() {
        let err = Classifier::from_json_str(r#"{ "feature_names": "#).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { path: None, .. }));
        assert!(err.to_string().starts_with("failed to parse classifier artifact: "));
    }
}
