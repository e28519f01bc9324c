//! # cvd-inference
//!
//! Turns a [`SurveyRecord`](cvd_core::SurveyRecord) into a
//! [`PredictionResult`](cvd_core::PredictionResult).
//!
//! The trained artifacts stay opaque behind two narrow seams:
//! - [`CategoryEncoder`]: `encode(column, raw) -> code`
//! - [`ProbabilityModel`]: declared feature order + `predict_proba`
//!
//! [`LabelEncoders`] and [`Classifier`] implement them for the JSON artifact
//! exports; tests plug in fakes.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! let pipeline = cvd_inference::load_pipeline(
//!     Path::new("label_encoders.json"),
//!     Path::new("model.json"),
//! )
//! .expect("artifacts load");
//! # let record: cvd_core::SurveyRecord = unimplemented!();
//! let result = pipeline.predict(&record).expect("prediction");
//! println!("{:.1}% ({})", result.probability * 100.0, result.risk_tier);
//! ```

pub mod classifier;
pub mod encoder;
pub mod error;
pub mod pipeline;

pub use classifier::{Classifier, ModelSpec, ProbabilityModel};
pub use encoder::{CategoryEncoder, LabelEncoders};
pub use error::{ArtifactError, EncodingError, PipelineError, SchemaMismatchError};
pub use pipeline::{EncodedRecord, FeatureVector, PredictionPipeline};

use std::path::Path;

/// Load both artifacts and build a coverage-checked pipeline.
///
/// Any failure here is fatal for the process.
pub fn load_pipeline(
    encoders_path: &Path,
    model_path: &Path,
) -> Result<PredictionPipeline<LabelEncoders, Classifier>, ArtifactError> {
    let encoders = LabelEncoders::from_path(encoders_path)?;
    let classifier = Classifier::from_path(model_path)?;
    tracing::debug!(
        encoders = %encoders_path.display(),
        model = %model_path.display(),
        columns = encoders.len(),
        features = classifier.feature_names().len(),
        "artifacts loaded"
    );
    PredictionPipeline::checked(encoders, classifier)
}
