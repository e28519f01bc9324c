use cvd_config::CvdConfig;
use cvd_core::SurveyRecord;
use cvd_inference::{Classifier, ProbabilityModel};
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SchemaResponse {
    /// JSON Schema accepted by `cvd predict --input`.
    survey: Value,
    /// Feature order of the configured classifier, when it loads.
    model_features: Option<Vec<String>>,
}

/// Handle `cvd schema`.
pub fn handle(config: &CvdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let artifacts = config
        .artifacts
        .clone()
        .with_overrides(None, flags.model.clone());

    let model_features = match Classifier::from_path(&artifacts.model_path) {
        Ok(classifier) => Some(classifier.feature_names().to_vec()),
        Err(error) => {
            tracing::warn!(%error, "classifier unavailable; printing the survey schema only");
            None
        }
    };

    let response = SchemaResponse {
        survey: survey_schema()?,
        model_features,
    };
    output(&response, flags.format)
}

fn survey_schema() -> anyhow::Result<Value> {
    Ok(serde_json::to_value(schemars::schema_for!(SurveyRecord))?)
}
