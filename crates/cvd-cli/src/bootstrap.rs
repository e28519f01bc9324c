use anyhow::Context;
use cvd_config::CvdConfig;
use cvd_inference::{Classifier, LabelEncoders, PredictionPipeline};

use crate::cli::GlobalFlags;

pub type Pipeline = PredictionPipeline<LabelEncoders, Classifier>;

pub fn load_config() -> anyhow::Result<CvdConfig> {
    CvdConfig::load_with_dotenv().context("failed to load configuration")
}

/// Load both artifacts once. Failure here is fatal for the command.
pub fn load_pipeline(config: &CvdConfig, flags: &GlobalFlags) -> anyhow::Result<Pipeline> {
    let artifacts = config
        .artifacts
        .clone()
        .with_overrides(flags.encoders.clone(), flags.model.clone());
    artifacts.validate()?;

    let pipeline = cvd_inference::load_pipeline(&artifacts.encoders_path, &artifacts.model_path)
        .context("failed to load prediction artifacts")?;
    tracing::debug!(
        encoders = %artifacts.encoders_path.display(),
        model = %artifacts.model_path.display(),
        "prediction pipeline ready"
    );
    Ok(pipeline)
}
