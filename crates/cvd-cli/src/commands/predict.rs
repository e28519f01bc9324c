use std::path::Path;

use anyhow::Context;
use cvd_config::CvdConfig;
use cvd_core::{PredictionReport, SurveyDraft, SurveyRecord};
use cvd_inference::{CategoryEncoder, PredictionPipeline, ProbabilityModel};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::PredictArgs;
use crate::output::output_report;
use crate::progress::Progress;

/// Handle `cvd predict`.
pub fn handle(args: &PredictArgs, config: &CvdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let pipeline = bootstrap::load_pipeline(config, flags)?;
    let record = collect_record(args)?;
    let report = run(&pipeline, &record)?;
    output_report(&report, flags.format)
}

/// Run one prediction. Pipeline failures are logged and reported, never fatal.
pub fn run<E, M>(
    pipeline: &PredictionPipeline<E, M>,
    record: &SurveyRecord,
) -> anyhow::Result<PredictionReport>
where
    E: CategoryEncoder,
    M: ProbabilityModel,
{
    let progress = Progress::spinner("Calculating your risk...");
    match pipeline.predict(record) {
        Ok(result) => {
            progress.finish_clear();
            Ok(result.into())
        }
        Err(error) => {
            progress.finish_err("prediction failed");
            tracing::error!(error = ?error, "prediction failed");
            Err(anyhow::Error::new(error).context("prediction failed"))
        }
    }
}

/// Merge `--input` and per-field flags; flags win.
fn collect_record(args: &PredictArgs) -> anyhow::Result<SurveyRecord> {
    let mut draft = match &args.input {
        Some(path) => SurveyDraft::from(read_survey(path)?),
        None => SurveyDraft::new(),
    };
    apply_flags(&mut draft, args);
    Ok(draft.submit()?)
}

fn read_survey(path: &Path) -> anyhow::Result<SurveyRecord> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read survey file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse survey file {}", path.display()))
}

fn apply_flags(draft: &mut SurveyDraft, args: &PredictArgs) {
    draft.sex = args.sex.or(draft.sex);
    draft.age_category = args.age_category.or(draft.age_category);
    draft.height_cm = args.height_cm.or(draft.height_cm);
    draft.weight_kg = args.weight_kg.or(draft.weight_kg);
    draft.smoking_history = args.smoking_history.or(draft.smoking_history);
    draft.exercise = args.exercise.or(draft.exercise);
    draft.depression = args.depression.or(draft.depression);
    draft.alcohol_days_per_month = args.alcohol_days_per_month.or(draft.alcohol_days_per_month);
    draft.general_health = args.general_health.or(draft.general_health);
    draft.checkup_recency = args.checkup_recency.or(draft.checkup_recency);
    draft.fruit_servings = args.fruit_servings.or(draft.fruit_servings);
    draft.vegetable_servings = args.vegetable_servings.or(draft.vegetable_servings);
    draft.fried_potato_servings = args.fried_potato_servings.or(draft.fried_potato_servings);
    draft.diabetes_status = args.diabetes_status.or(draft.diabetes_status);
    draft.arthritis = args.arthritis.or(draft.arthritis);
    draft.skin_cancer_history = args.skin_cancer_history.or(draft.skin_cancer_history);
    draft.other_cancer_history = args.other_cancer_history.or(draft.other_cancer_history);
}
