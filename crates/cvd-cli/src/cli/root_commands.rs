use std::path::PathBuf;

use clap::builder::RangedI64ValueParser;
use clap::{Args, Subcommand};
use cvd_core::SurveyField;
use cvd_core::enums::{
    AgeCategory, CheckupRecency, DiabetesStatus, GeneralHealth, Sex, SurveyChoice, YesNo,
    parse_choice,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Predict risk from flags or a JSON survey file.
    Predict(PredictArgs),
    /// Fill in the survey interactively.
    Form,
    /// Print the survey JSON schema and the model's feature order.
    Schema,
    /// Base64-encode the banner video for embedding.
    EncodeVideo(EncodeVideoArgs),
}

/// One flag per survey answer. Flags override answers read from `--input`.
#[derive(Clone, Debug, Default, Args)]
pub struct PredictArgs {
    /// JSON survey file using canonical labels.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    #[arg(long, value_parser = choice::<Sex>)]
    pub sex: Option<Sex>,
    /// Age bracket, e.g. 45-49 or 80-plus.
    #[arg(long, value_parser = choice::<AgeCategory>)]
    pub age_category: Option<AgeCategory>,
    #[arg(long, value_parser = survey_range(SurveyField::HeightCm))]
    pub height_cm: Option<u16>,
    #[arg(long, value_parser = survey_range(SurveyField::WeightKg))]
    pub weight_kg: Option<u16>,
    #[arg(long, value_parser = choice::<YesNo>)]
    pub smoking_history: Option<YesNo>,
    #[arg(long, value_parser = choice::<YesNo>)]
    pub exercise: Option<YesNo>,
    #[arg(long, value_parser = choice::<YesNo>)]
    pub depression: Option<YesNo>,
    /// Days with alcohol in the past month.
    #[arg(long, alias = "alcohol", value_parser = survey_range(SurveyField::AlcoholDaysPerMonth))]
    pub alcohol_days_per_month: Option<u16>,
    #[arg(long, value_parser = choice::<GeneralHealth>)]
    pub general_health: Option<GeneralHealth>,
    /// Last routine checkup, e.g. within-past-year or never.
    #[arg(long, alias = "checkup", value_parser = choice::<CheckupRecency>)]
    pub checkup_recency: Option<CheckupRecency>,
    /// Fruit servings per month.
    #[arg(long, alias = "fruit", value_parser = survey_range(SurveyField::FruitServings))]
    pub fruit_servings: Option<u16>,
    /// Green vegetable servings per month.
    #[arg(long, alias = "vegetables", value_parser = survey_range(SurveyField::VegetableServings))]
    pub vegetable_servings: Option<u16>,
    /// Fried potato servings per month.
    #[arg(long, alias = "fries", value_parser = survey_range(SurveyField::FriedPotatoServings))]
    pub fried_potato_servings: Option<u16>,
    #[arg(long, alias = "diabetes", value_parser = choice::<DiabetesStatus>)]
    pub diabetes_status: Option<DiabetesStatus>,
    #[arg(long, value_parser = choice::<YesNo>)]
    pub arthritis: Option<YesNo>,
    #[arg(long, alias = "skin-cancer", value_parser = choice::<YesNo>)]
    pub skin_cancer_history: Option<YesNo>,
    #[arg(long, alias = "other-cancer", value_parser = choice::<YesNo>)]
    pub other_cancer_history: Option<YesNo>,
}

#[derive(Clone, Debug, Args)]
pub struct EncodeVideoArgs {
    /// Video to encode (defaults to `media.video_path`).
    pub input: Option<PathBuf>,
    /// Where to write the base64 text (defaults to `media.encoded_path`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn choice<T: SurveyChoice>(raw: &str) -> Result<T, String> {
    parse_choice(raw, T::NAME).map_err(|error| {
        format!("{error} (expected one of: {})", T::labels().join(", "))
    })
}

fn survey_range(field: SurveyField) -> RangedI64ValueParser<u16> {
    let range = field.range().unwrap_or(0..=u16::MAX);
    clap::value_parser!(u16).range(i64::from(*range.start())..=i64::from(*range.end()))
}
