#![allow(dead_code)]

use std::path::PathBuf;

use cvd_core::SurveyRecord;
use cvd_core::enums::{AgeCategory, CheckupRecency, DiabetesStatus, GeneralHealth, Sex, YesNo};

/// Male, 45-49, 175 cm, 80 kg, active non-smoker in good health.
pub fn reference_record() -> SurveyRecord {
    SurveyRecord {
        sex: Sex::Male,
        age_category: AgeCategory::From45To49,
        height_cm: 175,
        weight_kg: 80,
        smoking_history: YesNo::No,
        exercise: YesNo::Yes,
        depression: YesNo::No,
        alcohol_days_per_month: 2,
        general_health: GeneralHealth::Good,
        checkup_recency: CheckupRecency::WithinPastYear,
        fruit_servings: 20,
        vegetable_servings: 20,
        fried_potato_servings: 10,
        diabetes_status: DiabetesStatus::No,
        arthritis: YesNo::No,
        skin_cancer_history: YesNo::No,
        other_cancer_history: YesNo::No,
    }
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
