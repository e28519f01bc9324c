//! The survey record and the collector that assembles it.
//!
//! A [`SurveyRecord`] is only ever built complete: the [`SurveyDraft`]
//! collects answers one field at a time and refuses to submit while any
//! question is unanswered.

use std::borrow::Cow;
use std::fmt;
use std::ops::RangeInclusive;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{
    AgeCategory, CheckupRecency, DiabetesStatus, GeneralHealth, Sex, SurveyChoice, YesNo,
    parse_choice,
};
use crate::errors::CoreError;

pub const HEIGHT_CM_RANGE: RangeInclusive<u16> = 90..=250;
pub const WEIGHT_KG_RANGE: RangeInclusive<u16> = 20..=300;
pub const ALCOHOL_DAYS_RANGE: RangeInclusive<u16> = 0..=30;
pub const SERVINGS_RANGE: RangeInclusive<u16> = 0..=130;

// Form defaults for numeric questions. Choice questions default to their
// first option.
pub const DEFAULT_HEIGHT_CM: u16 = 170;
pub const DEFAULT_WEIGHT_KG: u16 = 70;
pub const DEFAULT_ALCOHOL_DAYS: u16 = 0;
pub const DEFAULT_FRUIT_SERVINGS: u16 = 30;
pub const DEFAULT_VEGETABLE_SERVINGS: u16 = 30;
pub const DEFAULT_FRIED_POTATO_SERVINGS: u16 = 15;

/// Whether a field is encoded through a lookup table or passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Categorical,
    Numeric,
}

/// One of the 17 survey questions, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurveyField {
    Sex,
    AgeCategory,
    HeightCm,
    WeightKg,
    SmokingHistory,
    Exercise,
    Depression,
    AlcoholDaysPerMonth,
    GeneralHealth,
    CheckupRecency,
    FruitServings,
    VegetableServings,
    FriedPotatoServings,
    DiabetesStatus,
    Arthritis,
    SkinCancerHistory,
    OtherCancerHistory,
}

impl SurveyField {
    pub const ALL: [Self; 17] = [
        Self::Sex,
        Self::AgeCategory,
        Self::HeightCm,
        Self::WeightKg,
        Self::SmokingHistory,
        Self::Exercise,
        Self::Depression,
        Self::AlcoholDaysPerMonth,
        Self::GeneralHealth,
        Self::CheckupRecency,
        Self::FruitServings,
        Self::VegetableServings,
        Self::FriedPotatoServings,
        Self::DiabetesStatus,
        Self::Arthritis,
        Self::SkinCancerHistory,
        Self::OtherCancerHistory,
    ];

    /// Field name in a JSON survey file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sex => "sex",
            Self::AgeCategory => "age_category",
            Self::HeightCm => "height_cm",
            Self::WeightKg => "weight_kg",
            Self::SmokingHistory => "smoking_history",
            Self::Exercise => "exercise",
            Self::Depression => "depression",
            Self::AlcoholDaysPerMonth => "alcohol_days_per_month",
            Self::GeneralHealth => "general_health",
            Self::CheckupRecency => "checkup_recency",
            Self::FruitServings => "fruit_servings",
            Self::VegetableServings => "vegetable_servings",
            Self::FriedPotatoServings => "fried_potato_servings",
            Self::DiabetesStatus => "diabetes_status",
            Self::Arthritis => "arthritis",
            Self::SkinCancerHistory => "skin_cancer_history",
            Self::OtherCancerHistory => "other_cancer_history",
        }
    }

    /// Column name the encoders and the classifier were trained with.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Sex => "Sex",
            Self::AgeCategory => "Age_Category",
            Self::HeightCm => "Height_(cm)",
            Self::WeightKg => "Weight_(kg)",
            Self::SmokingHistory => "Smoking_History",
            Self::Exercise => "Exercise",
            Self::Depression => "Depression",
            Self::AlcoholDaysPerMonth => "Alcohol_Consumption",
            Self::GeneralHealth => "General_Health",
            Self::CheckupRecency => "Checkup",
            Self::FruitServings => "Fruit_Consumption",
            Self::VegetableServings => "Green_Vegetables_Consumption",
            Self::FriedPotatoServings => "FriedPotato_Consumption",
            Self::DiabetesStatus => "Diabetes",
            Self::Arthritis => "Arthritis",
            Self::SkinCancerHistory => "Skin_Cancer",
            Self::OtherCancerHistory => "Other_Cancer",
        }
    }

    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self.range() {
            Some(_) => FieldKind::Numeric,
            None => FieldKind::Categorical,
        }
    }

    /// Allowed range for numeric fields; `None` for categorical ones.
    #[must_use]
    pub const fn range(self) -> Option<RangeInclusive<u16>> {
        match self {
            Self::HeightCm => Some(HEIGHT_CM_RANGE),
            Self::WeightKg => Some(WEIGHT_KG_RANGE),
            Self::AlcoholDaysPerMonth => Some(ALCOHOL_DAYS_RANGE),
            Self::FruitServings | Self::VegetableServings | Self::FriedPotatoServings => {
                Some(SERVINGS_RANGE)
            }
            _ => None,
        }
    }

    /// Canonical option labels for categorical fields; `None` for numeric ones.
    #[must_use]
    pub fn options(self) -> Option<Vec<&'static str>> {
        match self {
            Self::Sex => Some(Sex::labels()),
            Self::AgeCategory => Some(AgeCategory::labels()),
            Self::SmokingHistory
            | Self::Exercise
            | Self::Depression
            | Self::Arthritis
            | Self::SkinCancerHistory
            | Self::OtherCancerHistory => Some(YesNo::labels()),
            Self::GeneralHealth => Some(GeneralHealth::labels()),
            Self::CheckupRecency => Some(CheckupRecency::labels()),
            Self::DiabetesStatus => Some(DiabetesStatus::labels()),
            Self::HeightCm
            | Self::WeightKg
            | Self::AlcoholDaysPerMonth
            | Self::FruitServings
            | Self::VegetableServings
            | Self::FriedPotatoServings => None,
        }
    }

    /// The answer a form pre-selects for this field.
    #[must_use]
    pub fn default_answer(self) -> Cow<'static, str> {
        let numeric = match self {
            Self::HeightCm => DEFAULT_HEIGHT_CM,
            Self::WeightKg => DEFAULT_WEIGHT_KG,
            Self::AlcoholDaysPerMonth => DEFAULT_ALCOHOL_DAYS,
            Self::FruitServings => DEFAULT_FRUIT_SERVINGS,
            Self::VegetableServings => DEFAULT_VEGETABLE_SERVINGS,
            Self::FriedPotatoServings => DEFAULT_FRIED_POTATO_SERVINGS,
            _ => {
                let first = self
                    .options()
                    .and_then(|options| options.first().copied())
                    .unwrap_or_default();
                return Cow::Borrowed(first);
            }
        };
        Cow::Owned(numeric.to_string())
    }
}

impl fmt::Display for SurveyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw, not yet encoded, feature value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureValue {
    Category(&'static str),
    Numeric(u16),
}

impl FeatureValue {
    /// String form used for encoder lookups.
    #[must_use]
    pub fn lookup_key(self) -> Cow<'static, str> {
        match self {
            Self::Category(label) => Cow::Borrowed(label),
            Self::Numeric(value) => Cow::Owned(value.to_string()),
        }
    }

    /// Numeric passthrough value, if this is a numeric feature.
    #[must_use]
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Category(_) => None,
            Self::Numeric(value) => Some(f64::from(value)),
        }
    }
}

/// One complete set of survey answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SurveyRecord {
    pub sex: Sex,
    pub age_category: AgeCategory,
    #[schemars(range(min = 90, max = 250))]
    pub height_cm: u16,
    #[schemars(range(min = 20, max = 300))]
    pub weight_kg: u16,
    pub smoking_history: YesNo,
    pub exercise: YesNo,
    pub depression: YesNo,
    #[schemars(range(min = 0, max = 30))]
    pub alcohol_days_per_month: u16,
    pub general_health: GeneralHealth,
    pub checkup_recency: CheckupRecency,
    #[schemars(range(min = 0, max = 130))]
    pub fruit_servings: u16,
    #[schemars(range(min = 0, max = 130))]
    pub vegetable_servings: u16,
    #[schemars(range(min = 0, max = 130))]
    pub fried_potato_servings: u16,
    pub diabetes_status: DiabetesStatus,
    pub arthritis: YesNo,
    pub skin_cancer_history: YesNo,
    pub other_cancer_history: YesNo,
}

impl SurveyRecord {
    /// All fields with their raw values, in form order.
    #[must_use]
    pub fn features(&self) -> [(SurveyField, FeatureValue); 17] {
        use FeatureValue::{Category, Numeric};

        [
            (SurveyField::Sex, Category(self.sex.as_str())),
            (SurveyField::AgeCategory, Category(self.age_category.as_str())),
            (SurveyField::HeightCm, Numeric(self.height_cm)),
            (SurveyField::WeightKg, Numeric(self.weight_kg)),
            (SurveyField::SmokingHistory, Category(self.smoking_history.as_str())),
            (SurveyField::Exercise, Category(self.exercise.as_str())),
            (SurveyField::Depression, Category(self.depression.as_str())),
            (SurveyField::AlcoholDaysPerMonth, Numeric(self.alcohol_days_per_month)),
            (SurveyField::GeneralHealth, Category(self.general_health.as_str())),
            (SurveyField::CheckupRecency, Category(self.checkup_recency.as_str())),
            (SurveyField::FruitServings, Numeric(self.fruit_servings)),
            (SurveyField::VegetableServings, Numeric(self.vegetable_servings)),
            (SurveyField::FriedPotatoServings, Numeric(self.fried_potato_servings)),
            (SurveyField::DiabetesStatus, Category(self.diabetes_status.as_str())),
            (SurveyField::Arthritis, Category(self.arthritis.as_str())),
            (SurveyField::SkinCancerHistory, Category(self.skin_cancer_history.as_str())),
            (SurveyField::OtherCancerHistory, Category(self.other_cancer_history.as_str())),
        ]
    }

    /// Check every numeric field against its range.
    ///
    /// Records built through [`SurveyDraft`] are always valid; this exists
    /// for records deserialized from a file.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in self.features() {
            if let FeatureValue::Numeric(number) = value {
                check_range(field, i64::from(number))?;
            }
        }
        Ok(())
    }
}

/// Answers collected so far; turns into a [`SurveyRecord`] on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyDraft {
    pub sex: Option<Sex>,
    pub age_category: Option<AgeCategory>,
    pub height_cm: Option<u16>,
    pub weight_kg: Option<u16>,
    pub smoking_history: Option<YesNo>,
    pub exercise: Option<YesNo>,
    pub depression: Option<YesNo>,
    pub alcohol_days_per_month: Option<u16>,
    pub general_health: Option<GeneralHealth>,
    pub checkup_recency: Option<CheckupRecency>,
    pub fruit_servings: Option<u16>,
    pub vegetable_servings: Option<u16>,
    pub fried_potato_servings: Option<u16>,
    pub diabetes_status: Option<DiabetesStatus>,
    pub arthritis: Option<YesNo>,
    pub skin_cancer_history: Option<YesNo>,
    pub other_cancer_history: Option<YesNo>,
}

impl SurveyDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and store a raw answer for `field`.
    ///
    /// The answer is validated against the field's own domain only; a
    /// rejected answer leaves the previous value in place.
    pub fn set(&mut self, field: SurveyField, raw: &str) -> Result<(), CoreError> {
        let name = field.name();
        match field {
            SurveyField::Sex => self.sex = Some(parse_choice(raw, name)?),
            SurveyField::AgeCategory => self.age_category = Some(parse_choice(raw, name)?),
            SurveyField::HeightCm => self.height_cm = Some(parse_number(field, raw)?),
            SurveyField::WeightKg => self.weight_kg = Some(parse_number(field, raw)?),
            SurveyField::SmokingHistory => self.smoking_history = Some(parse_choice(raw, name)?),
            SurveyField::Exercise => self.exercise = Some(parse_choice(raw, name)?),
            SurveyField::Depression => self.depression = Some(parse_choice(raw, name)?),
            SurveyField::AlcoholDaysPerMonth => {
                self.alcohol_days_per_month = Some(parse_number(field, raw)?);
            }
            SurveyField::GeneralHealth => self.general_health = Some(parse_choice(raw, name)?),
            SurveyField::CheckupRecency => self.checkup_recency = Some(parse_choice(raw, name)?),
            SurveyField::FruitServings => self.fruit_servings = Some(parse_number(field, raw)?),
            SurveyField::VegetableServings => {
                self.vegetable_servings = Some(parse_number(field, raw)?);
            }
            SurveyField::FriedPotatoServings => {
                self.fried_potato_servings = Some(parse_number(field, raw)?);
            }
            SurveyField::DiabetesStatus => self.diabetes_status = Some(parse_choice(raw, name)?),
            SurveyField::Arthritis => self.arthritis = Some(parse_choice(raw, name)?),
            SurveyField::SkinCancerHistory => {
                self.skin_cancer_history = Some(parse_choice(raw, name)?);
            }
            SurveyField::OtherCancerHistory => {
                self.other_cancer_history = Some(parse_choice(raw, name)?);
            }
        }
        Ok(())
    }

    /// Whether `field` has an answer.
    #[must_use]
    pub const fn is_answered(&self, field: SurveyField) -> bool {
        match field {
            SurveyField::Sex => self.sex.is_some(),
            SurveyField::AgeCategory => self.age_category.is_some(),
            SurveyField::HeightCm => self.height_cm.is_some(),
            SurveyField::WeightKg => self.weight_kg.is_some(),
            SurveyField::SmokingHistory => self.smoking_history.is_some(),
            SurveyField::Exercise => self.exercise.is_some(),
            SurveyField::Depression => self.depression.is_some(),
            SurveyField::AlcoholDaysPerMonth => self.alcohol_days_per_month.is_some(),
            SurveyField::GeneralHealth => self.general_health.is_some(),
            SurveyField::CheckupRecency => self.checkup_recency.is_some(),
            SurveyField::FruitServings => self.fruit_servings.is_some(),
            SurveyField::VegetableServings => self.vegetable_servings.is_some(),
            SurveyField::FriedPotatoServings => self.fried_potato_servings.is_some(),
            SurveyField::DiabetesStatus => self.diabetes_status.is_some(),
            SurveyField::Arthritis => self.arthritis.is_some(),
            SurveyField::SkinCancerHistory => self.skin_cancer_history.is_some(),
            SurveyField::OtherCancerHistory => self.other_cancer_history.is_some(),
        }
    }

    /// Unanswered fields, in form order.
    #[must_use]
    pub fn missing(&self) -> Vec<SurveyField> {
        SurveyField::ALL
            .into_iter()
            .filter(|field| !self.is_answered(*field))
            .collect()
    }

    /// Assemble the complete record.
    ///
    /// Fails with [`CoreError::Incomplete`] naming every unanswered field.
    pub fn submit(&self) -> Result<SurveyRecord, CoreError> {
        let missing = || CoreError::Incomplete {
            missing: self
                .missing()
                .into_iter()
                .map(|field| field.name().to_string())
                .collect(),
        };

        let record = SurveyRecord {
            sex: self.sex.ok_or_else(missing)?,
            age_category: self.age_category.ok_or_else(missing)?,
            height_cm: self.height_cm.ok_or_else(missing)?,
            weight_kg: self.weight_kg.ok_or_else(missing)?,
            smoking_history: self.smoking_history.ok_or_else(missing)?,
            exercise: self.exercise.ok_or_else(missing)?,
            depression: self.depression.ok_or_else(missing)?,
            alcohol_days_per_month: self.alcohol_days_per_month.ok_or_else(missing)?,
            general_health: self.general_health.ok_or_else(missing)?,
            checkup_recency: self.checkup_recency.ok_or_else(missing)?,
            fruit_servings: self.fruit_servings.ok_or_else(missing)?,
            vegetable_servings: self.vegetable_servings.ok_or_else(missing)?,
            fried_potato_servings: self.fried_potato_servings.ok_or_else(missing)?,
            diabetes_status: self.diabetes_status.ok_or_else(missing)?,
            arthritis: self.arthritis.ok_or_else(missing)?,
            skin_cancer_history: self.skin_cancer_history.ok_or_else(missing)?,
            other_cancer_history: self.other_cancer_history.ok_or_else(missing)?,
        };
        record.validate()?;
        Ok(record)
    }
}

impl From<SurveyRecord> for SurveyDraft {
    fn from(record: SurveyRecord) -> Self {
        Self {
            sex: Some(record.sex),
            age_category: Some(record.age_category),
            height_cm: Some(record.height_cm),
            weight_kg: Some(record.weight_kg),
            smoking_history: Some(record.smoking_history),
            exercise: Some(record.exercise),
            depression: Some(record.depression),
            alcohol_days_per_month: Some(record.alcohol_days_per_month),
            general_health: Some(record.general_health),
            checkup_recency: Some(record.checkup_recency),
            fruit_servings: Some(record.fruit_servings),
            vegetable_servings: Some(record.vegetable_servings),
            fried_potato_servings: Some(record.fried_potato_servings),
            diabetes_status: Some(record.diabetes_status),
            arthritis: Some(record.arthritis),
            skin_cancer_history: Some(record.skin_cancer_history),
            other_cancer_history: Some(record.other_cancer_history),
        }
    }
}

fn parse_number(field: SurveyField, raw: &str) -> Result<u16, CoreError> {
    let value = raw.trim().parse::<i64>().map_err(|_| {
        CoreError::Validation(format!("{field}: '{raw}' is not a whole number"))
    })?;
    check_range(field, value)
}

fn check_range(field: SurveyField, value: i64) -> Result<u16, CoreError> {
    let Some(range) = field.range() else {
        return Err(CoreError::Validation(format!("{field} is not a numeric field")));
    };
    let (min, max) = (i64::from(*range.start()), i64::from(*range.end()));
    if !(min..=max).contains(&value) {
        return Err(CoreError::OutOfRange {
            field: field.name().to_string(),
            value,
            min,
            max,
        });
    }
    u16::try_from(value).map_err(|_| CoreError::Validation(format!("{field}: {value} overflows")))
}
