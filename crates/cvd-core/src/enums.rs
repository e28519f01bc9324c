//! Categorical survey answers.
//!
//! Every variant serializes to its canonical label: the exact string the
//! label encoders were fitted on (`"Within the past year"`, `"80+"`, ...).
//! Parsing accepts the label case-insensitively or a kebab-case alias
//! (`within-past-year`, `80-plus`), which is what CLI flags use.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A fixed option set for one categorical question.
pub trait SurveyChoice: Copy + Eq + fmt::Display + 'static {
    /// Human-readable name of the option set, used in error messages.
    const NAME: &'static str;

    /// All options in form order. The first one is the form default.
    fn options() -> &'static [Self];

    /// Canonical label, identical to the encoder's category string.
    fn label(self) -> &'static str;

    /// Kebab-case alias accepted on the command line.
    fn alias(self) -> &'static str;

    #[must_use]
    fn labels() -> Vec<&'static str> {
        Self::options().iter().map(|option| option.label()).collect()
    }
}

/// Parse a raw answer into a choice, naming `field` on failure.
pub fn parse_choice<T: SurveyChoice>(raw: &str, field: &str) -> Result<T, CoreError> {
    let trimmed = raw.trim();
    let kebab = trimmed.replace('_', "-");
    T::options()
        .iter()
        .copied()
        .find(|option| {
            option.label().eq_ignore_ascii_case(trimmed)
                || option.alias().eq_ignore_ascii_case(&kebab)
        })
        .ok_or_else(|| CoreError::UnknownValue {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

macro_rules! survey_choice {
    (
        $(#[$meta:meta])*
        $name:ident, $display:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal, $alias:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl SurveyChoice for $name {
            const NAME: &'static str = $display;

            fn options() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn label(self) -> &'static str {
                self.as_str()
            }

            fn alias(self) -> &'static str {
                match self {
                    $(Self::$variant => $alias,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                parse_choice(raw, $display)
            }
        }
    };
}

survey_choice! {
    /// Biological sex as recorded by the survey.
    Sex, "sex" {
        Female => "Female", "female";
        Male => "Male", "male";
    }
}

survey_choice! {
    /// Five-year age band; the last band is open-ended.
    AgeCategory, "age category" {
        From18To24 => "18-24", "18-24";
        From25To29 => "25-29", "25-29";
        From30To34 => "30-34", "30-34";
        From35To39 => "35-39", "35-39";
        From40To44 => "40-44", "40-44";
        From45To49 => "45-49", "45-49";
        From50To54 => "50-54", "50-54";
        From55To59 => "55-59", "55-59";
        From60To64 => "60-64", "60-64";
        From65To69 => "65-69", "65-69";
        From70To74 => "70-74", "70-74";
        From75To79 => "75-79", "75-79";
        EightyPlus => "80+", "80-plus";
    }
}

survey_choice! {
    /// Plain yes/no answer.
    YesNo, "yes/no answer" {
        No => "No", "no";
        Yes => "Yes", "yes";
    }
}

survey_choice! {
    /// Self-reported general health, best first.
    GeneralHealth, "general health" {
        Excellent => "Excellent", "excellent";
        VeryGood => "Very Good", "very-good";
        Good => "Good", "good";
        Fair => "Fair", "fair";
        Poor => "Poor", "poor";
    }
}

survey_choice! {
    /// Time since the last routine medical checkup, most recent first.
    CheckupRecency, "checkup recency" {
        WithinPastYear => "Within the past year", "within-past-year";
        WithinPast2Years => "Within the past 2 years", "within-past-2-years";
        WithinPast5Years => "Within the past 5 years", "within-past-5-years";
        FiveOrMoreYearsAgo => "5 or more years ago", "5-or-more-years";
        Never => "Never", "never";
    }
}

survey_choice! {
    /// Diabetes diagnosis, including the borderline and pregnancy-only variants.
    DiabetesStatus, "diabetes status" {
        No => "No", "no";
        Yes => "Yes", "yes";
        Prediabetes => "No, pre-diabetes or borderline diabetes", "borderline";
        PregnancyOnly => "Yes, but female told only during pregnancy", "pregnancy-only";
    }
}

impl YesNo {
    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}
