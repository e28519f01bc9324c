//! `cvd form`: the survey as terminal prompts.
//!
//! Questions go to stderr so stdout carries only the rendered report.

use std::borrow::Cow;
use std::io::{BufRead, Write};

use cvd_config::CvdConfig;
use cvd_core::{PredictionReport, SurveyDraft, SurveyField, SurveyRecord};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::commands::predict;
use crate::output::output_report;

/// Handle `cvd form`.
pub fn handle(config: &CvdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let pipeline = bootstrap::load_pipeline(config, flags)?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut prompts = std::io::stderr();
    let report = run_session(&mut input, &mut prompts, |record| {
        predict::run(&pipeline, record)
    })?;

    match report {
        Some(report) => output_report(&report, flags.format),
        None => Ok(()),
    }
}

/// Ask, predict, and offer a retry after a failed prediction.
///
/// Returns `None` when the user cancels or input ends.
fn run_session<R, W, F>(
    input: &mut R,
    out: &mut W,
    mut predict: F,
) -> anyhow::Result<Option<PredictionReport>>
where
    R: BufRead,
    W: Write,
    F: FnMut(&SurveyRecord) -> anyhow::Result<PredictionReport>,
{
    let mut previous = None;
    loop {
        let Some(record) = collect(input, out, previous.as_ref())? else {
            writeln!(out, "Survey cancelled.")?;
            return Ok(None);
        };

        match predict(&record) {
            Ok(report) => return Ok(Some(report)),
            Err(error) => {
                writeln!(out, "Error during prediction: {error:#}")?;
                if !confirm(input, out, "Edit your answers and try again?")? {
                    return Err(error);
                }
                previous = Some(record);
            }
        }
    }
}

/// Ask every question in form order and assemble the record on submit.
///
/// Answers from `previous` replace the form defaults.
fn collect<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    previous: Option<&SurveyRecord>,
) -> anyhow::Result<Option<SurveyRecord>> {
    let answered = previous.map(SurveyRecord::features);
    let mut draft = SurveyDraft::new();

    for field in SurveyField::ALL {
        let default = answered
            .as_ref()
            .and_then(|features| features.iter().find(|(f, _)| *f == field))
            .map_or_else(|| field.default_answer(), |(_, value)| value.lookup_key());

        loop {
            ask(out, field, &default)?;
            let Some(line) = read_line(input)? else {
                return Ok(None);
            };
            let answer = resolve_answer(field, line.trim(), &default);
            match draft.set(field, &answer) {
                Ok(()) => break,
                Err(error) => writeln!(out, "  {error}")?,
            }
        }
    }

    if !confirm(input, out, "Submit survey?")? {
        return Ok(None);
    }
    Ok(Some(draft.submit()?))
}

fn ask<W: Write>(out: &mut W, field: SurveyField, default: &str) -> std::io::Result<()> {
    writeln!(out, "{}", question(field))?;
    match (field.options(), field.range()) {
        (Some(options), _) => {
            for (index, option) in options.iter().enumerate() {
                writeln!(out, "  {}) {option}", index + 1)?;
            }
            write!(out, "> [{default}]: ")?;
        }
        (None, Some(range)) => {
            write!(out, "> {}-{} [{default}]: ", range.start(), range.end())?;
        }
        (None, None) => write!(out, "> [{default}]: ")?,
    }
    out.flush()
}

/// Empty input selects the default; a number picks a listed option.
fn resolve_answer<'a>(field: SurveyField, raw: &'a str, default: &'a str) -> Cow<'a, str> {
    if raw.is_empty() {
        return Cow::Borrowed(default);
    }
    if let Some(options) = field.options()
        && let Ok(index) = raw.parse::<usize>()
        && let Some(option) = index.checked_sub(1).and_then(|i| options.get(i))
    {
        return Cow::Borrowed(*option);
    }
    Cow::Borrowed(raw)
}

/// Yes/no question; empty means yes, end of input means no.
fn confirm<R, W>(input: &mut R, out: &mut W, prompt: &str) -> anyhow::Result<bool>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(out, "{prompt} [Y/n]: ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(false);
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(out, "  please answer y or n")?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

const fn question(field: SurveyField) -> &'static str {
    match field {
        SurveyField::Sex => "Sex",
        SurveyField::AgeCategory => "Age category",
        SurveyField::HeightCm => "Height (cm)",
        SurveyField::WeightKg => "Weight (kg)",
        SurveyField::SmokingHistory => "Smoking history",
        SurveyField::Exercise => "Do you exercise regularly?",
        SurveyField::Depression => "Do you have depression?",
        SurveyField::AlcoholDaysPerMonth => "Alcohol consumption (days/month)",
        SurveyField::GeneralHealth => "General health",
        SurveyField::CheckupRecency => "Last medical checkup",
        SurveyField::FruitServings => "Fruit consumption (servings/month)",
        SurveyField::VegetableServings => "Green vegetable consumption (servings/month)",
        SurveyField::FriedPotatoServings => "Fried potato consumption (servings/month)",
        SurveyField::DiabetesStatus => "Do you have diabetes?",
        SurveyField::Arthritis => "Do you have arthritis?",
        SurveyField::SkinCancerHistory => "History of skin cancer?",
        SurveyField::OtherCancerHistory => "History of other cancer?",
    }
}
