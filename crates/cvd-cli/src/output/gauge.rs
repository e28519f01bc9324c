//! Terminal rendering of the 0-100% risk gauge.

use cvd_core::PredictionReport;
use cvd_core::tier::GaugeBand;

use super::table::paint;

/// Gauge width in cells; each cell covers 2 percentage points.
const GAUGE_WIDTH: usize = 50;

#[must_use]
pub fn render_gauge(report: &PredictionReport, color: bool) -> String {
    let filled = percent_to_cell(report.percent);
    let mut bar = String::new();
    for cell in 0..GAUGE_WIDTH {
        let glyph = if cell < filled { "█" } else { "░" };
        if color {
            let hex = if cell < filled {
                report.color
            } else {
                band_for_cell(&report.gauge, cell).map_or(report.color, |band| band.color)
            };
            bar.push_str(&paint(glyph, hex));
        } else {
            bar.push_str(glyph);
        }
    }

    format!("{bar} {:.1}%\n{}", report.percent, scale_line(&report.gauge))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn percent_to_cell(percent: f64) -> usize {
    (percent.clamp(0.0, 100.0) * GAUGE_WIDTH as f64 / 100.0).round() as usize
}

#[allow(clippy::cast_precision_loss)]
fn band_for_cell(bands: &[GaugeBand], cell: usize) -> Option<&GaugeBand> {
    let midpoint = (cell as f64 + 0.5) * 100.0 / GAUGE_WIDTH as f64;
    bands
        .iter()
        .find(|band| band.from <= midpoint && midpoint < band.to)
}

/// Tick labels under each band boundary.
fn scale_line(bands: &[GaugeBand]) -> String {
    let mut line = vec![' '; GAUGE_WIDTH + 3];
    let mut ticks: Vec<(usize, String)> = bands
        .iter()
        .map(|band| (percent_to_cell(band.from), band.from.to_string()))
        .collect();
    if let Some(last) = bands.last() {
        let label = last.to.to_string();
        ticks.push((GAUGE_WIDTH.saturating_sub(label.len()), label));
    }

    for (start, label) in ticks {
        for (offset, ch) in label.chars().enumerate() {
            if let Some(slot) = line.get_mut(start + offset) {
                *slot = ch;
            }
        }
    }
    line.into_iter().collect::<String>().trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use cvd_core::PredictionResult;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::output::table::tests::strip_ansi;

    fn report(probability: f64) -> PredictionReport {
        PredictionReport::from(PredictionResult::from_probability(probability))
    }

    #[test]
    fn fill_tracks_percentage() {
        let gauge = render_gauge(&report(0.15), false);
        let bar = gauge.lines().next().unwrap_or_default();
        assert_eq!(bar.matches('█').count(), 8);
        assert_eq!(bar.matches('░').count(), 42);
        assert!(bar.ends_with("15.0%"));
    }

    #[test]
    fn fill_is_clamped_to_gauge() {
        let full = render_gauge(&report(1.0), false);
        assert_eq!(full.matches('█').count(), GAUGE_WIDTH);
        let empty = render_gauge(&report(0.0), false);
        assert_eq!(empty.matches('█').count(), 0);
    }

    #[test]
    fn scale_marks_band_boundaries() {
        let gauge = render_gauge(&report(0.5), false);
        let scale = gauge.lines().nth(1).unwrap_or_default();
        assert!(scale.starts_with('0'));
        assert_eq!(scale.find("40"), Some(20));
        assert_eq!(scale.find("70"), Some(35));
        assert!(scale.ends_with("100"));
    }

    #[test]
    fn colored_gauge_matches_plain_text() {
        let report = report(0.72);
        assert_eq!(
            strip_ansi(&render_gauge(&report, true)),
            render_gauge(&report, false)
        );
    }
}
