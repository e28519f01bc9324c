//! Binary logistic regression.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub(crate) fn check_width(&self, width: usize) -> Result<(), String> {
        if self.coefficients.len() != width {
            return Err(format!(
                "{} coefficients for {width} declared features",
                self.coefficients.len()
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("logistic regression parameters must be finite".to_string());
        }
        Ok(())
    }

    /// `sigmoid(w·x + b)`.
    #[must_use]
    pub(crate) fn positive_probability(&self, features: &[f64]) -> f64 {
        let margin = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-margin).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_margin_is_even_odds() {
        let model = LogisticRegression {
            coefficients: vec![0.0, 0.0],
            intercept: 0.0,
        };
        assert!((model.positive_probability(&[3.0, 4.0]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn large_margin_saturates_within_unit_interval() {
        let model = LogisticRegression {
            coefficients: vec![100.0],
            intercept: 0.0,
        };
        let high = model.positive_probability(&[50.0]);
        let low = model.positive_probability(&[-50.0]);
        assert!((0.0..=1.0).contains(&high) && high > 0.999);
        assert!((0.0..=1.0).contains(&low) && low < 0.001);
    }

    #[test]
    fn non_finite_intercept_is_rejected() {
        let model = LogisticRegression {
            coefficients: vec![1.0],
            intercept: f64::NAN,
        };
        assert!(model.check_width(1).is_err());
    }
}
