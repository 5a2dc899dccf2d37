use serde::Serialize;

use crate::utils::constants::SUMMARY_DECIMALS;

const NOT_AVAILABLE: &str = "N/A";

/// Mean, sum and count of one resampled column.
///
/// An empty input has no mean (shown as "N/A"), a sum of 0 and a count of 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub mean: Option<f64>,
    pub sum: f64,
    pub count: usize,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        let total: f64 = values.iter().sum();
        let mean = (count > 0).then(|| round_to(total / count as f64, SUMMARY_DECIMALS));

        Self {
            mean,
            sum: round_to(total, SUMMARY_DECIMALS),
            count,
        }
    }

    pub fn mean_text(&self) -> String {
        self.mean
            .map(decimal_text)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn sum_text(&self) -> String {
        decimal_text(self.sum)
    }

    pub fn count_text(&self) -> String {
        self.count.to_string()
    }
}

/// Integral values keep one decimal place (`10.0`)
fn decimal_text(value: f64) -> String {
    format!("{:?}", value)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_summary() {
        let summary = Summary::from_values(&[10.0]);
        assert_eq!(summary.mean, Some(10.0));
        assert_eq!(summary.sum, 10.0);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean_text(), "10.0");
        assert_eq!(summary.sum_text(), "10.0");
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let summary = Summary::from_values(&[1.0, 2.0, 2.0]);
        assert_eq!(summary.mean, Some(1.67));
        assert_eq!(summary.sum, 5.0);

        let summary = Summary::from_values(&[0.125, 0.3333]);
        assert_eq!(summary.sum, 0.46);
        assert_eq!(summary.sum_text(), "0.46");
    }

    #[test]
    fn test_empty_summary_does_not_fail() {
        let summary = Summary::from_values(&[]);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.mean_text(), "N/A");
        assert_eq!(summary.sum_text(), "0.0");
        assert_eq!(summary.count_text(), "0");
    }
}
