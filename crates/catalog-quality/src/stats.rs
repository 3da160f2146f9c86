use serde::{Deserialize, Serialize};

use catalog_core::Dataset;

/// Descriptive statistics of one numeric column. Absent for empty columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Sample standard deviation (n - 1); needs at least two values.
    pub std_dev: Option<f64>,
}

pub fn describe(dataset: &Dataset, columns: &[&str]) -> Vec<ColumnSummary> {
    columns
        .iter()
        .map(|column| summarize(column, &dataset.numeric_values(column)))
        .collect()
}

fn summarize(column: &str, values: &[f64]) -> ColumnSummary {
    let count = values.len();
    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
    let std_dev = mean.filter(|_| count > 1).map(|mean| {
        let squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
        (squares / (count - 1) as f64).sqrt()
    });

    ColumnSummary {
        column: column.to_string(),
        count,
        min: values.iter().copied().reduce(f64::min),
        max: values.iter().copied().reduce(f64::max),
        mean,
        median: median(values),
        std_dev,
    }
}

/// Median of `values`; the mean of the two middle values for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_handles_odd_and_even_counts() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn summary_uses_sample_standard_deviation() {
        let summary = summarize("stock", &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(summary.count, 8);
        assert_eq!(summary.min, Some(2.0));
        assert_eq!(summary.max, Some(9.0));
        assert_eq!(summary.mean, Some(5.0));
        assert_eq!(summary.median, Some(4.5));
        let std_dev = summary.std_dev.expect("std dev");
        assert!((std_dev - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_no_standard_deviation() {
        let summary = summarize("stock", &[1.0]);
        assert_eq!(summary.std_dev, None);
        assert_eq!(summary.mean, Some(1.0));
    }
}
