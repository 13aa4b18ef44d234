//! Input data model and validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{ChartError, ChartResult};

/// Tabular input for a grouped column chart.
///
/// `series[i][j]` is drawn in the category group `tick_labels[i][j]`, colored
/// by series index `i` and labelled `series_labels[i]` in the legend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub series: Vec<Vec<f64>>,
    #[serde(default)]
    pub series_labels: Vec<String>,
    pub tick_labels: Vec<Vec<String>>,
}

impl ChartData {
    pub fn new(
        series: Vec<Vec<f64>>,
        series_labels: Vec<String>,
        tick_labels: Vec<Vec<String>>,
    ) -> Self {
        Self {
            series,
            series_labels,
            tick_labels,
        }
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Total number of values (= number of bars).
    pub fn value_count(&self) -> usize {
        self.series.iter().map(Vec::len).sum()
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate(&self.series, &self.series_labels, &self.tick_labels)
    }
}

/// Check that the three input sequences line up and every value is drawable.
///
/// ### Errors
/// - `EmptyData` when there is no series or no value at all
/// - `ShapeMismatch` when labels and values are misaligned, or a series
///   names the same category twice
/// - `InvalidValue` for negative or non-finite values
pub fn validate(
    series: &[Vec<f64>],
    series_labels: &[String],
    tick_labels: &[Vec<String>],
) -> ChartResult<()> {
    if series.is_empty() {
        return Err(ChartError::EmptyData);
    }
    if series_labels.len() < series.len() {
        return Err(ChartError::ShapeMismatch(format!(
            "{} series labels for {} series",
            series_labels.len(),
            series.len()
        )));
    }
    if tick_labels.len() != series.len() {
        return Err(ChartError::ShapeMismatch(format!(
            "{} tick label sequences for {} series",
            tick_labels.len(),
            series.len()
        )));
    }
    for (i, (values, ticks)) in series.iter().zip(tick_labels).enumerate() {
        if values.len() != ticks.len() {
            return Err(ChartError::ShapeMismatch(format!(
                "series {i} has {} values but {} tick labels",
                values.len(),
                ticks.len()
            )));
        }
        let mut seen = HashSet::with_capacity(ticks.len());
        if let Some(dup) = ticks.iter().find(|t| !seen.insert(t.as_str())) {
            return Err(ChartError::ShapeMismatch(format!(
                "series {i} repeats category '{dup}'"
            )));
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ChartError::InvalidValue {
                series: i,
                index,
                value,
            });
        }
    }
    if series.iter().all(Vec::is_empty) {
        return Err(ChartError::EmptyData);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{i}")).collect()
    }

    fn ticks(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("c{i}")).collect()
    }

    #[test]
    fn accepts_jagged_and_empty_series() {
        let data = ChartData::new(
            vec![vec![1.0, 2.0], vec![], vec![0.0]],
            labels(3),
            vec![ticks(2), vec![], ticks(1)],
        );
        assert!(data.validate().is_ok());
        assert_eq!(data.value_count(), 3);
    }

    #[test]
    fn rejects_missing_series_labels() {
        let err = validate(&[vec![1.0], vec![2.0]], &labels(1), &[ticks(1), ticks(1)]);
        assert!(matches!(err, Err(ChartError::ShapeMismatch(_))));
    }

    #[test]
    fn rejects_tick_label_length_mismatch() {
        let err = validate(&[vec![1.0, 2.0]], &labels(1), &[ticks(3)]);
        assert!(matches!(err, Err(ChartError::ShapeMismatch(_))));
    }

    #[test]
    fn rejects_repeated_category_within_a_series() {
        let repeated = vec!["a".to_string(), "a".to_string()];
        let err = validate(&[vec![1.0, 2.0]], &labels(1), &[repeated]);
        assert!(matches!(err, Err(ChartError::ShapeMismatch(ref m)) if m.contains("'a'")));
        // the same category in different series is a group, not a repeat
        assert!(validate(&[vec![1.0], vec![2.0]], &labels(2), &[ticks(1), ticks(1)]).is_ok());
    }

    #[test]
    fn rejects_negative_and_nan_values() {
        let err = validate(&[vec![1.0, -2.0]], &labels(1), &[ticks(2)]);
        assert!(matches!(
            err,
            Err(ChartError::InvalidValue { series: 0, index: 1, .. })
        ));
        let err = validate(&[vec![f64::NAN]], &labels(1), &[ticks(1)]);
        assert!(matches!(err, Err(ChartError::InvalidValue { .. })));
    }

    #[test]
    fn rejects_no_values() {
        assert!(matches!(validate(&[], &[], &[]), Err(ChartError::EmptyData)));
        let err = validate(&[vec![], vec![]], &labels(2), &[vec![], vec![]]);
        assert!(matches!(err, Err(ChartError::EmptyData)));
    }

    #[test]
    fn deserializes_camel_case_json() {
        let json = r#"{"series":[[1,2]],"seriesLabels":["A"],"tickLabels":[["x","y"]]}"#;
        let data: ChartData = serde_json::from_str(json).unwrap();
        assert_eq!(data.series, vec![vec![1.0, 2.0]]);
        assert_eq!(data.tick_labels[0][1], "y");
    }
}
