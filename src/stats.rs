//! Collation of the input series and per-series summary statistics.

use serde::{Deserialize, Serialize};

/// Collated view of all series: what the layout needs before any scale exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Collate {
    /// Largest value over all series (0 when every value is 0).
    pub max: f64,
    /// Number of values per series, in series order.
    pub lengths: Vec<usize>,
    /// Ordered union of the tick labels of all series (first occurrence wins).
    pub categories: Vec<String>,
}

impl Collate {
    pub fn total(&self) -> usize {
        self.lengths.iter().sum()
    }
}

/// Gather the global maximum, per-series lengths and the category domain.
///
/// Series may be jagged: a category that only appears in a later series is
/// appended after the categories of the earlier ones.
pub fn collate(series: &[Vec<f64>], tick_labels: &[Vec<String>]) -> Collate {
    let max = series
        .iter()
        .flatten()
        .copied()
        .fold(0.0f64, f64::max);
    let lengths = series.iter().map(Vec::len).collect();

    let mut categories: Vec<String> = Vec::new();
    for label in tick_labels.iter().flatten() {
        if !categories.iter().any(|c| c == label) {
            categories.push(label.clone());
        }
    }

    Collate {
        max,
        lengths,
        categories,
    }
}

/// Summary statistics for one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub label: String,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Per-series statistics, in series order.
pub fn series_summary(series: &[Vec<f64>], series_labels: &[String]) -> Vec<Summary> {
    series
        .iter()
        .enumerate()
        .map(|(i, values)| {
            let mut vals: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
            vals.sort_by(f64::total_cmp);
            let count = vals.len();
            let mean = if count > 0 {
                Some(vals.iter().sum::<f64>() / count as f64)
            } else {
                None
            };
            let median = if count == 0 {
                None
            } else if count % 2 == 1 {
                Some(vals[count / 2])
            } else {
                Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
            };
            Summary {
                label: series_labels
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Series-{i}")),
                count,
                min: vals.first().copied(),
                max: vals.last().copied(),
                mean,
                median,
            }
        })
        .collect()
}
