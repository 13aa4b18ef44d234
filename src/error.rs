//! Error types for chart layout and rendering.

use thiserror::Error;

/// Errors that can occur while laying out or rendering a chart.
///
/// Input problems (`Config`, `ShapeMismatch`, `EmptyData`, `InvalidValue`) are
/// always reported before the target container is touched.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Invalid container dimensions or layout properties
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Series, series labels and tick labels do not line up
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Nothing to draw
    #[error("No data to plot")]
    EmptyData,

    /// A value the y-axis (which always starts at 0) cannot represent
    #[error("Invalid value {value} at series {series}, index {index}")]
    InvalidValue {
        series: usize,
        index: usize,
        value: f64,
    },

    /// Malformed input file content
    #[error("Parse error: {0}")]
    Parse(String),

    /// Drawing backend error
    #[error("Rendering error: {0}")]
    Render(String),

    /// Markup serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input/output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV input error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<quick_xml::Error> for ChartError {
    fn from(err: quick_xml::Error) -> Self {
        ChartError::Serialization(err.to_string())
    }
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
