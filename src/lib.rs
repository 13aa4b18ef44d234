//! colchart_rs
//!
//! A lightweight Rust library for laying out and rendering grouped
//! (multi-series) column charts. Pairs with the `colchart` CLI.
//!
//! ### Features
//! - Two-pass axis sizing so rotated category labels and wide value labels
//!   never clip
//! - Optional legend, title and caption, measured before the plot is sized
//! - Configurable gap between the columns of a group
//! - Locale-aware value ticks (`30,000` vs `30.000`)
//! - Annotated SVG (classes, `data-*` attributes, tooltips) or PNG output
//! - Load input from JSON or wide CSV tables
//!
//! ### Example
//! ```no_run
//! use colchart_rs::viz::{ChartProps, Container, LegendPosition, render_column_chart};
//!
//! let series = vec![vec![10.0, 20.0, 30.0], vec![15.0, 5.0, 25.0]];
//! let labels = vec!["North".to_string(), "South".to_string()];
//! let ticks: Vec<Vec<String>> = vec![
//!     vec!["Q1".into(), "Q2".into(), "Q3".into()],
//!     vec!["Q1".into(), "Q2".into(), "Q3".into()],
//! ];
//! let props = ChartProps {
//!     display_legend: true,
//!     legend_position: LegendPosition::West,
//!     chart_title: Some("Revenue".into()),
//!     multi_series_gap: 20.0,
//!     ..ChartProps::default()
//! };
//! let mut container = Container::new(960, 500);
//! let layout = render_column_chart(&series, &labels, &ticks, "chart", &mut container, &props)?;
//! println!("plot area {}x{}", layout.plot_width, layout.plot_height);
//! colchart_rs::viz::svg::save_svg(&container, "revenue.svg")?;
//! # Ok::<(), colchart_rs::ChartError>(())
//! ```

pub mod error;
pub mod models;
pub mod stats;
pub mod storage;
pub mod viz;

pub use error::{ChartError, ChartResult};
pub use models::ChartData;
pub use viz::{ChartLayout, ChartProps, ColumnChart, Container, LegendPosition};
