//! Grouped column chart layout and rendering.
//!
//! - Two-pass axis sizing: the x-axis height is measured on a provisional
//!   band scale, the y-axis width on the resulting plot height, then the
//!   final band scale uses what is left
//! - Legend measured after drawing and reserved before any scale exists
//! - Locale-aware value ticks (`30,000` vs `30.000`)
//! - Output to annotated **SVG** or **PNG**

pub mod axis;
pub mod geometry;
pub mod legend;
pub mod measure;
pub mod raster;
pub mod scale;
pub mod scene;
pub mod svg;
pub mod text;
pub mod types;
pub mod util;

// Re-export types for public API
pub use geometry::{BarGeometry, BarParams, bar_geometry};
pub use legend::{LegendRenderer, PanelLegend};
pub use measure::{HeuristicMeasurer, Measurer};
pub use scale::{BandScale, D3Scales, LinearScale, ScaleProvider};
pub use scene::Container;
pub use types::{ChartProps, DEFAULT_PADDING, Extent, LegendPosition, Padding};

use serde::Serialize;
use std::path::Path;

use crate::error::{ChartError, ChartResult};
use crate::models::{self, ChartData};
use crate::stats;

use axis::Axis;
use scene::{ChartElement, Group, Label, Rect};
use types::{CAPTION_FONT_PX, TITLE_FONT_PX};
use util::PALETTE;

/// Everything the layout derived for one draw, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub legend_width: f64,
    pub title_height: f64,
    pub caption_height: f64,
    pub x_axis_height: f64,
    pub y_axis_width: f64,
    /// Left edge of the plot area inside the chart element.
    pub plot_left: f64,
    /// Top edge of the plot area inside the chart element.
    pub plot_top: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub band_width: f64,
    /// Drawn width of a single column (slot width minus gap).
    pub bar_width: f64,
    pub gap: f64,
    /// Horizontal translation of the chart element (legend width when the
    /// legend sits on the west edge, 0 otherwise).
    pub chart_translate_x: f64,
    pub y_max: f64,
    pub categories: Vec<String>,
    pub bars: Vec<BarGeometry>,
}

/// Layout engine with injectable measurement, legend and scale collaborators.
pub struct ColumnChart {
    measurer: Box<dyn Measurer>,
    legend: Box<dyn LegendRenderer>,
    scales: Box<dyn ScaleProvider>,
    padding: Padding,
}

impl Default for ColumnChart {
    fn default() -> Self {
        Self {
            measurer: Box::new(HeuristicMeasurer),
            legend: Box::new(PanelLegend::default()),
            scales: Box::new(D3Scales::default()),
            padding: DEFAULT_PADDING,
        }
    }
}

impl ColumnChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_measurer(mut self, measurer: impl Measurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    pub fn with_legend_renderer(mut self, legend: impl LegendRenderer + 'static) -> Self {
        self.legend = Box::new(legend);
        self
    }

    pub fn with_scales(mut self, scales: impl ScaleProvider + 'static) -> Self {
        self.scales = Box::new(scales);
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn measurer(&self) -> &dyn Measurer {
        self.measurer.as_ref()
    }

    /// Lay out and draw a grouped column chart into `container`.
    ///
    /// Any previous legend and chart in the container are replaced. Nothing
    /// is touched when the input or the properties are rejected.
    ///
    /// ### Errors
    /// - `Config` for a zero-sized container, a gap outside `[0, 100)`, a
    ///   non-finite rotation or a container too small for a plot area
    /// - `EmptyData`, `ShapeMismatch`, `InvalidValue` from input validation
    pub fn render(
        &self,
        series: &[Vec<f64>],
        series_labels: &[String],
        tick_labels: &[Vec<String>],
        target_class: &str,
        container: &mut Container,
        props: &ChartProps,
    ) -> ChartResult<ChartLayout> {
        validate_props(container, props)?;
        models::validate(series, series_labels, tick_labels)?;

        let collated = stats::collate(series, tick_labels);
        let width = container.width() as f64;
        let height = container.height() as f64;
        let pad = self.padding;
        let measurer = self.measurer.as_ref();
        log::debug!(
            "collated {} series, {} bars, {} categories, max {}",
            series.len(),
            collated.total(),
            collated.categories.len(),
            collated.max
        );

        // Legend first: its width shrinks everything else.
        let mut scratch = Container::new(container.width(), container.height());
        let legend = if props.display_legend {
            self.legend.draw_legend(
                series,
                series_labels,
                &PALETTE,
                &mut scratch,
                props.legend_position,
                measurer,
            );
            scratch.legend().cloned()
        } else {
            None
        };
        let legend_width = legend
            .as_ref()
            .map_or(0.0, |g| measurer.element_extent(g).width);

        let title = props.title();
        let caption = props.caption();
        let title_height = title.map_or(0.0, |t| measurer.text_extent(t, TITLE_FONT_PX).height);
        let caption_height =
            caption.map_or(0.0, |c| measurer.text_extent(c, CAPTION_FONT_PX).height);
        log::debug!(
            "legend width {legend_width}, title height {title_height}, caption height {caption_height}"
        );

        let chart_width = width - legend_width;
        let rotation = props.x_axis_tick_label_rotation;

        // Pass 1: the x-axis height on the full width decides the plot height.
        let provisional_width = chart_width - pad.left - pad.right;
        if provisional_width <= 0.0 {
            return Err(too_small("width", width));
        }
        let provisional_x = self
            .scales
            .band(&collated.categories, (0.0, provisional_width));
        let x_axis_height = measurer
            .axis_extent(&Axis::bottom(&provisional_x, rotation))
            .height;

        let plot_height =
            height - title_height - caption_height - pad.top - pad.bottom - x_axis_height;
        if plot_height <= 0.0 {
            return Err(too_small("height", height));
        }
        let y_max = if collated.max > 0.0 { collated.max } else { 1.0 };
        let y = self.scales.linear((0.0, y_max), (plot_height, 0.0));
        let y_axis = Axis::left(&y, &props.locale);
        let y_axis_width = measurer.axis_extent(&y_axis).width;

        // Pass 2: the final band scale uses what the y-axis leaves.
        let plot_width = chart_width - y_axis_width - pad.left - pad.right;
        if plot_width <= 0.0 {
            return Err(too_small("width", width));
        }
        let x = self.scales.band(&collated.categories, (0.0, plot_width));
        let x_axis = Axis::bottom(&x, rotation);
        log::debug!(
            "x-axis height {x_axis_height}, y-axis width {y_axis_width}, plot {plot_width}x{plot_height}"
        );

        let plot_left = y_axis_width + pad.left;
        let plot_top = title_height + caption_height + pad.top;

        let mut chart = ChartElement::new(target_class, chart_width, height);
        if let Some(t) = title {
            chart.push(Label::new(t, 0.0, title_height, TITLE_FONT_PX).class("chart-title"));
        }
        if let Some(c) = caption {
            chart.push(
                Label::new(c, 0.0, caption_height + title_height, CAPTION_FONT_PX)
                    .class("caption-text"),
            );
        }
        chart.push(
            x_axis
                .to_group()
                .translate(plot_left, height - pad.bottom - x_axis_height),
        );
        chart.push(y_axis.to_group().translate(plot_left, plot_top));

        let params = BarParams::new(
            x.bandwidth(),
            series.len(),
            props.multi_series_gap,
            plot_left,
            plot_top,
            plot_height,
        );
        let mut bars = Vec::with_capacity(collated.total());
        for (si, (values, categories)) in series.iter().zip(tick_labels).enumerate() {
            let label = series_labels.get(si).map(String::as_str).unwrap_or_default();
            for (vi, (&value, category)) in values.iter().zip(categories).enumerate() {
                let bar = bar_geometry(&params, &x, &y, si, vi, category, value).ok_or_else(
                    || ChartError::ShapeMismatch(format!("category '{category}' not in domain")),
                )?;
                chart.push(column_node(&bar, label));
                bars.push(bar);
            }
        }

        let chart_translate_x =
            if props.display_legend && props.legend_position == LegendPosition::West {
                legend_width
            } else {
                0.0
            };
        chart.translate_x = chart_translate_x;

        container.mount(legend, chart);
        log::debug!("mounted chart '{target_class}' with {} columns", bars.len());

        Ok(ChartLayout {
            width,
            height,
            legend_width,
            title_height,
            caption_height,
            x_axis_height,
            y_axis_width,
            plot_left,
            plot_top,
            plot_width,
            plot_height,
            band_width: x.bandwidth(),
            bar_width: params.bar_width(),
            gap: params.gap,
            chart_translate_x,
            y_max,
            categories: collated.categories,
            bars,
        })
    }
}

/// Render with the default measurer, legend and scales.
pub fn render_column_chart(
    series: &[Vec<f64>],
    series_labels: &[String],
    tick_labels: &[Vec<String>],
    target_class: &str,
    container: &mut Container,
    props: &ChartProps,
) -> ChartResult<ChartLayout> {
    ColumnChart::default().render(
        series,
        series_labels,
        tick_labels,
        target_class,
        container,
        props,
    )
}

/// Render `data` and write it to `out_path`: `.svg` produces annotated
/// markup, any other extension a PNG bitmap.
///
/// `font` is only used for bitmap output.
pub fn plot_column_chart<P: AsRef<Path>>(
    data: &ChartData,
    out_path: P,
    width: u32,
    height: u32,
    target_class: &str,
    props: &ChartProps,
    font: Option<&Path>,
) -> ChartResult<ChartLayout> {
    let out_path = out_path.as_ref();
    let mut container = Container::new(width, height);
    let layout = render_column_chart(
        &data.series,
        &data.series_labels,
        &data.tick_labels,
        target_class,
        &mut container,
        props,
    )?;

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        svg::save_svg(&container, out_path)?;
    } else {
        raster::save_png(&container, out_path, font)?;
    }
    Ok(layout)
}

fn validate_props(container: &Container, props: &ChartProps) -> ChartResult<()> {
    if container.width() == 0 || container.height() == 0 {
        return Err(ChartError::Config(format!(
            "container must have a positive size, got {}x{}",
            container.width(),
            container.height()
        )));
    }
    let gap = props.multi_series_gap;
    if !(0.0..100.0).contains(&gap) {
        return Err(ChartError::Config(format!(
            "multiSeriesGap must be in [0, 100), got {gap}"
        )));
    }
    if !props.x_axis_tick_label_rotation.is_finite() {
        return Err(ChartError::Config(
            "xAxisTickLabelRotation must be finite".into(),
        ));
    }
    Ok(())
}

fn too_small(dimension: &str, value: f64) -> ChartError {
    ChartError::Config(format!(
        "container {dimension} {value} leaves no room for the plot area"
    ))
}

fn column_node(bar: &BarGeometry, series_label: &str) -> Group {
    Group::new("series").translate(bar.x, 0.0).with(
        Rect::new(0.0, bar.y, bar.width, bar.height, bar.color)
            .class("column")
            .data("name", bar.category.as_str())
            .data("value", bar.value.to_string())
            .data("series", format!("Series-{}", bar.series_index))
            .title(format!("{}: {} ({})", bar.category, bar.value, series_label)),
    )
}
