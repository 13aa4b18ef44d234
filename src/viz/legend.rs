//! Legend rendering: one swatch + label row per series.

use plotters::style::RGBColor;

use super::measure::Measurer;
use super::scene::{Container, Group, Label, Rect};
use super::text::truncate_to_width;
use super::types::{LEGEND_FONT_PX, LegendPosition};
use super::util::series_color;

/// Draws a legend into a container. The layout engine measures the legend
/// the renderer leaves in `container.legend()` and reserves its width.
pub trait LegendRenderer {
    fn draw_legend(
        &self,
        series: &[Vec<f64>],
        series_labels: &[String],
        palette: &[RGBColor],
        container: &mut Container,
        position: LegendPosition,
        measurer: &dyn Measurer,
    );
}

/// Single-column legend panel on the west or east edge of the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLegend {
    pub font_px: f64,
    pub swatch_px: f64,
    pub row_gap_px: f64,
    pub padding_px: f64,
    /// Labels are truncated to this share of the container width.
    pub max_label_fraction: f64,
}

impl Default for PanelLegend {
    fn default() -> Self {
        Self {
            font_px: LEGEND_FONT_PX,
            swatch_px: 12.0,
            row_gap_px: 4.0,
            padding_px: 8.0,
            max_label_fraction: 0.25,
        }
    }
}

impl LegendRenderer for PanelLegend {
    fn draw_legend(
        &self,
        series: &[Vec<f64>],
        series_labels: &[String],
        palette: &[RGBColor],
        container: &mut Container,
        position: LegendPosition,
        measurer: &dyn Measurer,
    ) {
        let line_h = measurer.text_extent("M", self.font_px).height.max(self.swatch_px);
        let max_label_px = (container.width() as f64 * self.max_label_fraction).max(self.font_px);
        let text_x = self.padding_px + self.swatch_px + 6.0;

        let mut rows = Group::new("legend-items");
        let mut widest = 0.0f64;
        for i in 0..series.len() {
            let y = self.padding_px + i as f64 * (line_h + self.row_gap_px);
            let color = palette
                .get(i % palette.len().max(1))
                .copied()
                .unwrap_or_else(|| series_color(i));
            rows.push(
                Rect::new(
                    self.padding_px,
                    y + (line_h - self.swatch_px) / 2.0,
                    self.swatch_px,
                    self.swatch_px,
                    color,
                )
                .class("legend-swatch"),
            );
            let raw = series_labels.get(i).map(String::as_str).unwrap_or_default();
            let text = truncate_to_width(raw, self.font_px, max_label_px);
            widest = widest.max(measurer.text_extent(&text, self.font_px).width);
            rows.push(
                Label::new(text, text_x, y + measurer.ascent_ratio() * line_h, self.font_px)
                    .class("legend-label"),
            );
        }

        let rows_h = series.len() as f64 * (line_h + self.row_gap_px) - self.row_gap_px;
        let panel_w = text_x + widest + self.padding_px;
        let panel_h = rows_h.max(0.0) + 2.0 * self.padding_px;

        let x = match position {
            LegendPosition::West => 0.0,
            _ => (container.width() as f64 - panel_w).max(0.0),
        };
        let y = match position {
            LegendPosition::South => (container.height() as f64 - panel_h).max(0.0),
            _ => 0.0,
        };

        let legend = Group::new("legend")
            .translate(x, y)
            .with(Rect::new(0.0, 0.0, panel_w, panel_h, RGBColor(255, 255, 255)).class("legend-bg"))
            .with(rows);
        container.set_legend(legend);
    }
}
