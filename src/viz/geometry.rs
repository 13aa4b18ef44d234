//! Bar placement inside a category band.

use plotters::style::RGBColor;
use serde::{Serialize, Serializer};

use super::scale::{BandScale, LinearScale};
use super::util::{color_hex, series_color};

/// Per-chart constants shared by every bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarParams {
    /// Left edge of the plot area in chart coordinates.
    pub x_offset: f64,
    /// Top edge of the plot area in chart coordinates.
    pub y_offset: f64,
    pub plot_height: f64,
    /// Share of the band owned by one series.
    pub slot_width: f64,
    /// Empty space inside a slot, split evenly left and right of the bar.
    pub gap: f64,
}

impl BarParams {
    /// `gap_percent` is a percentage of the slot width, in `[0, 100)`.
    pub fn new(
        band_width: f64,
        series_count: usize,
        gap_percent: f64,
        x_offset: f64,
        y_offset: f64,
        plot_height: f64,
    ) -> Self {
        let slot_width = band_width / series_count.max(1) as f64;
        Self {
            x_offset,
            y_offset,
            plot_height,
            slot_width,
            gap: gap_percent / 100.0 * slot_width,
        }
    }

    /// Width of the drawn rectangle.
    pub fn bar_width(&self) -> f64 {
        self.slot_width - self.gap
    }
}

/// Where one value ends up, in chart coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGeometry {
    pub series_index: usize,
    pub value_index: usize,
    pub category: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(serialize_with = "serialize_color")]
    pub color: RGBColor,
}

fn serialize_color<S: Serializer>(color: &RGBColor, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&color_hex(*color))
}

/// Place `value` of series `series_index` in the band of `category`.
///
/// Returns `None` when `category` is not part of the band domain.
pub fn bar_geometry(
    params: &BarParams,
    x: &BandScale,
    y: &LinearScale,
    series_index: usize,
    value_index: usize,
    category: &str,
    value: f64,
) -> Option<BarGeometry> {
    let band_start = x.position(category)?;
    let top = y.map(value);
    Some(BarGeometry {
        series_index,
        value_index,
        category: category.to_string(),
        value,
        x: params.x_offset + band_start + series_index as f64 * params.slot_width + params.gap / 2.0,
        y: params.y_offset + top,
        width: params.bar_width(),
        height: params.plot_height - top,
        color: series_color(series_index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scales() -> (BandScale, LinearScale) {
        let cats = vec!["a".to_string(), "b".to_string()];
        (
            BandScale::new(&cats, (0.0, 200.0)),
            LinearScale::new((0.0, 10.0), (100.0, 0.0)),
        )
    }

    #[test]
    fn slots_follow_series_order() {
        let (x, y) = scales();
        let p = BarParams::new(x.bandwidth(), 2, 0.0, 0.0, 0.0, 100.0);
        let first = bar_geometry(&p, &x, &y, 0, 1, "b", 5.0).unwrap();
        let second = bar_geometry(&p, &x, &y, 1, 1, "b", 10.0).unwrap();
        assert_eq!((first.x, first.width), (100.0, 50.0));
        assert_eq!((second.x, second.width), (150.0, 50.0));
        assert_eq!((first.y, first.height), (50.0, 50.0));
        assert_eq!((second.y, second.height), (0.0, 100.0));
    }

    #[test]
    fn gap_is_centered_in_slot() {
        let (x, y) = scales();
        let p = BarParams::new(x.bandwidth(), 2, 20.0, 10.0, 5.0, 100.0);
        let bar = bar_geometry(&p, &x, &y, 0, 0, "a", 0.0).unwrap();
        assert!((p.gap - 10.0).abs() < 1e-9);
        assert!((bar.x - 15.0).abs() < 1e-9);
        assert!((bar.width - 40.0).abs() < 1e-9);
        assert_eq!(bar.height, 0.0);
        assert_eq!(bar.y, 105.0);
    }

    #[test]
    fn unknown_category_has_no_geometry() {
        let (x, y) = scales();
        let p = BarParams::new(x.bandwidth(), 1, 0.0, 0.0, 0.0, 100.0);
        assert!(bar_geometry(&p, &x, &y, 0, 0, "zzz", 1.0).is_none());
    }

    #[test]
    fn color_serializes_as_hex() {
        let (x, y) = scales();
        let p = BarParams::new(x.bandwidth(), 1, 0.0, 0.0, 0.0, 100.0);
        let bar = bar_geometry(&p, &x, &y, 18, 0, "a", 1.0).unwrap();
        let json = serde_json::to_value(&bar).unwrap();
        assert_eq!(json["color"], "#1f78b4");
    }
}
