//! Public types and constants for the visualization module.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Legend placement hint.
///
/// The legend always reserves horizontal space next to the chart. Only
/// `West` puts it before the chart (the chart is shifted right by the
/// legend width); every other placement keeps it on the right edge, aligned
/// to the top (`North`, `East`) or bottom (`South`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    North,
    #[default]
    East,
    South,
    West,
}

impl LegendPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegendPosition::North => "n",
            LegendPosition::East => "e",
            LegendPosition::South => "s",
            LegendPosition::West => "w",
        }
    }
}

impl fmt::Display for LegendPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegendPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" | "top" => Ok(LegendPosition::North),
            "e" | "east" | "right" => Ok(LegendPosition::East),
            "s" | "south" | "bottom" => Ok(LegendPosition::South),
            "w" | "west" | "left" => Ok(LegendPosition::West),
            other => Err(format!("unknown legend position: {other}")),
        }
    }
}

impl Serialize for LegendPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LegendPosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Layout properties for one chart.
///
/// Field names serialize in camelCase so a props file can use the familiar
/// `displayLegend` / `multiSeriesGap` vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartProps {
    pub display_legend: bool,
    pub legend_position: LegendPosition,
    pub chart_title: Option<String>,
    pub caption_text: Option<String>,
    /// Degrees; labels are rotated counter-clockwise by this amount.
    pub x_axis_tick_label_rotation: f64,
    /// Percent of a series' bar slot left empty, in `[0, 100)`.
    pub multi_series_gap: f64,
    /// Number format tag for y tick labels (`en`, `de`, ...).
    pub locale: String,
}

impl Default for ChartProps {
    fn default() -> Self {
        Self {
            display_legend: false,
            legend_position: LegendPosition::default(),
            chart_title: None,
            caption_text: None,
            x_axis_tick_label_rotation: 0.0,
            multi_series_gap: 0.0,
            locale: "en".to_string(),
        }
    }
}

impl ChartProps {
    /// Title text, treating an empty string as absent.
    pub fn title(&self) -> Option<&str> {
        self.chart_title.as_deref().filter(|t| !t.is_empty())
    }

    /// Caption text, treating an empty string as absent.
    pub fn caption(&self) -> Option<&str> {
        self.caption_text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Fixed paddings around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const DEFAULT_PADDING: Padding = Padding {
    top: 20.0,
    right: 20.0,
    bottom: 20.0,
    left: 0.0,
};

/// Width and height of a measured element, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

pub const AXIS_FONT_PX: f64 = 10.0;
pub const TITLE_FONT_PX: f64 = 18.0;
pub const CAPTION_FONT_PX: f64 = 12.0;
pub const LEGEND_FONT_PX: f64 = 12.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_position_parses_short_and_long_forms() {
        assert_eq!("w".parse::<LegendPosition>(), Ok(LegendPosition::West));
        assert_eq!("North".parse::<LegendPosition>(), Ok(LegendPosition::North));
        assert_eq!(" S ".parse::<LegendPosition>(), Ok(LegendPosition::South));
        assert!("x".parse::<LegendPosition>().is_err());
    }

    #[test]
    fn props_load_from_camel_case_json() {
        let json = r#"{"displayLegend":true,"legendPosition":"w","chartTitle":"","multiSeriesGap":25}"#;
        let props: ChartProps = serde_json::from_str(json).unwrap();
        assert!(props.display_legend);
        assert_eq!(props.legend_position, LegendPosition::West);
        assert_eq!(props.multi_series_gap, 25.0);
        assert_eq!(props.title(), None);
        assert_eq!(props.locale, "en");
    }
}
