//! Axis construction: tick positions, labels and the nodes that draw them.

use super::scale::{BandScale, LinearScale};
use super::scene::{Anchor, Group, Label, Line};
use super::types::AXIS_FONT_PX;
use super::util::format_tick;

/// Length of tick marks and of the domain's end caps.
pub const TICK_SIZE: f64 = 6.0;
/// Gap between a tick mark and its label.
pub const TICK_PADDING: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Offset along the axis, in the axis' own coordinates.
    pub position: f64,
    pub label: String,
}

/// A renderable axis, positioned at its own origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orient: AxisOrient,
    pub range: (f64, f64),
    pub ticks: Vec<AxisTick>,
    /// Label rotation in degrees, counter-clockwise. Bottom axes only.
    pub label_rotation: Option<f64>,
}

impl Axis {
    /// Category axis below the plot, one tick per band center.
    ///
    /// Labels are end-anchored and rotated counter-clockwise by
    /// `rotation_deg`; the rotation is emitted even when it is 0.
    pub fn bottom(scale: &BandScale, rotation_deg: f64) -> Self {
        let half = scale.bandwidth() / 2.0;
        let ticks = scale
            .domain()
            .iter()
            .filter_map(|key| {
                scale.position(key).map(|p| AxisTick {
                    position: p + half,
                    label: key.clone(),
                })
            })
            .collect();
        Self {
            orient: AxisOrient::Bottom,
            range: scale.range(),
            ticks,
            label_rotation: Some(rotation_deg),
        }
    }

    /// Value axis left of the plot with locale-formatted ticks.
    pub fn left(scale: &LinearScale, locale: &str) -> Self {
        let step = scale.tick_step();
        let ticks = scale
            .ticks()
            .into_iter()
            .map(|v| AxisTick {
                position: scale.map(v),
                label: format_tick(v, step, locale),
            })
            .collect();
        Self {
            orient: AxisOrient::Left,
            range: scale.range(),
            ticks,
            label_rotation: None,
        }
    }

    pub fn class(&self) -> &'static str {
        match self.orient {
            AxisOrient::Bottom => "x axis",
            AxisOrient::Left => "y axis",
        }
    }

    /// Nodes for the domain line, tick marks and labels, untranslated.
    pub fn to_group(&self) -> Group {
        let (r0, r1) = self.range;
        let mut group = Group::new(self.class());
        match self.orient {
            AxisOrient::Bottom => {
                group.push(Line::new(r0, TICK_SIZE, r0, 0.0));
                group.push(Line::new(r0, 0.0, r1, 0.0));
                group.push(Line::new(r1, 0.0, r1, TICK_SIZE));
                for tick in &self.ticks {
                    let mut label =
                        Label::new(&tick.label, 0.0, TICK_SIZE + TICK_PADDING, AXIS_FONT_PX)
                            .anchor(Anchor::End)
                            .offset_em(-0.8, 0.15);
                    if let Some(rotation) = self.label_rotation {
                        label = label.rotate(-rotation);
                    }
                    group.push(
                        Group::new("tick")
                            .translate(tick.position, 0.0)
                            .with(Line::new(0.0, 0.0, 0.0, TICK_SIZE))
                            .with(label),
                    );
                }
            }
            AxisOrient::Left => {
                group.push(Line::new(-TICK_SIZE, r0, 0.0, r0));
                group.push(Line::new(0.0, r0, 0.0, r1));
                group.push(Line::new(0.0, r1, -TICK_SIZE, r1));
                for tick in &self.ticks {
                    group.push(
                        Group::new("tick")
                            .translate(0.0, tick.position)
                            .with(Line::new(0.0, 0.0, -TICK_SIZE, 0.0))
                            .with(
                                Label::new(&tick.label, -(TICK_SIZE + TICK_PADDING), 0.0, AXIS_FONT_PX)
                                    .anchor(Anchor::End)
                                    .offset_em(0.0, 0.32),
                            ),
                    );
                }
            }
        }
        group
    }
}
