//! Retained drawing surface: the element tree a chart is rendered into.
//!
//! A [`Container`] stands for the host element with fixed pixel dimensions.
//! Rendering mounts a legend group and a [`ChartElement`] into it; the SVG
//! writer and the raster backend both read from this tree.

use plotters::style::RGBColor;

use super::measure::{BBox, Measurer};

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Text node. `dx_em`/`dy_em` are offsets in multiples of the font size;
/// `rotate` is applied about the parent group's origin (SVG sense, degrees
/// clockwise).
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub class: Option<String>,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub dx_em: f64,
    pub dy_em: f64,
    pub font_px: f64,
    pub anchor: Anchor,
    pub rotate: Option<f64>,
}

impl Label {
    pub fn new(text: impl Into<String>, x: f64, y: f64, font_px: f64) -> Self {
        Self {
            class: None,
            text: text.into(),
            x,
            y,
            dx_em: 0.0,
            dy_em: 0.0,
            font_px,
            anchor: Anchor::Start,
            rotate: None,
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn offset_em(mut self, dx_em: f64, dy_em: f64) -> Self {
        self.dx_em = dx_em;
        self.dy_em = dy_em;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Position of the text baseline start after applying `dx`/`dy`.
    pub fn origin(&self) -> (f64, f64) {
        (
            self.x + self.dx_em * self.font_px,
            self.y + self.dy_em * self.font_px,
        )
    }

    pub fn bbox<M: Measurer + ?Sized>(&self, measurer: &M) -> BBox {
        let extent = measurer.text_extent(&self.text, self.font_px);
        let (x, baseline) = self.origin();
        let left = match self.anchor {
            Anchor::Start => x,
            Anchor::Middle => x - extent.width / 2.0,
            Anchor::End => x - extent.width,
        };
        let top = baseline - measurer.ascent_ratio() * extent.height;
        let unrotated = BBox::new(left, top, left + extent.width, top + extent.height);
        match self.rotate {
            Some(deg) => unrotated.rotated(deg),
            None => unrotated,
        }
    }
}

/// Straight stroke, used for axis domains and tick marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Line {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Filled rectangle with identifying `data-*` attributes and an optional
/// hover tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub class: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: RGBColor,
    pub data: Vec<(String, String)>,
    pub title: Option<String>,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill: RGBColor) -> Self {
        Self {
            class: None,
            x,
            y,
            width,
            height,
            fill,
            data: Vec::new(),
            title: None,
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.push((key.to_string(), value.into()));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn data_value(&self, key: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Group with an optional class and a translation applied to its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub class: Option<String>,
    pub translate: (f64, f64),
    pub children: Vec<Node>,
}

impl Group {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }

    pub fn translate(mut self, x: f64, y: f64) -> Self {
        self.translate = (x, y);
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        has_class(self.class.as_deref(), class)
    }

    /// Bounding box of all children in this group's parent coordinates.
    pub fn bbox<M: Measurer + ?Sized>(&self, measurer: &M) -> Option<BBox> {
        self.children
            .iter()
            .filter_map(|c| c.bbox(measurer))
            .reduce(|a, b| a.union(&b))
            .map(|b| b.translated(self.translate.0, self.translate.1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Rect(Rect),
    Line(Line),
    Label(Label),
}

impl Node {
    pub fn bbox<M: Measurer + ?Sized>(&self, measurer: &M) -> Option<BBox> {
        match self {
            Node::Group(g) => g.bbox(measurer),
            Node::Rect(r) => Some(BBox::new(r.x, r.y, r.x + r.width, r.y + r.height)),
            Node::Line(l) => Some(BBox::new(
                l.x1.min(l.x2),
                l.y1.min(l.y2),
                l.x1.max(l.x2),
                l.y1.max(l.y2),
            )),
            Node::Label(t) => Some(t.bbox(measurer)),
        }
    }
}

impl From<Group> for Node {
    fn from(g: Group) -> Self {
        Node::Group(g)
    }
}

impl From<Rect> for Node {
    fn from(r: Rect) -> Self {
        Node::Rect(r)
    }
}

impl From<Line> for Node {
    fn from(l: Line) -> Self {
        Node::Line(l)
    }
}

impl From<Label> for Node {
    fn from(t: Label) -> Self {
        Node::Label(t)
    }
}

/// The drawing element a chart is rendered into, tagged with the caller's
/// class name. `translate_x` shifts the whole element (west legend).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartElement {
    pub class: String,
    pub width: f64,
    pub height: f64,
    pub translate_x: f64,
    pub children: Vec<Node>,
}

impl ChartElement {
    pub fn new(class: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            class: class.into(),
            width,
            height,
            translate_x: 0.0,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Top-level groups carrying `class` (space-separated class lists match
    /// on any member).
    pub fn groups(&self, class: &str) -> Vec<&Group> {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Group(g) if g.has_class(class) => Some(g),
                _ => None,
            })
            .collect()
    }

    /// Top-level text nodes carrying `class`.
    pub fn labels(&self, class: &str) -> Vec<&Label> {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Label(t) if has_class(t.class.as_deref(), class) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Every `column` rect together with the translation of its series group.
    pub fn columns(&self) -> Vec<(f64, &Rect)> {
        self.groups("series")
            .into_iter()
            .flat_map(|g| {
                g.children.iter().filter_map(move |n| match n {
                    Node::Rect(r) if has_class(r.class.as_deref(), "column") => {
                        Some((g.translate.0, r))
                    }
                    _ => None,
                })
            })
            .collect()
    }
}

/// Host element with fixed pixel dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    width: u32,
    height: u32,
    legend: Option<Group>,
    chart: Option<ChartElement>,
}

impl Container {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            legend: None,
            chart: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn legend(&self) -> Option<&Group> {
        self.legend.as_ref()
    }

    pub fn set_legend(&mut self, legend: Group) {
        self.legend = Some(legend);
    }

    pub fn chart(&self) -> Option<&ChartElement> {
        self.chart.as_ref()
    }

    /// Replace the container content with a freshly rendered chart.
    pub(crate) fn mount(&mut self, legend: Option<Group>, chart: ChartElement) {
        self.legend = legend;
        self.chart = Some(chart);
    }
}

fn has_class(list: Option<&str>, class: &str) -> bool {
    list.is_some_and(|l| l.split_whitespace().any(|c| c == class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::measure::HeuristicMeasurer;

    #[test]
    fn group_bbox_applies_translation() {
        let g = Group::new("g")
            .translate(10.0, 5.0)
            .with(Line::new(0.0, 0.0, 0.0, 6.0))
            .with(Rect::new(-4.0, 2.0, 8.0, 10.0, RGBColor(0, 0, 0)));
        let b = g.bbox(&HeuristicMeasurer).unwrap();
        assert_eq!((b.x0, b.y0, b.x1, b.y1), (6.0, 5.0, 14.0, 17.0));
    }

    #[test]
    fn class_lists_match_any_member() {
        let mut chart = ChartElement::new("chart", 100.0, 100.0);
        chart.push(Group::new("x axis"));
        chart.push(Group::new("y axis"));
        assert_eq!(chart.groups("axis").len(), 2);
        assert_eq!(chart.groups("x").len(), 1);
        assert!(chart.groups("legend").is_empty());
    }

    #[test]
    fn end_anchored_label_extends_left() {
        let m = HeuristicMeasurer;
        let t = Label::new("abcd", 0.0, 0.0, 10.0).anchor(Anchor::End);
        let b = t.bbox(&m);
        assert!(b.x1 <= 0.0 + 1e-9);
        assert!(b.x0 < 0.0);
    }
}
