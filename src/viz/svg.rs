//! Annotated SVG output.
//!
//! Plotters' SVG backend cannot carry classes, `data-*` attributes or
//! tooltips, so the scene is serialized directly with `quick-xml`.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io::{Cursor, Write};
use std::path::Path;

use super::scene::{ChartElement, Container, Group, Label, Line, Node, Rect};
use super::util::color_hex;
use crate::error::{ChartError, ChartResult};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const STROKE: &str = "#000000";

/// Serialize the container content to an SVG document.
pub fn to_svg_string(container: &Container) -> ChartResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    let width = container.width().to_string();
    let height = container.height().to_string();
    let view_box = format!("0 0 {width} {height}");
    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", SVG_NS));
    root.push_attribute(("width", width.as_str()));
    root.push_attribute(("height", height.as_str()));
    root.push_attribute(("viewBox", view_box.as_str()));
    root.push_attribute(("font-family", "sans-serif"));
    writer.write_event(Event::Start(root))?;

    let mut background = BytesStart::new("rect");
    background.push_attribute(("width", "100%"));
    background.push_attribute(("height", "100%"));
    background.push_attribute(("fill", "#ffffff"));
    writer.write_event(Event::Empty(background))?;

    if let Some(legend) = container.legend() {
        write_group(&mut writer, legend)?;
    }
    if let Some(chart) = container.chart() {
        write_chart(&mut writer, chart)?;
    }

    writer.write_event(Event::End(BytesEnd::new("svg")))?;
    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| ChartError::Serialization(e.to_string()))
}

/// Write the container as an SVG file.
pub fn save_svg<P: AsRef<Path>>(container: &Container, out_path: P) -> ChartResult<()> {
    let markup = to_svg_string(container)?;
    let mut file = std::fs::File::create(out_path.as_ref())?;
    file.write_all(markup.as_bytes())?;
    log::debug!("wrote {}", out_path.as_ref().display());
    Ok(())
}

fn write_chart<W: Write>(writer: &mut Writer<W>, chart: &ChartElement) -> ChartResult<()> {
    let x = num(chart.translate_x);
    let width = num(chart.width);
    let height = num(chart.height);
    let mut start = BytesStart::new("svg");
    start.push_attribute(("class", chart.class.as_str()));
    start.push_attribute(("x", x.as_str()));
    start.push_attribute(("width", width.as_str()));
    start.push_attribute(("height", height.as_str()));
    writer.write_event(Event::Start(start))?;
    for node in &chart.children {
        write_node(writer, node)?;
    }
    writer.write_event(Event::End(BytesEnd::new("svg")))?;
    Ok(())
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> ChartResult<()> {
    match node {
        Node::Group(g) => write_group(writer, g),
        Node::Rect(r) => write_rect(writer, r),
        Node::Line(l) => write_line(writer, l),
        Node::Label(t) => write_label(writer, t),
    }
}

fn write_group<W: Write>(writer: &mut Writer<W>, group: &Group) -> ChartResult<()> {
    let mut start = BytesStart::new("g");
    if let Some(class) = &group.class {
        start.push_attribute(("class", class.as_str()));
    }
    let (tx, ty) = group.translate;
    if tx != 0.0 || ty != 0.0 {
        let transform = format!("translate({},{})", num(tx), num(ty));
        start.push_attribute(("transform", transform.as_str()));
    }
    if group.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(start))?;
    for child in &group.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new("g")))?;
    Ok(())
}

fn write_rect<W: Write>(writer: &mut Writer<W>, rect: &Rect) -> ChartResult<()> {
    let attrs = [
        ("x", num(rect.x)),
        ("y", num(rect.y)),
        ("width", num(rect.width)),
        ("height", num(rect.height)),
        ("fill", color_hex(rect.fill)),
    ];
    let mut start = BytesStart::new("rect");
    if let Some(class) = &rect.class {
        start.push_attribute(("class", class.as_str()));
    }
    for (k, v) in &attrs {
        start.push_attribute((*k, v.as_str()));
    }
    for (k, v) in &rect.data {
        let key = format!("data-{k}");
        start.push_attribute((key.as_str(), v.as_str()));
    }

    match &rect.title {
        Some(title) => {
            writer.write_event(Event::Start(start))?;
            writer.write_event(Event::Start(BytesStart::new("title")))?;
            writer.write_event(Event::Text(BytesText::new(title)))?;
            writer.write_event(Event::End(BytesEnd::new("title")))?;
            writer.write_event(Event::End(BytesEnd::new("rect")))?;
        }
        None => writer.write_event(Event::Empty(start))?,
    }
    Ok(())
}

fn write_line<W: Write>(writer: &mut Writer<W>, line: &Line) -> ChartResult<()> {
    let attrs = [
        ("x1", num(line.x1)),
        ("y1", num(line.y1)),
        ("x2", num(line.x2)),
        ("y2", num(line.y2)),
    ];
    let mut start = BytesStart::new("line");
    for (k, v) in &attrs {
        start.push_attribute((*k, v.as_str()));
    }
    start.push_attribute(("stroke", STROKE));
    writer.write_event(Event::Empty(start))?;
    Ok(())
}

fn write_label<W: Write>(writer: &mut Writer<W>, label: &Label) -> ChartResult<()> {
    let mut start = BytesStart::new("text");
    if let Some(class) = &label.class {
        start.push_attribute(("class", class.as_str()));
    }
    let mut attrs = vec![
        ("x", num(label.x)),
        ("y", num(label.y)),
        ("font-size", num(label.font_px)),
        ("text-anchor", label.anchor.as_str().to_string()),
        ("fill", STROKE.to_string()),
    ];
    if label.dx_em != 0.0 {
        attrs.push(("dx", format!("{}em", num(label.dx_em))));
    }
    if label.dy_em != 0.0 {
        attrs.push(("dy", format!("{}em", num(label.dy_em))));
    }
    if let Some(deg) = label.rotate {
        attrs.push(("transform", format!("rotate({})", num(deg))));
    }
    for (k, v) in &attrs {
        start.push_attribute((*k, v.as_str()));
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(&label.text)))?;
    writer.write_event(Event::End(BytesEnd::new("text")))?;
    Ok(())
}

/// Compact number: at most two decimals, no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::style::RGBColor;

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(2.5), "2.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.0), "-0");
    }

    #[test]
    fn rect_carries_data_attributes_and_tooltip() {
        let mut w = Writer::new(Cursor::new(Vec::new()));
        let rect = Rect::new(0.0, 1.0, 2.0, 3.0, RGBColor(0x1f, 0x78, 0xb4))
            .class("column")
            .data("name", "a & b")
            .title("a & b: 1 (S)");
        write_rect(&mut w, &rect).unwrap();
        let out = String::from_utf8(w.into_inner().into_inner()).unwrap();
        assert!(out.contains(r#"class="column""#));
        assert!(out.contains(r#"data-name="a &amp; b""#));
        assert!(out.contains(r##"fill="#1f78b4""##));
        assert!(out.contains("<title>a &amp; b: 1 (S)</title>"));
    }

    #[test]
    fn zero_rotation_is_written() {
        let mut w = Writer::new(Cursor::new(Vec::new()));
        write_label(&mut w, &Label::new("x", 0.0, 9.0, 10.0).rotate(-0.0)).unwrap();
        let out = String::from_utf8(w.into_inner().into_inner()).unwrap();
        assert!(out.contains(r#"transform="rotate(-0)""#));
    }
}
