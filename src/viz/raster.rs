//! PNG output: walk the scene and draw it on a plotters bitmap.
//!
//! Plotters only rotates text by quarter turns, so tick label rotation is
//! snapped to the nearest multiple of 90 degrees.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontStyle, FontTransform, RGBColor};
use plotters_bitmap::BitMapBackend;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::scene::{Anchor, Container, Label, Node, Rect};
use crate::error::{ChartError, ChartResult};

/// Fonts tried when no font file is given.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Set once per process: `ab_glyph` has no font discovery, so "sans-serif"
/// must be registered from file bytes before any text is drawn.
static FONT: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Register a "sans-serif" font for bitmap text. Only the first call has an
/// effect. Returns whether a font is available.
pub fn ensure_font_registered(font: Option<&Path>) -> bool {
    FONT.get_or_init(|| {
        let candidates = font
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));
        for path in candidates {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            if plotters::style::register_font("sans-serif", FontStyle::Normal, bytes).is_ok() {
                log::debug!("registered font {}", path.display());
                return Some(path);
            }
        }
        None
    })
    .is_some()
}

/// Rasterize the container into a PNG (or any format `image` infers from
/// the extension).
pub fn save_png<P: AsRef<Path>>(
    container: &Container,
    out_path: P,
    font: Option<&Path>,
) -> ChartResult<()> {
    let with_text = ensure_font_registered(font);
    if !with_text {
        log::warn!("no usable font found; bitmap output will omit text (pass a .ttf file)");
    }
    let out_path = out_path.as_ref();
    let root = BitMapBackend::new(out_path, (container.width(), container.height()))
        .into_drawing_area();
    draw_container(&root, container, with_text)?;
    root.present()
        .map_err(|e| ChartError::Render(format!("{e:?}")))?;
    log::debug!("wrote {}", out_path.display());
    Ok(())
}

/// Draw the container content on any plotters backend.
pub fn draw_container<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    container: &Container,
    with_text: bool,
) -> ChartResult<()> {
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(format!("{e:?}")))?;
    if let Some(legend) = container.legend() {
        for node in &legend.children {
            draw_node(root, node, legend.translate, with_text)?;
        }
    }
    if let Some(chart) = container.chart() {
        for node in &chart.children {
            draw_node(root, node, (chart.translate_x, 0.0), with_text)?;
        }
    }
    Ok(())
}

fn draw_node<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    node: &Node,
    origin: (f64, f64),
    with_text: bool,
) -> ChartResult<()> {
    match node {
        Node::Group(g) => {
            let inner = (origin.0 + g.translate.0, origin.1 + g.translate.1);
            for child in &g.children {
                draw_node(area, child, inner, with_text)?;
            }
        }
        Node::Rect(r) => {
            if r.width > 0.0 && r.height > 0.0 {
                area.draw(&rectangle(r, origin))
                    .map_err(|e| ChartError::Render(format!("{e:?}")))?;
            }
        }
        Node::Line(l) => {
            let points = vec![
                px(origin, l.x1, l.y1),
                px(origin, l.x2, l.y2),
            ];
            area.draw(&PathElement::new(points, BLACK.stroke_width(1)))
                .map_err(|e| ChartError::Render(format!("{e:?}")))?;
        }
        Node::Label(t) if with_text => {
            let (x, y) = rotated_origin(t);
            let style = TextStyle::from((FontFamily::SansSerif, t.font_px))
                .pos(Pos::new(h_pos(t.anchor), VPos::Bottom))
                .transform(snap_rotation(t.rotate.unwrap_or(0.0)))
                .color(&BLACK);
            area.draw(&Text::new(t.text.as_str(), px(origin, x, y), style))
                .map_err(|e| ChartError::Render(format!("{e:?}")))?;
        }
        Node::Label(_) => {}
    }
    Ok(())
}

fn rectangle(r: &Rect, origin: (f64, f64)) -> Rectangle<(i32, i32)> {
    Rectangle::new(
        [px(origin, r.x, r.y), px(origin, r.x + r.width, r.y + r.height)],
        fill_style(r.fill),
    )
}

fn fill_style(color: RGBColor) -> ShapeStyle {
    color.filled()
}

fn px(origin: (f64, f64), x: f64, y: f64) -> (i32, i32) {
    ((origin.0 + x).round() as i32, (origin.1 + y).round() as i32)
}

/// Label origin after rotation about the parent group's origin.
fn rotated_origin(t: &Label) -> (f64, f64) {
    let (x, y) = t.origin();
    match t.rotate {
        Some(deg) if deg != 0.0 => {
            let (sin, cos) = deg.to_radians().sin_cos();
            (x * cos - y * sin, x * sin + y * cos)
        }
        _ => (x, y),
    }
}

fn h_pos(anchor: Anchor) -> HPos {
    match anchor {
        Anchor::Start => HPos::Left,
        Anchor::Middle => HPos::Center,
        Anchor::End => HPos::Right,
    }
}

/// Nearest quarter turn, clockwise.
fn snap_rotation(degrees: f64) -> FontTransform {
    let quarter = ((degrees / 90.0).round() as i64).rem_euclid(4);
    match quarter {
        1 => FontTransform::Rotate90,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}
