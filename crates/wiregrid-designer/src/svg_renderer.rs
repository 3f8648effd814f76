//! SVG serialisation of a render list
//! Produces a standalone document for headless inspection
//! Features:
//! - Wires drawn as an outline stroke with a lighter core
//! - Rounded node bodies with pin tabs and labels
//! - Translucent selection rectangle

use crate::render::{DrawCommand, DrawList, PinDraw};
use crate::wire::CapStyle;
use std::fmt::Write;
use wiregrid_core::{Bounds, Point};

const PADDING: f64 = 25.0;
const WIRE_OUTLINE: &str = "#bbbbbb";
const WIRE_CORE: &str = "#ffffff";
const NODE_FILL: &str = "#dddddd";
const SELECTION_FILL: &str = "#327da8";

fn path_data(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let op = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{} {} {} ", op, p.x, p.y);
    }
    d.trim_end().to_string()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn render_wire(out: &mut String, points: &[Point], cap: CapStyle, stroke_width: f64) {
    let linecap = match cap {
        CapStyle::Round => "round",
        CapStyle::Square => "square",
    };
    let d = path_data(points);
    let _ = writeln!(
        out,
        r#"  <path d="{d}" fill="none" stroke="{WIRE_OUTLINE}" stroke-width="{}" stroke-linecap="{linecap}" stroke-linejoin="round"/>"#,
        stroke_width
    );
    let _ = writeln!(
        out,
        r#"  <path d="{d}" fill="none" stroke="{WIRE_CORE}" stroke-width="{}" stroke-linecap="{linecap}" stroke-linejoin="round"/>"#,
        stroke_width * 2.0 / 3.0
    );
}

fn render_pin(out: &mut String, pin: &PinDraw) {
    let r = &pin.rect;
    let _ = writeln!(
        out,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="black"/>"#,
        r.min_x,
        r.min_y,
        r.width(),
        r.height()
    );
    if let Some(at) = pin.label {
        let _ = writeln!(
            out,
            r#"  <text x="{}" y="{}" font-size="12" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            at.x,
            at.y,
            escape(&pin.name)
        );
    }
}

/// Renders the list as an SVG document whose view box covers every command.
pub fn render_svg(list: &DrawList) -> String {
    let view = list
        .bounds()
        .unwrap_or_else(|| Bounds::new(0.0, 0.0, 100.0, 100.0));
    let (x, y) = (view.min_x - PADDING, view.min_y - PADDING);
    let (w, h) = (view.width() + 2.0 * PADDING, view.height() + 2.0 * PADDING);

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{x} {y} {w} {h}" width="{w}" height="{h}">"#
    );

    for command in list.iter() {
        match command {
            DrawCommand::Wire {
                points,
                cap,
                stroke_width,
                ..
            } => render_wire(&mut out, points, *cap, *stroke_width),
            DrawCommand::Node {
                name,
                label,
                bounds,
                corner_radius,
                pins,
                ..
            } => {
                let _ = writeln!(
                    out,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{corner_radius}" fill="{NODE_FILL}" stroke="black" stroke-width="3"/>"#,
                    bounds.min_x,
                    bounds.min_y,
                    bounds.width(),
                    bounds.height()
                );
                for pin in pins {
                    render_pin(&mut out, pin);
                }
                if let Some(at) = label {
                    let _ = writeln!(
                        out,
                        r#"  <text x="{}" y="{}" font-size="16" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                        at.x,
                        at.y,
                        escape(name)
                    );
                }
            }
            DrawCommand::SelectionBox { bounds } => {
                let _ = writeln!(
                    out,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{SELECTION_FILL}" fill-opacity="0.2" stroke="{SELECTION_FILL}"/>"#,
                    bounds.min_x,
                    bounds.min_y,
                    bounds.width(),
                    bounds.height()
                );
            }
        }
    }

    out.push_str("</svg>\n");
    out
}
