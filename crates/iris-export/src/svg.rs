//! SVG preview writer.
//!
//! Coordinates are written as given; lay the drawing out into the viewport first. Without a y-flip
//! an arc that turns counter-clockwise in drawing space keeps the positive-angle sweep flag.

use cavalier_contours::polyline::{PlineVertex, seg_arc_radius_and_center};
use iris_geometry::{ArcSegment, Circle, Point2};
use tracing::debug;

use crate::ExportError;
use crate::drawing::{Drawing, Entity, LwPolyline};

const EPS: f64 = 1e-9;

/// Render `drawing` into a `width` x `height` SVG document (millimetre units).
pub fn svg_document(drawing: &Drawing, width: f64, height: f64) -> Result<String, ExportError> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(ExportError::InvalidViewport {
            width,
            height,
            extent: 0.0,
        });
    }
    if drawing.is_empty() {
        return Err(ExportError::Empty);
    }
    if !drawing.is_finite() {
        return Err(ExportError::NonFinite { what: "svg entity" });
    }

    let mut path = String::new();
    for entity in &drawing.entities {
        let sub = match entity {
            Entity::Line { start, end } => line_path(*start, *end),
            Entity::Arc(arc) => arc_path(arc),
            Entity::Circle(circle) => circle_path(circle),
            Entity::LwPolyline(poly) => polyline_path(poly),
        };
        push_subpath(&mut path, &sub);
    }

    debug!(entities = drawing.len(), width, height, "rendered svg");
    Ok(format!(
        "<svg width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\"><g id=\"svgGroup\" stroke-linecap=\"round\" fill-rule=\"evenodd\" font-size=\"9pt\" stroke=\"#000\" stroke-width=\"0.25mm\" fill=\"none\" style=\"stroke:#000;stroke-width:0.25mm;fill:none\"><path d=\"{path}\" vector-effect=\"non-scaling-stroke\"/></g></svg>",
        w = fmt_num(width),
        h = fmt_num(height),
        path = path
    ))
}

fn fmt_num(v: f64) -> String {
    let v = if v.abs() < 1e-9 { 0.0 } else { v };
    let mut buf = ryu::Buffer::new();
    let s = buf.format(v);
    s.strip_suffix(".0").unwrap_or(s).to_string()
}

fn push_subpath(path: &mut String, sub: &str) {
    if sub.is_empty() {
        return;
    }
    if !path.is_empty() {
        path.push(' ');
    }
    path.push_str(sub);
}

fn line_path(start: Point2, end: Point2) -> String {
    format!("M {} {} L {} {}", fmt_num(start.x), fmt_num(start.y), fmt_num(end.x), fmt_num(end.y))
}

fn arc_path(arc: &ArcSegment) -> String {
    // ArcSegment is always the minor arc.
    let r = arc.radius.abs();
    format!(
        "M {} {} A {} {} 0 0 1 {} {}",
        fmt_num(arc.start.x),
        fmt_num(arc.start.y),
        fmt_num(r),
        fmt_num(r),
        fmt_num(arc.end.x),
        fmt_num(arc.end.y)
    )
}

fn circle_path(circle: &Circle) -> String {
    let r = circle.radius.abs();
    let start = Point2::new(circle.centre.x + r, circle.centre.y);
    let mid = Point2::new(circle.centre.x - r, circle.centre.y);
    // Two half-arcs.
    format!(
        "M {} {} A {} {} 0 0 1 {} {} A {} {} 0 0 1 {} {} Z",
        fmt_num(start.x),
        fmt_num(start.y),
        fmt_num(r),
        fmt_num(r),
        fmt_num(mid.x),
        fmt_num(mid.y),
        fmt_num(r),
        fmt_num(r),
        fmt_num(start.x),
        fmt_num(start.y)
    )
}

fn polyline_path(poly: &LwPolyline) -> String {
    if poly.vertices.len() < 2 {
        return String::new();
    }
    let mut out = String::new();
    let start = poly.vertices[0];
    out.push_str(&format!("M {} {}", fmt_num(start.x), fmt_num(start.y)));

    for i in 0..poly.vertices.len() {
        let next = if i + 1 < poly.vertices.len() {
            i + 1
        } else if poly.closed {
            0
        } else {
            break;
        };
        let v1 = poly.vertices[i];
        let v2 = poly.vertices[next];
        let bulge = poly.bulges.get(i).copied().unwrap_or(0.0);
        if bulge.abs() <= EPS {
            out.push_str(&format!(" L {} {}", fmt_num(v2.x), fmt_num(v2.y)));
        } else {
            let (radius, _) = seg_arc_radius_and_center(
                PlineVertex::new(v1.x, v1.y, bulge),
                PlineVertex::new(v2.x, v2.y, 0.0),
            );
            // |bulge| > 1 means the segment sweeps more than 180°.
            let large = if bulge.abs() > 1.0 { 1 } else { 0 };
            let sweep_flag = if bulge >= 0.0 { 1 } else { 0 };
            let r = radius.abs();
            out.push_str(&format!(
                " A {} {} 0 {} {} {} {}",
                fmt_num(r),
                fmt_num(r),
                large,
                sweep_flag,
                fmt_num(v2.x),
                fmt_num(v2.y)
            ));
        }
    }

    if poly.closed {
        out.push_str(" Z");
    }
    out
}
