//! Plain-text DXF writer for fabrication output. Units are millimetres.

use tracing::debug;

use crate::ExportError;
use crate::drawing::{Drawing, Entity};

/// Serialize `drawing` as a DXF document with a minimal header and an `ENTITIES` section.
pub fn to_dxf_string(drawing: &Drawing) -> Result<String, ExportError> {
    if drawing.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut out = String::new();
    // Minimal header + tables; enough for common CAD viewers and laser-cutter software.
    push_pair(&mut out, 0, "SECTION");
    push_pair(&mut out, 2, "HEADER");
    push_pair(&mut out, 9, "$INSUNITS");
    push_pair(&mut out, 70, "4"); // millimeters
    push_pair(&mut out, 0, "ENDSEC");
    push_pair(&mut out, 0, "SECTION");
    push_pair(&mut out, 2, "TABLES");
    push_pair(&mut out, 0, "TABLE");
    push_pair(&mut out, 2, "LTYPE");
    push_pair(&mut out, 0, "LTYPE");
    push_pair(&mut out, 72, "65");
    push_pair(&mut out, 70, "64");
    push_pair(&mut out, 2, "CONTINUOUS");
    push_pair(&mut out, 3, "______");
    push_pair(&mut out, 73, "0");
    push_pair(&mut out, 40, "0");
    push_pair(&mut out, 0, "ENDTAB");
    push_pair(&mut out, 0, "TABLE");
    push_pair(&mut out, 2, "LAYER");
    push_pair(&mut out, 0, "ENDTAB");
    push_pair(&mut out, 0, "ENDSEC");
    push_pair(&mut out, 0, "SECTION");
    push_pair(&mut out, 2, "ENTITIES");

    for e in &drawing.entities {
        match e {
            Entity::Line { start, end } => {
                push_pair(&mut out, 0, "LINE");
                push_pair(&mut out, 8, "0");
                push_pair_f64(&mut out, 10, start.x, "line x1")?;
                push_pair_f64(&mut out, 20, start.y, "line y1")?;
                push_pair_f64(&mut out, 11, end.x, "line x2")?;
                push_pair_f64(&mut out, 21, end.y, "line y2")?;
            }
            Entity::Circle(c) => {
                push_pair(&mut out, 0, "CIRCLE");
                push_pair(&mut out, 8, "0");
                push_pair_f64(&mut out, 10, c.centre.x, "circle cx")?;
                push_pair_f64(&mut out, 20, c.centre.y, "circle cy")?;
                push_pair_f64(&mut out, 40, c.radius, "circle r")?;
            }
            Entity::Arc(arc) => {
                // DXF arcs run counter-clockwise from group 50 to group 51.
                let centre = arc.centre();
                let start = norm_deg(arc.start_angle().to_degrees());
                let end = norm_deg(arc.end_angle().to_degrees());
                push_pair(&mut out, 0, "ARC");
                push_pair(&mut out, 8, "0");
                push_pair_f64(&mut out, 10, centre.x, "arc cx")?;
                push_pair_f64(&mut out, 20, centre.y, "arc cy")?;
                push_pair_f64(&mut out, 40, arc.radius, "arc r")?;
                push_pair_f64(&mut out, 50, start, "arc start")?;
                push_pair_f64(&mut out, 51, end, "arc end")?;
            }
            Entity::LwPolyline(pl) => {
                push_pair(&mut out, 0, "LWPOLYLINE");
                push_pair(&mut out, 8, "0");
                push_pair(&mut out, 90, pl.vertices.len().to_string());
                push_pair(&mut out, 70, if pl.closed { "1" } else { "0" });
                for (idx, v) in pl.vertices.iter().enumerate() {
                    push_pair_f64(&mut out, 10, v.x, "polyline x")?;
                    push_pair_f64(&mut out, 20, v.y, "polyline y")?;
                    let bulge = pl.bulges.get(idx).copied().unwrap_or(0.0);
                    push_pair_f64(&mut out, 42, bulge, "polyline bulge")?;
                }
            }
        }
    }

    push_pair(&mut out, 0, "ENDSEC");
    push_pair(&mut out, 0, "EOF");
    debug!(entities = drawing.len(), bytes = out.len(), "wrote dxf");
    Ok(out)
}

fn push_pair(out: &mut String, code: i32, value: impl AsRef<str>) {
    out.push_str(&code.to_string());
    out.push('\n');
    out.push_str(value.as_ref());
    out.push('\n');
}

fn push_pair_f64(out: &mut String, code: i32, value: f64, what: &'static str) -> Result<(), ExportError> {
    if !value.is_finite() {
        return Err(ExportError::NonFinite { what });
    }
    let mut buf = ryu::Buffer::new();
    push_pair(out, code, buf.format(value));
    Ok(())
}

fn norm_deg(v: f64) -> f64 {
    // DXF angles are degrees in [0, 360).
    v.rem_euclid(360.0)
}
