//! Closed outlines as bulge polylines, for area checks and polyline-based exporters.

use crate::{ArcSegment, EPSILON, GeometryError, PlineVertex, Point2, Polyline};

/// Counter-clockwise stadium (pin slot) whose end-cap centres are `a` and `b`.
pub fn stadium(a: Point2, b: Point2, width: f64) -> Polyline<f64> {
    let half = width / 2.0;
    let normal = Point2::from_polar(half, (b.y - a.y).atan2(b.x - a.x) + std::f64::consts::FRAC_PI_2);

    // Right side forward, far cap, left side back, near cap.
    let pts = [
        (a - normal, 0.0),
        (b - normal, 1.0),
        (b + normal, 0.0),
        (a + normal, 1.0),
    ];

    let mut pl = Polyline::new_closed();
    for (p, bulge) in pts {
        pl.vertex_data.push(PlineVertex::new(p.x, p.y, bulge));
    }
    pl
}

/// Join arcs end to start into one closed polyline.
///
/// Each arc may be traversed in either direction; a reversed arc gets a negative bulge. The chain
/// starts at `arcs[0].start` and must return there.
pub fn polyline_from_arc_chain(arcs: &[ArcSegment]) -> Result<Polyline<f64>, GeometryError> {
    let Some(first) = arcs.first() else {
        return Err(GeometryError::OpenChain { index: 0 });
    };
    let tol = chain_tolerance(arcs);

    let mut pl = Polyline::new_closed();
    let mut cursor = first.start;
    for (index, arc) in arcs.iter().enumerate() {
        let (from, to, bulge) = if cursor.distance_to(arc.start) <= tol {
            (arc.start, arc.end, arc.bulge())
        } else if cursor.distance_to(arc.end) <= tol {
            (arc.end, arc.start, -arc.bulge())
        } else {
            return Err(GeometryError::OpenChain { index });
        };
        pl.vertex_data.push(PlineVertex::new(from.x, from.y, bulge));
        cursor = to;
    }

    if cursor.distance_to(first.start) > tol {
        return Err(GeometryError::OpenChain { index: arcs.len() });
    }
    Ok(pl)
}

fn chain_tolerance(arcs: &[ArcSegment]) -> f64 {
    let scale = arcs
        .iter()
        .map(|a| a.radius)
        .fold(1.0f64, f64::max);
    EPSILON * 1e3 * scale
}
