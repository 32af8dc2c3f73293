use iris_geometry::outline::polyline_from_arc_chain;
use iris_geometry::primitives::{circle_centre_from_chord, distance, offset_radially, rotate};
use iris_geometry::{ArcSegment, Circle, GeometryError, Point2, Polyline};
use serde::Serialize;

use crate::config::IrisConfiguration;

/// The per-blade constants that do not change with the actuator angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeShape {
    pub radius: f64,
    pub subtended_angle: f64,
    pub width: f64,
    pub hole_diameter: f64,
}

impl BladeShape {
    #[must_use]
    pub fn from_config(config: &IrisConfiguration) -> Self {
        Self {
            radius: config.blade_radius(),
            subtended_angle: config.subtended_angle(),
            width: config.blade_width(),
            hole_diameter: config.hole_diameter(),
        }
    }

    /// Pivot-to-pivot distance. Never negative; direction comes from the blade angle.
    #[must_use]
    pub fn pivot_distance(&self) -> f64 {
        (2.0 * self.radius * (self.subtended_angle / 2.0).sin()).abs()
    }
}

/// Index of each arc inside [`Blade::outline`].
pub const OUTER: usize = 0;
pub const INNER: usize = 1;
pub const DRIVEN_CAP: usize = 2;
pub const FIXED_CAP: usize = 3;

/// One blade at one actuator angle.
///
/// `outline` holds the outer edge, the inner edge, the cap around the driven pivot and the cap
/// around the fixed pivot. Outer and inner run from the fixed end to the driven end; each cap runs
/// from its outer corner to its inner corner (driven) or back (fixed), so walking
/// outer, driven cap, inner reversed, fixed cap traces the silhouette counter-clockwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blade {
    pub id: usize,
    pub fixed_pivot: Point2,
    pub driven_pivot: Point2,
    pub arc_centre: Point2,
    pub outline: [ArcSegment; 4],
    /// Through-holes at the fixed and driven pivots, in that order.
    pub holes: [Circle; 2],
}

impl Blade {
    /// Build blade `id`.
    ///
    /// `local_fixed` is the fixed pivot before the blade is turned into its slot; the driven pivot
    /// sits `shape.pivot_distance()` away from it in direction `theta_a`. Both pivots are then
    /// rotated about the origin by `rotation`.
    pub fn build(
        shape: &BladeShape,
        theta_a: f64,
        local_fixed: Point2,
        id: usize,
        rotation: f64,
    ) -> Result<Self, GeometryError> {
        let ac = shape.pivot_distance();
        let local_driven = local_fixed + Point2::from_polar(ac, theta_a);

        let fixed_pivot = rotate(local_fixed, rotation);
        let driven_pivot = rotate(local_driven, rotation);
        let arc_centre = circle_centre_from_chord(fixed_pivot, driven_pivot, shape.radius)?;

        let half = shape.width / 2.0;
        let fixed_out = offset_radially(fixed_pivot, arc_centre, half);
        let fixed_in = offset_radially(fixed_pivot, arc_centre, -half);
        let driven_out = offset_radially(driven_pivot, arc_centre, half);
        let driven_in = offset_radially(driven_pivot, arc_centre, -half);

        let outline = [
            ArcSegment::new(shape.radius + half, fixed_out, driven_out)?,
            ArcSegment::new(shape.radius - half, fixed_in, driven_in)?,
            ArcSegment::new(half, driven_out, driven_in)?,
            ArcSegment::new(half, fixed_in, fixed_out)?,
        ];

        let hole_radius = shape.hole_diameter / 2.0;
        Ok(Self {
            id,
            fixed_pivot,
            driven_pivot,
            arc_centre,
            outline,
            holes: [
                Circle::new(fixed_pivot, hole_radius),
                Circle::new(driven_pivot, hole_radius),
            ],
        })
    }

    #[must_use]
    pub fn pivot_distance(&self) -> f64 {
        distance(self.fixed_pivot, self.driven_pivot)
    }

    #[must_use]
    pub fn outer(&self) -> &ArcSegment {
        &self.outline[OUTER]
    }

    #[must_use]
    pub fn inner(&self) -> &ArcSegment {
        &self.outline[INNER]
    }

    /// The closed silhouette as a bulge polyline, counter-clockwise.
    pub fn outline_polyline(&self) -> Result<Polyline<f64>, GeometryError> {
        polyline_from_arc_chain(&[
            self.outline[OUTER],
            self.outline[DRIVEN_CAP],
            self.outline[INNER],
            self.outline[FIXED_CAP],
        ])
    }
}
