use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::primitives::{centre_left_of_chord, distance};
use crate::{EPSILON, GeometryError, Point2};

/// A circular arc of `radius` through `start` and `end`.
///
/// The arc is the counter-clockwise minor arc from `start` to `end` about the centre lying to the
/// left of `start -> end`. `angle` is `atan2(start - end)` and is carried for serializers that
/// need the chord direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub radius: f64,
    pub angle: f64,
    pub start: Point2,
    pub end: Point2,
}

impl ArcSegment {
    /// Build an arc, rejecting radii that cannot span the chord (`radius < |start - end| / 2`
    /// beyond `EPSILON` relative tolerance).
    pub fn new(radius: f64, start: Point2, end: Point2) -> Result<Self, GeometryError> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius { radius });
        }
        let half_chord = distance(start, end) / 2.0;
        if half_chord - radius > EPSILON * radius.max(1.0) {
            return Err(GeometryError::ChordTooLong { radius, half_chord });
        }
        Ok(Self {
            radius,
            angle: (start.y - end.y).atan2(start.x - end.x),
            start,
            end,
        })
    }

    #[must_use]
    pub fn chord(&self) -> f64 {
        distance(self.start, self.end)
    }

    #[must_use]
    pub fn centre(&self) -> Point2 {
        centre_left_of_chord(self.start, self.end, self.radius)
    }

    /// Angle swept from `start` to `end`, in `[0, π]`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        let ratio = (self.chord() / (2.0 * self.radius)).min(1.0);
        2.0 * ratio.asin()
    }

    /// Polar angle of `start` around the centre.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        let c = self.centre();
        (self.start.y - c.y).atan2(self.start.x - c.x)
    }

    /// Polar angle of `end` around the centre.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.start_angle() + self.sweep()
    }

    /// Bulge value of this arc when used as a polyline segment from `start` to `end`.
    #[must_use]
    pub fn bulge(&self) -> f64 {
        (self.sweep() / 4.0).tan()
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        self.centre() + Point2::from_polar(self.radius, self.start_angle() + self.sweep() / 2.0)
    }

    /// Shortest distance from `p` to any point of the arc.
    #[must_use]
    pub fn distance_from(&self, p: Point2) -> f64 {
        let c = self.centre();
        let offset = p - c;
        let to_endpoints = distance(p, self.start).min(distance(p, self.end));
        if offset.magnitude() == 0.0 {
            return self.radius;
        }
        let rel = (offset.angle() - self.start_angle()).rem_euclid(TAU);
        if rel <= self.sweep() {
            (offset.magnitude() - self.radius).abs().min(to_endpoints)
        } else {
            to_endpoints
        }
    }

    /// The same arc mapped through `f`, which must be a similarity transform without reflection.
    #[must_use]
    pub fn map(&self, radius_scale: f64, f: impl Fn(Point2) -> Point2) -> Self {
        let start = f(self.start);
        let end = f(self.end);
        Self {
            radius: self.radius * radius_scale,
            angle: (start.y - end.y).atan2(start.x - end.x),
            start,
            end,
        }
    }

    /// True when the arc still satisfies `radius >= chord / 2` within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.radius > 0.0 && self.chord() / 2.0 - self.radius <= EPSILON * self.radius.max(1.0)
    }

    /// Whether the arc is (numerically) a half circle.
    #[must_use]
    pub fn is_semicircle(&self) -> bool {
        (self.sweep() - PI).abs() <= 1e-6
    }
}

/// A full circle, used for pin holes and plate boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub centre: Point2,
    pub radius: f64,
}

impl Circle {
    #[must_use]
    pub fn new(centre: Point2, radius: f64) -> Self {
        Self { centre, radius }
    }
}
