use iris_geometry::{ArcSegment, Circle, Point2};

use crate::ExportError;
use crate::drawing::{Drawing, Entity, LwPolyline};

/// Share of the fitted extent left empty around the drawing.
pub const DEFAULT_MARGIN: f64 = 0.15;

/// Component-wise scale followed by a translation.
///
/// Radii are scaled by `scale.x`; the scale is assumed uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub scale: Point2,
    pub offset: Point2,
}

impl Default for Layout {
    fn default() -> Self {
        Self::identity()
    }
}

impl Layout {
    #[must_use]
    pub fn identity() -> Self {
        Self {
            scale: Point2::new(1.0, 1.0),
            offset: Point2::ORIGIN,
        }
    }

    #[must_use]
    pub fn new(scale: f64, offset: Point2) -> Self {
        Self {
            scale: Point2::new(scale, scale),
            offset,
        }
    }

    /// Centre a drawing of radius `extent` in a `width` x `height` viewport, leaving `margin`
    /// (a fraction of the extent) free on every side.
    pub fn fit(width: f64, height: f64, extent: f64, margin: f64) -> Result<Self, ExportError> {
        let valid = [width, height, extent].iter().all(|v| v.is_finite() && *v > 0.0)
            && margin.is_finite()
            && margin > -1.0;
        if !valid {
            return Err(ExportError::InvalidViewport {
                width,
                height,
                extent,
            });
        }
        let scale = width.min(height) / extent / 2.0 / (1.0 + margin);
        Ok(Self::new(scale, Point2::new(width / 2.0, height / 2.0)))
    }

    #[must_use]
    pub fn apply_point(&self, p: Point2) -> Point2 {
        p.scale(self.scale) + self.offset
    }

    #[must_use]
    pub fn apply_radius(&self, r: f64) -> f64 {
        r * self.scale.x
    }

    #[must_use]
    pub fn apply_arc(&self, arc: &ArcSegment) -> ArcSegment {
        arc.map(self.scale.x, |p| self.apply_point(p))
    }

    #[must_use]
    pub fn apply_circle(&self, circle: &Circle) -> Circle {
        Circle::new(self.apply_point(circle.centre), self.apply_radius(circle.radius))
    }

    #[must_use]
    pub fn apply_drawing(&self, drawing: &Drawing) -> Drawing {
        let entities = drawing
            .entities
            .iter()
            .map(|e| match e {
                Entity::Line { start, end } => Entity::Line {
                    start: self.apply_point(*start),
                    end: self.apply_point(*end),
                },
                Entity::Circle(c) => Entity::Circle(self.apply_circle(c)),
                Entity::Arc(a) => Entity::Arc(self.apply_arc(a)),
                // Bulges are scale invariant.
                Entity::LwPolyline(pl) => Entity::LwPolyline(LwPolyline {
                    vertices: pl.vertices.iter().map(|v| self.apply_point(*v)).collect(),
                    bulges: pl.bulges.clone(),
                    closed: pl.closed,
                }),
            })
            .collect();
        Drawing { entities }
    }
}
