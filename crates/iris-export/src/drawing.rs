use std::f64::consts::TAU;

use cavalier_contours::polyline::{PlineSource, seg_bounding_box};
use iris_geometry::outline::stadium;
use iris_geometry::{ArcSegment, Circle, GeometryError, PlineVertex, Point2, Polyline};
use iris_mechanism::{Blade, HandleTab, IrisGeometry, PlatePattern};

/// Polyline with one bulge per vertex; the bulge describes the segment leaving that vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct LwPolyline {
    pub vertices: Vec<Point2>,
    pub bulges: Vec<f64>,
    pub closed: bool,
}

impl From<&Polyline<f64>> for LwPolyline {
    fn from(pl: &Polyline<f64>) -> Self {
        Self {
            vertices: pl.vertex_data.iter().map(|v| Point2::new(v.x, v.y)).collect(),
            bulges: pl.vertex_data.iter().map(|v| v.bulge).collect(),
            closed: pl.is_closed(),
        }
    }
}

impl LwPolyline {
    /// Segments as `(from, to)` bulge vertex pairs, including the closing one.
    fn segments(&self) -> impl Iterator<Item = (PlineVertex<f64>, PlineVertex<f64>)> + '_ {
        let n = self.vertices.len();
        let count = match (n, self.closed) {
            (0 | 1, _) => 0,
            (_, true) => n,
            (_, false) => n - 1,
        };
        (0..count).map(move |i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let bulge = self.bulges.get(i).copied().unwrap_or(0.0);
            (PlineVertex::new(a.x, a.y, bulge), PlineVertex::new(b.x, b.y, 0.0))
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Line { start: Point2, end: Point2 },
    Circle(Circle),
    /// Counter-clockwise minor arc, as [`ArcSegment`] defines it.
    Arc(ArcSegment),
    LwPolyline(LwPolyline),
}

impl Entity {
    fn is_finite(&self) -> bool {
        match self {
            Entity::Line { start, end } => start.is_finite() && end.is_finite(),
            Entity::Circle(c) => c.centre.is_finite() && c.radius.is_finite(),
            Entity::Arc(a) => a.start.is_finite() && a.end.is_finite() && a.radius.is_finite(),
            Entity::LwPolyline(pl) => {
                pl.vertices.iter().all(Point2::is_finite) && pl.bulges.iter().all(|b| b.is_finite())
            }
        }
    }
}

/// Axis-aligned box around a drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    fn include(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        self.min.x = self.min.x.min(min_x);
        self.min.y = self.min.y.min(min_y);
        self.max.x = self.max.x.max(max_x);
        self.max.y = self.max.y.max(max_y);
    }

    fn include_segment(&mut self, a: PlineVertex<f64>, b: PlineVertex<f64>) {
        let bb = seg_bounding_box(a, b);
        self.include(bb.min_x, bb.min_y, bb.max_x, bb.max_y);
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// A flat list of entities in one coordinate frame, ready for a writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    pub entities: Vec<Entity>,
}

impl Drawing {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Every blade of `geometry`: its four outline arcs and both pivot holes.
    #[must_use]
    pub fn iris(geometry: &IrisGeometry) -> Self {
        let mut drawing = Self::new();
        for blade in &geometry.blades {
            drawing.add_blade_arcs(blade);
        }
        drawing
    }

    /// A single blade for cutting: the silhouette as one closed polyline plus its two holes.
    pub fn blade_profile(blade: &Blade) -> Result<Self, GeometryError> {
        let outline = blade.outline_polyline()?;
        let mut drawing = Self::new();
        drawing.push(Entity::LwPolyline(LwPolyline::from(&outline)));
        for hole in blade.holes {
            drawing.push(Entity::Circle(hole));
        }
        Ok(drawing)
    }

    /// Boundary, holes, and slots (as closed stadium polylines) of a plate.
    ///
    /// With a handle tab the outer edge becomes the tab outline: the outer circle minus the gap as an
    /// open polyline, the two radial sides, and the cap.
    #[must_use]
    pub fn plate(plate: &PlatePattern) -> Self {
        let mut drawing = Self::new();
        match &plate.tab {
            Some(tab) => drawing.add_tab_outline(tab),
            None => drawing.push(Entity::Circle(plate.outer)),
        }
        drawing.push(Entity::Circle(plate.inner));
        for hole in &plate.holes {
            drawing.push(Entity::Circle(*hole));
        }
        for slot in &plate.slots {
            let pl = stadium(slot.start, slot.end, slot.width);
            drawing.push(Entity::LwPolyline(LwPolyline::from(&pl)));
        }
        drawing
    }

    fn add_tab_outline(&mut self, tab: &HandleTab) {
        // Counter-clockwise the long way round, from the far side of the gap back to the near side.
        let rim_bulge = ((TAU - tab.gap_angle) / 4.0).tan();
        self.push(Entity::LwPolyline(LwPolyline {
            vertices: vec![tab.base[1], tab.base[0]],
            bulges: vec![rim_bulge, 0.0],
            closed: false,
        }));
        for (base, tip) in tab.base.iter().zip(tab.tip) {
            self.push(Entity::Line { start: *base, end: tip });
        }
        self.push(Entity::Arc(tab.cap));
    }

    fn add_blade_arcs(&mut self, blade: &Blade) {
        for arc in blade.outline {
            self.push(Entity::Arc(arc));
        }
        for hole in blade.holes {
            self.push(Entity::Circle(hole));
        }
    }

    /// Append every entity of `other`.
    pub fn extend(&mut self, other: Drawing) {
        self.entities.extend(other.entities);
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.entities.iter().all(Entity::is_finite)
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        for entity in &self.entities {
            match entity {
                Entity::Line { start, end } => {
                    bounds.include(start.x, start.y, start.x, start.y);
                    bounds.include(end.x, end.y, end.x, end.y);
                }
                Entity::Circle(c) => {
                    let r = c.radius.abs();
                    bounds.include(c.centre.x - r, c.centre.y - r, c.centre.x + r, c.centre.y + r);
                }
                Entity::Arc(a) => {
                    bounds.include_segment(
                        PlineVertex::new(a.start.x, a.start.y, a.bulge()),
                        PlineVertex::new(a.end.x, a.end.y, 0.0),
                    );
                }
                Entity::LwPolyline(pl) => {
                    for (a, b) in pl.segments() {
                        bounds.include_segment(a, b);
                    }
                }
            }
        }
        bounds
    }

    /// Largest absolute coordinate reached by the drawing, i.e. the `extent` for
    /// [`Layout::fit`](crate::Layout::fit).
    #[must_use]
    pub fn extent_radius(&self) -> f64 {
        let b = self.bounds();
        if !b.is_valid() {
            return 0.0;
        }
        [b.min.x, b.min.y, b.max.x, b.max.y]
            .iter()
            .map(|v| v.abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use iris_mechanism::{
        IrisConfiguration, IrisParams, TabSize, actuator_ring, base_plate, compute_iris_geometry,
    };

    fn config() -> IrisConfiguration {
        IrisConfiguration::new(IrisParams {
            blade_count: 6,
            blade_radius: 40.0,
            subtended_angle: 0.5,
            blade_width: 4.0,
            pin_diameter: 2.0,
            clearance: 0.2,
            pinned_radius: 45.0,
            min_actuator_angle: 0.2,
            max_actuator_angle: 0.9,
        })
        .unwrap()
    }

    #[test]
    fn iris_has_four_arcs_and_two_holes_per_blade() {
        let geometry = compute_iris_geometry(&config(), 0.2).unwrap();
        let drawing = Drawing::iris(&geometry);
        assert_eq!(drawing.len(), 6 * 6);
        let arcs = drawing
            .entities
            .iter()
            .filter(|e| matches!(e, Entity::Arc(_)))
            .count();
        assert_eq!(arcs, 24);
        assert!(drawing.is_finite());
    }

    #[test]
    fn blade_profile_is_one_closed_polyline() {
        let geometry = compute_iris_geometry(&config(), 0.2).unwrap();
        let drawing = Drawing::blade_profile(&geometry.blades[0]).unwrap();
        assert_eq!(drawing.len(), 3);
        let Entity::LwPolyline(pl) = &drawing.entities[0] else {
            panic!("expected polyline, got {:?}", drawing.entities[0]);
        };
        assert!(pl.closed);
        assert_eq!(pl.vertices.len(), 4);
        assert_eq!(pl.bulges.len(), 4);
    }

    #[test]
    fn plates_carry_holes_and_slots() {
        let cfg = config();
        let base = Drawing::plate(&base_plate(&cfg, 0.0, None).unwrap());
        assert_eq!(base.len(), 2 + 6);
        let ring = Drawing::plate(&actuator_ring(&cfg, 0.0, None).unwrap());
        let slots = ring
            .entities
            .iter()
            .filter(|e| matches!(e, Entity::LwPolyline(pl) if pl.closed && pl.vertices.len() == 4))
            .count();
        assert_eq!(slots, 6);
    }

    #[test]
    fn tabbed_ring_replaces_outer_circle_with_tab_outline() {
        let cfg = config();
        let ring = actuator_ring(&cfg, 0.0, Some(TabSize::for_config(&cfg))).unwrap();
        let tab = ring.tab.unwrap();
        let drawing = Drawing::plate(&ring);

        let circles: Vec<f64> = drawing
            .entities
            .iter()
            .filter_map(|e| match e {
                Entity::Circle(c) => Some(c.radius),
                _ => None,
            })
            .collect();
        assert_eq!(circles, vec![ring.inner.radius]);

        let lines = drawing
            .entities
            .iter()
            .filter(|e| matches!(e, Entity::Line { .. }))
            .count();
        assert_eq!(lines, 2);

        let Entity::LwPolyline(rim) = &drawing.entities[0] else {
            panic!("expected rim polyline, got {:?}", drawing.entities[0]);
        };
        assert!(!rim.closed);
        assert_eq!(rim.vertices, vec![tab.base[1], tab.base[0]]);
        assert!(rim.bulges[0] > 1.0, "rim must take the long way round");

        // The rim reaches the full outer radius on the far side; the cap pokes out past it.
        let b = drawing.bounds();
        assert_abs_diff_eq!(b.min.x, -ring.outer.radius, epsilon = 1e-9);
        assert_abs_diff_eq!(b.max.x, tab.cap.midpoint().x, epsilon = 1e-9);
        assert!(b.max.x > ring.outer.radius + 2.0);
    }

    #[test]
    fn bounds_cover_arc_bulge() {
        let mut drawing = Drawing::new();
        // Quarter arc from (1, 0) to (0, 1): its midpoint pushes the box out to ~0.707.
        drawing.push(Entity::Arc(
            ArcSegment::new(1.0, Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)).unwrap(),
        ));
        drawing.push(Entity::Circle(Circle::new(Point2::new(-3.0, 0.0), 1.0)));
        let b = drawing.bounds();
        assert_abs_diff_eq!(b.min.x, -4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.max.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.max.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(drawing.extent_radius(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_drawing_has_no_extent() {
        let drawing = Drawing::new();
        assert!(drawing.is_empty());
        assert!(!drawing.bounds().is_valid());
        assert_eq!(drawing.extent_radius(), 0.0);
    }
}
