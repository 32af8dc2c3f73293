//! Static hole patterns for the stationary base plate and the rotating actuator ring.

use iris_geometry::primitives::{distance, subtended_angle_from_chord};
use iris_geometry::{ArcSegment, Circle, EPSILON, Point2};
use serde::{Deserialize, Serialize};

use crate::config::IrisConfiguration;
use crate::error::SolveError;
use crate::solver::{driven_pivot_local, solve_alpha};

/// Samples taken across the actuator range when measuring driven-pivot travel.
pub const TRAVEL_SAMPLES: usize = 64;

/// A straight pin slot with round ends centred on `start` and `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slot {
    pub start: Point2,
    pub end: Point2,
    pub width: f64,
}

/// Radial distance range covered by a driven pivot while the actuator sweeps its range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivenTravel {
    pub min_radius: f64,
    pub max_radius: f64,
}

/// Size of the handle tab on a plate's outer edge: `width` is the chord it occupies on the outer
/// circle, `height` how far it stands proud of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TabSize {
    pub width: f64,
    pub height: f64,
}

impl TabSize {
    /// Half the blade width in both directions.
    #[must_use]
    pub fn for_config(config: &IrisConfiguration) -> Self {
        let size = config.blade_width() / 2.0;
        Self {
            width: size,
            height: size,
        }
    }
}

/// Handle tab cut into the outer edge of a plate.
///
/// The outer circle is interrupted between `base[0]` and `base[1]`, two radial sides run out to
/// `tip`, and a semicircular `cap` joins the tips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleTab {
    pub gap_angle: f64,
    pub base: [Point2; 2],
    pub tip: [Point2; 2],
    pub cap: ArcSegment,
}

impl HandleTab {
    /// Tab of `size` centred on `rotation` on a circle of `outer_radius`.
    pub fn new(outer_radius: f64, size: TabSize, rotation: f64) -> Result<Self, SolveError> {
        let TabSize { width, height } = size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SolveError::InvalidTab { width, height });
        }
        let gap_angle = subtended_angle_from_chord(width, outer_radius)?;
        let (lo, hi) = (rotation - gap_angle / 2.0, rotation + gap_angle / 2.0);
        let tip_radius = outer_radius + height;

        let base = [
            Point2::from_polar(outer_radius, lo),
            Point2::from_polar(outer_radius, hi),
        ];
        let tip = [
            Point2::from_polar(tip_radius, lo),
            Point2::from_polar(tip_radius, hi),
        ];
        // Counter-clockwise from tip[0] to tip[1] about their midpoint bulges away from the centre.
        let cap = ArcSegment::new(distance(tip[0], tip[1]) / 2.0, tip[0], tip[1])?;

        Ok(Self {
            gap_angle,
            base,
            tip,
            cap,
        })
    }
}

/// A flat annular part: two boundary circles, an optional handle tab, and its cut-outs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatePattern {
    pub inner: Circle,
    pub outer: Circle,
    pub tab: Option<HandleTab>,
    pub holes: Vec<Circle>,
    pub slots: Vec<Slot>,
}

/// Sample `samples` actuator angles evenly over `[min, max]` (both ends included) and record how
/// far the driven pivot gets from the centre.
pub fn driven_travel(config: &IrisConfiguration, samples: usize) -> Result<DrivenTravel, SolveError> {
    let samples = samples.max(2);
    let min = config.min_actuator_angle();
    let span = config.max_actuator_angle() - min;

    let mut travel = DrivenTravel {
        min_radius: f64::INFINITY,
        max_radius: f64::NEG_INFINITY,
    };
    for step in 0..samples {
        let angle = min + span * step as f64 / (samples - 1) as f64;
        let alpha = solve_alpha(config, angle)?;
        let r = driven_pivot_local(config, angle, alpha).magnitude();
        travel.min_radius = travel.min_radius.min(r);
        travel.max_radius = travel.max_radius.max(r);
    }
    Ok(travel)
}

/// Inner and outer plate edges, kept one pin diameter clear of the widest cut-out.
fn plate_boundaries(config: &IrisConfiguration, travel: &DrivenTravel) -> (Circle, Circle) {
    let margin = config.hole_diameter() / 2.0 + config.pin_diameter();
    let pinned = config.pinned_radius();
    let inner = (travel.min_radius.min(pinned) - margin).max(EPSILON);
    let outer = travel.max_radius.max(pinned) + margin;
    (
        Circle::new(Point2::ORIGIN, inner),
        Circle::new(Point2::ORIGIN, outer),
    )
}

fn handle_tab(outer: &Circle, tab: Option<TabSize>, rotation: f64) -> Result<Option<HandleTab>, SolveError> {
    tab.map(|size| HandleTab::new(outer.radius, size, rotation)).transpose()
}

/// Base plate: one fixed-pivot hole per blade on the pinned-radius circle.
pub fn base_plate(
    config: &IrisConfiguration,
    rotation: f64,
    tab: Option<TabSize>,
) -> Result<PlatePattern, SolveError> {
    let travel = driven_travel(config, TRAVEL_SAMPLES)?;
    let (inner, outer) = plate_boundaries(config, &travel);
    let tab = handle_tab(&outer, tab, rotation)?;
    let hole_radius = config.hole_diameter() / 2.0;

    let holes = (0..config.blade_count())
        .map(|i| {
            let at = config.blade_angular_offset(i) + rotation;
            Circle::new(Point2::from_polar(config.pinned_radius(), at), hole_radius)
        })
        .collect();

    Ok(PlatePattern {
        inner,
        outer,
        tab,
        holes,
        slots: Vec::new(),
    })
}

/// Actuator ring: one radial slot per blade covering the driven pivot's travel. The tab, if any,
/// is the handle the ring is turned by.
pub fn actuator_ring(
    config: &IrisConfiguration,
    rotation: f64,
    tab: Option<TabSize>,
) -> Result<PlatePattern, SolveError> {
    let travel = driven_travel(config, TRAVEL_SAMPLES)?;
    let (inner, outer) = plate_boundaries(config, &travel);
    let tab = handle_tab(&outer, tab, rotation)?;
    let width = config.hole_diameter();

    let slots = (0..config.blade_count())
        .map(|i| {
            let at = config.blade_angular_offset(i) + rotation;
            Slot {
                start: Point2::from_polar(travel.min_radius, at),
                end: Point2::from_polar(travel.max_radius, at),
                width,
            }
        })
        .collect();

    Ok(PlatePattern {
        inner,
        outer,
        tab,
        holes: Vec::new(),
        slots,
    })
}
