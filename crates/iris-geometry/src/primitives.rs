//! Stateless point, chord and circle helpers shared by the blade model and the solver.

use std::f64::consts::FRAC_PI_2;

use crate::{EPSILON, GeometryError, Point2};

/// Euclidean distance between `a` and `b`.
#[must_use]
pub fn distance(a: Point2, b: Point2) -> f64 {
    a.distance_to(b)
}

/// Linear interpolation from `a` to `b`. `t` is not clamped, so values outside `[0, 1]`
/// extrapolate along the line.
#[must_use]
pub fn lerp(a: Point2, b: Point2, t: f64) -> Point2 {
    Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Centre of the circle of `radius` passing through `a` and `b`.
///
/// Of the two candidate centres this always returns the one to the left of the `a -> b`
/// direction (the chord's normal rotated by +90°). Picking the other one mirrors the arc.
///
/// A chord at most `EPSILON` (relative) longer than the diameter is treated as a diameter;
/// anything longer is rejected.
pub fn circle_centre_from_chord(a: Point2, b: Point2, radius: f64) -> Result<Point2, GeometryError> {
    if !(radius > 0.0) {
        return Err(GeometryError::NonPositiveRadius { radius });
    }
    let half_chord = distance(a, b) / 2.0;
    if half_chord - radius > EPSILON * radius.max(1.0) {
        return Err(GeometryError::ChordTooLong { radius, half_chord });
    }
    Ok(centre_left_of_chord(a, b, radius))
}

/// Same as [`circle_centre_from_chord`] without the feasibility check; a chord longer than the
/// diameter collapses onto its midpoint.
pub(crate) fn centre_left_of_chord(a: Point2, b: Point2, radius: f64) -> Point2 {
    let half_chord = distance(a, b) / 2.0;
    let sagitta_leg = (radius * radius - half_chord * half_chord).max(0.0).sqrt();
    let mid = lerp(a, b, 0.5);
    let normal = (b.y - a.y).atan2(b.x - a.x) + FRAC_PI_2;
    mid + Point2::from_polar(sagitta_leg, normal)
}

/// Length of the chord subtending `subtended_angle` (radians) on a circle of `radius`.
#[must_use]
pub fn chord_length(radius: f64, subtended_angle: f64) -> f64 {
    2.0 * radius * (subtended_angle / 2.0).sin()
}

/// Inverse of [`chord_length`].
pub fn subtended_angle_from_chord(chord_length: f64, radius: f64) -> Result<f64, GeometryError> {
    let ratio = chord_length / (2.0 * radius);
    if !(ratio.abs() <= 1.0) {
        return Err(GeometryError::Domain {
            what: "asin",
            value: ratio,
        });
    }
    Ok(2.0 * ratio.asin())
}

/// Rotate `point` about the origin by `angle` radians (counter-clockwise).
///
/// The result is rebuilt from the point's magnitude and polar angle rather than a rotation
/// matrix, so its distance from the origin is exactly the input's. A point that had drifted off
/// its intended radius stays at that drifted radius.
#[must_use]
pub fn rotate(point: Point2, angle: f64) -> Point2 {
    Point2::from_polar(point.magnitude(), point.angle() + angle)
}

/// Move `point` by `distance` along the ray from `centre` through `point`. Negative distances
/// move it towards `centre`.
#[must_use]
pub fn offset_radially(point: Point2, centre: Point2, distance: f64) -> Point2 {
    let angle = (point.y - centre.y).atan2(point.x - centre.x);
    point + Point2::from_polar(distance, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_3, PI};

    #[test]
    fn centre_is_left_of_chord_direction() {
        let c = circle_centre_from_chord(Point2::new(1.0, 0.0), Point2::new(0.0, 1.0), 1.0).unwrap();
        assert_abs_diff_eq!(c.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 0.0, epsilon = 1e-12);

        // Reversing the chord picks the mirrored centre.
        let c = circle_centre_from_chord(Point2::new(0.0, 1.0), Point2::new(1.0, 0.0), 1.0).unwrap();
        assert_abs_diff_eq!(c.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn centre_matches_reference_measurement() {
        let c = circle_centre_from_chord(
            Point2::new(17.67829657, -44.43898377),
            Point2::new(29.21074847, 7.9156961),
            84.373947,
        )
        .unwrap();
        assert_abs_diff_eq!(c.x, -54.68532599, epsilon = 1e-5);
        assert_abs_diff_eq!(c.y, -1.05155445, epsilon = 1e-5);
    }

    #[test]
    fn centre_of_diameter_chord_is_midpoint() {
        let c = circle_centre_from_chord(Point2::new(-2.0, 0.0), Point2::new(2.0, 0.0), 2.0).unwrap();
        assert_abs_diff_eq!(c.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn centre_rejects_chord_longer_than_diameter() {
        let err = circle_centre_from_chord(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), 4.0)
            .unwrap_err();
        assert!(matches!(err, GeometryError::ChordTooLong { .. }));
        let err = circle_centre_from_chord(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), 0.0)
            .unwrap_err();
        assert!(matches!(err, GeometryError::NonPositiveRadius { .. }));
    }

    #[test]
    fn chord_and_subtended_angle_are_inverse() {
        let chord = chord_length(48.0, 0.2);
        assert_abs_diff_eq!(chord, 96.0 * 0.1f64.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(subtended_angle_from_chord(chord, 48.0).unwrap(), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(chord_length(1.0, PI), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn subtended_angle_rejects_impossible_chord() {
        let err = subtended_angle_from_chord(10.0, 4.0).unwrap_err();
        assert_eq!(
            err,
            GeometryError::Domain {
                what: "asin",
                value: 1.25
            }
        );
    }

    #[test]
    fn rotate_is_counter_clockwise() {
        let p = rotate(Point2::new(1.0, 2.0), PI);
        assert_abs_diff_eq!(p.x, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, -2.0, epsilon = 1e-12);

        let p = rotate(Point2::new(2.0, 0.0), FRAC_PI_3);
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 3f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn rotate_keeps_drifted_magnitude() {
        let drifted = Point2::new(50.000_001, 0.0);
        let p = rotate(drifted, 1.0);
        assert_abs_diff_eq!(p.magnitude(), 50.000_001, epsilon = 1e-12);
    }

    #[test]
    fn offset_radially_moves_along_centre_ray() {
        let centre = Point2::new(1.0, 1.0);
        let out = offset_radially(Point2::new(4.0, 5.0), centre, 5.0);
        assert_abs_diff_eq!(out.x, 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.y, 9.0, epsilon = 1e-12);

        let inward = offset_radially(Point2::new(4.0, 5.0), centre, -2.5);
        assert_abs_diff_eq!(inward.distance_to(centre), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn lerp_extrapolates() {
        let p = lerp(Point2::new(0.0, 0.0), Point2::new(2.0, 4.0), 1.5);
        assert_eq!(p, Point2::new(3.0, 6.0));
    }
}
