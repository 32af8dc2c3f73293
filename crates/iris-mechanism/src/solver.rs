//! Single-degree-of-freedom linkage: actuator angle in, blade pivots out.

use iris_geometry::primitives::rotate;
use iris_geometry::{EPSILON, Point2};
use tracing::{trace, warn};

use crate::blade::{Blade, BladeShape};
use crate::config::IrisConfiguration;
use crate::error::SolveError;

/// Unclamped `cos(alpha)` for `actuator_angle`.
#[must_use]
pub fn cos_alpha(config: &IrisConfiguration, actuator_angle: f64) -> f64 {
    config.chord_length() / config.pinned_radius() * actuator_angle.cos()
}

/// Blade angle `alpha` for `actuator_angle`.
///
/// Rounding that pushes `cos(alpha)` past ±1 by at most `EPSILON` is absorbed; anything larger is
/// a [`SolveError::Domain`].
pub fn solve_alpha(config: &IrisConfiguration, actuator_angle: f64) -> Result<f64, SolveError> {
    if !actuator_angle.is_finite() {
        return Err(SolveError::NonFiniteAngle {
            angle: actuator_angle,
        });
    }
    let raw = cos_alpha(config, actuator_angle);
    let overshoot = raw.abs() - 1.0;
    if overshoot > EPSILON {
        return Err(SolveError::Domain {
            what: "acos",
            value: raw,
        });
    }
    let clamped = raw.clamp(-1.0, 1.0);
    if overshoot > 0.0 {
        warn!(actuator_angle, cos_alpha = raw, "clamped cos(alpha) rounding overshoot");
    }
    Ok(clamped.acos())
}

/// Fixed pivot of blade 0 for `actuator_angle`, before the blade is turned into its slot.
#[must_use]
pub fn fixed_pivot_local(config: &IrisConfiguration, actuator_angle: f64) -> Point2 {
    rotate(Point2::new(config.pinned_radius(), 0.0), -actuator_angle)
}

/// Fixed pivot of blade `index`: on the pinned-radius circle at `2π·index/N − actuator_angle`.
#[must_use]
pub fn fixed_pivot(config: &IrisConfiguration, index: usize, actuator_angle: f64) -> Point2 {
    rotate(
        Point2::new(config.pinned_radius(), 0.0),
        config.blade_angular_offset(index) - actuator_angle,
    )
}

/// Driven pivot of blade 0 in its local frame, given the solved `alpha`.
#[must_use]
pub fn driven_pivot_local(config: &IrisConfiguration, actuator_angle: f64, alpha: f64) -> Point2 {
    fixed_pivot_local(config, actuator_angle) + Point2::from_polar(config.chord_length(), alpha)
}

/// Every blade at `actuator_angle`, in index order.
pub fn solve_blades(config: &IrisConfiguration, actuator_angle: f64) -> Result<Vec<Blade>, SolveError> {
    let alpha = solve_alpha(config, actuator_angle)?;
    let shape = BladeShape::from_config(config);
    let local_fixed = fixed_pivot_local(config, actuator_angle);

    (0..config.blade_count())
        .map(|i| -> Result<Blade, SolveError> {
            let blade = Blade::build(&shape, alpha, local_fixed, i, config.blade_angular_offset(i))?;
            trace!(
                id = i,
                fixed_x = blade.fixed_pivot.x,
                fixed_y = blade.fixed_pivot.y,
                driven_x = blade.driven_pivot.x,
                driven_y = blade.driven_pivot.y,
                "built blade"
            );
            Ok(blade)
        })
        .collect()
}
