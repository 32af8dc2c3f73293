//! Ping-pong actuator motion for callers that animate the iris.
//!
//! Time is always passed in; nothing here reads a clock.

use serde::{Deserialize, Serialize};

use crate::config::IrisConfiguration;

/// Triangle wave between `min` and `max` at `speed` radians per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    pub min: f64,
    pub max: f64,
    pub speed: f64,
}

impl Oscillation {
    #[must_use]
    pub fn new(min: f64, max: f64, speed: f64) -> Self {
        Self { min, max, speed }
    }

    /// Oscillate across the full actuator range of `config`.
    #[must_use]
    pub fn for_config(config: &IrisConfiguration, speed: f64) -> Self {
        Self::new(config.min_actuator_angle(), config.max_actuator_angle(), speed)
    }

    /// Seconds for one full `min -> max -> min` cycle, or infinity when the wave never moves.
    #[must_use]
    pub fn period(&self) -> f64 {
        let span = self.max - self.min;
        if self.speed > 0.0 && span > 0.0 {
            2.0 * span / self.speed
        } else {
            f64::INFINITY
        }
    }

    /// Angle after `elapsed` seconds. Starts at `min`; always inside `[min, max]`.
    ///
    /// Negative and very large `elapsed` fold into the same cycle.
    #[must_use]
    pub fn angle_at(&self, elapsed: f64) -> f64 {
        let span = self.max - self.min;
        let travelled = elapsed * self.speed;
        if !(span > 0.0) || !travelled.is_finite() {
            return self.min;
        }
        let phase = travelled.rem_euclid(2.0 * span);
        let angle = if phase <= span {
            self.min + phase
        } else {
            self.max - (phase - span)
        };
        angle.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rises_then_falls() {
        let osc = Oscillation::new(0.2, 1.2, 0.5);
        assert_abs_diff_eq!(osc.period(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(osc.angle_at(0.0), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(osc.angle_at(1.0), 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(osc.angle_at(2.0), 1.2, epsilon = 1e-12);
        assert_abs_diff_eq!(osc.angle_at(3.0), 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(osc.angle_at(4.0), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(osc.angle_at(41.0), 0.7, epsilon = 1e-9);
    }

    #[test]
    fn negative_time_mirrors_forward_motion() {
        let osc = Oscillation::new(0.0, 1.0, 1.0);
        assert_abs_diff_eq!(osc.angle_at(-0.25), osc.angle_at(0.25), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_inputs_stay_at_min() {
        assert_eq!(Oscillation::new(0.0, 1.0, 1.0).angle_at(f64::NAN), 0.0);
        assert_eq!(Oscillation::new(0.0, 1.0, f64::INFINITY).angle_at(1.0), 0.0);
        assert_eq!(Oscillation::new(0.5, 0.5, 1.0).angle_at(3.0), 0.5);
        assert!(Oscillation::new(0.0, 1.0, 0.0).period().is_infinite());
    }
}
