use std::f64::consts::{PI, TAU};

use iris_geometry::primitives::chord_length;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Raw mechanism parameters as they arrive from a form, a file or the design service.
///
/// Nothing here is checked; turn it into an [`IrisConfiguration`] before solving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrisParams {
    pub blade_count: usize,
    pub blade_radius: f64,
    /// Radians.
    pub subtended_angle: f64,
    pub blade_width: f64,
    pub pin_diameter: f64,
    #[serde(default)]
    pub clearance: f64,
    pub pinned_radius: f64,
    /// Radians.
    pub min_actuator_angle: f64,
    /// Radians.
    pub max_actuator_angle: f64,
}

/// A validated, immutable iris parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IrisParams", into = "IrisParams")]
pub struct IrisConfiguration {
    params: IrisParams,
    chord: f64,
}

impl IrisConfiguration {
    pub fn new(params: IrisParams) -> Result<Self, ConfigError> {
        let p = &params;
        if p.blade_count < 3 {
            return Err(ConfigError::TooFewBlades {
                count: p.blade_count,
            });
        }

        for (field, value) in [
            ("bladeRadius", p.blade_radius),
            ("subtendedAngle", p.subtended_angle),
            ("bladeWidth", p.blade_width),
            ("pinDiameter", p.pin_diameter),
            ("clearance", p.clearance),
            ("pinnedRadius", p.pinned_radius),
            ("minActuatorAngle", p.min_actuator_angle),
            ("maxActuatorAngle", p.max_actuator_angle),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        for (field, value) in [
            ("bladeRadius", p.blade_radius),
            ("bladeWidth", p.blade_width),
            ("pinDiameter", p.pin_diameter),
            ("pinnedRadius", p.pinned_radius),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if p.clearance < 0.0 {
            return Err(ConfigError::NegativeClearance { value: p.clearance });
        }

        if !(p.subtended_angle > 0.0 && p.subtended_angle < PI) {
            return Err(ConfigError::SubtendedAngleOutOfRange {
                value: p.subtended_angle,
            });
        }
        if p.blade_width >= p.blade_radius {
            return Err(ConfigError::BladeTooWide {
                blade_width: p.blade_width,
                blade_radius: p.blade_radius,
            });
        }
        if p.min_actuator_angle >= p.max_actuator_angle {
            return Err(ConfigError::EmptyActuatorRange {
                min: p.min_actuator_angle,
                max: p.max_actuator_angle,
            });
        }

        let chord = chord_length(p.blade_radius, p.subtended_angle);
        if chord > p.pinned_radius {
            return Err(ConfigError::ChordExceedsPinnedRadius {
                chord,
                pinned_radius: p.pinned_radius,
            });
        }

        // The design envelope must be solvable without leaning on the acos clamp.
        for angle in [p.min_actuator_angle, p.max_actuator_angle] {
            let cos_alpha = chord / p.pinned_radius * angle.cos();
            if cos_alpha.abs() >= 1.0 {
                return Err(ConfigError::BoundaryInfeasible { angle, cos_alpha });
            }
        }

        Ok(Self { params, chord })
    }

    #[must_use]
    pub fn params(&self) -> &IrisParams {
        &self.params
    }

    #[must_use]
    pub fn blade_count(&self) -> usize {
        self.params.blade_count
    }

    #[must_use]
    pub fn blade_radius(&self) -> f64 {
        self.params.blade_radius
    }

    #[must_use]
    pub fn subtended_angle(&self) -> f64 {
        self.params.subtended_angle
    }

    #[must_use]
    pub fn blade_width(&self) -> f64 {
        self.params.blade_width
    }

    #[must_use]
    pub fn pin_diameter(&self) -> f64 {
        self.params.pin_diameter
    }

    #[must_use]
    pub fn clearance(&self) -> f64 {
        self.params.clearance
    }

    #[must_use]
    pub fn pinned_radius(&self) -> f64 {
        self.params.pinned_radius
    }

    #[must_use]
    pub fn min_actuator_angle(&self) -> f64 {
        self.params.min_actuator_angle
    }

    #[must_use]
    pub fn max_actuator_angle(&self) -> f64 {
        self.params.max_actuator_angle
    }

    /// Fixed pivot-to-pivot distance shared by every blade.
    #[must_use]
    pub fn chord_length(&self) -> f64 {
        self.chord
    }

    /// Diameter of the through-holes cut for each pin.
    #[must_use]
    pub fn hole_diameter(&self) -> f64 {
        self.params.pin_diameter + self.params.clearance
    }

    /// Angular slot of blade `index` around the ring: `2π·index/N`.
    #[must_use]
    pub fn blade_angular_offset(&self, index: usize) -> f64 {
        TAU * index as f64 / self.params.blade_count as f64
    }

    /// Whether `angle` lies inside the design envelope `[min, max]`.
    #[must_use]
    pub fn contains_angle(&self, angle: f64) -> bool {
        angle >= self.params.min_actuator_angle && angle <= self.params.max_actuator_angle
    }
}

impl TryFrom<IrisParams> for IrisConfiguration {
    type Error = ConfigError;

    fn try_from(params: IrisParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<IrisConfiguration> for IrisParams {
    fn from(config: IrisConfiguration) -> Self {
        config.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn params() -> IrisParams {
        IrisParams {
            blade_count: 10,
            blade_radius: 48.0,
            subtended_angle: 0.2,
            blade_width: 5.0,
            pin_diameter: 3.0,
            clearance: 0.5,
            pinned_radius: 50.0,
            min_actuator_angle: 0.0,
            max_actuator_angle: 0.5,
        }
    }

    #[test]
    fn accepts_small_chord() {
        let cfg = IrisConfiguration::new(params()).unwrap();
        assert_abs_diff_eq!(cfg.chord_length(), 96.0 * 0.1f64.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(cfg.hole_diameter(), 3.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cfg.blade_angular_offset(5), PI, epsilon = 1e-12);
        assert!(cfg.contains_angle(0.25));
        assert!(!cfg.contains_angle(0.6));
    }

    #[test]
    fn rejects_chord_longer_than_pinned_radius() {
        let err = IrisConfiguration::new(IrisParams {
            subtended_angle: 2.0 * PI / 3.0,
            ..params()
        })
        .unwrap_err();
        match err {
            ConfigError::ChordExceedsPinnedRadius {
                chord,
                pinned_radius,
            } => {
                assert_abs_diff_eq!(chord, 83.138, epsilon = 1e-3);
                assert_eq!(pinned_radius, 50.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn assert_rejects(p: IrisParams, check: impl Fn(&ConfigError) -> bool) {
        let err = IrisConfiguration::new(p.clone()).unwrap_err();
        assert!(check(&err), "unexpected error {err:?} for {p:?}");
    }

    #[test]
    fn rejects_each_basic_constraint() {
        assert_rejects(
            IrisParams {
                blade_count: 2,
                ..params()
            },
            |e| matches!(e, ConfigError::TooFewBlades { count: 2 }),
        );
        assert_rejects(
            IrisParams {
                blade_radius: f64::NAN,
                ..params()
            },
            |e| matches!(e, ConfigError::NonFinite { field: "bladeRadius" }),
        );
        assert_rejects(
            IrisParams {
                pin_diameter: 0.0,
                ..params()
            },
            |e| matches!(e, ConfigError::NonPositive { field: "pinDiameter", .. }),
        );
        assert_rejects(
            IrisParams {
                clearance: -0.1,
                ..params()
            },
            |e| matches!(e, ConfigError::NegativeClearance { .. }),
        );
        assert_rejects(
            IrisParams {
                subtended_angle: PI,
                ..params()
            },
            |e| matches!(e, ConfigError::SubtendedAngleOutOfRange { .. }),
        );
        assert_rejects(
            IrisParams {
                blade_width: 48.0,
                ..params()
            },
            |e| matches!(e, ConfigError::BladeTooWide { .. }),
        );
        assert_rejects(
            IrisParams {
                min_actuator_angle: 0.5,
                max_actuator_angle: 0.5,
                ..params()
            },
            |e| matches!(e, ConfigError::EmptyActuatorRange { .. }),
        );
    }

    #[test]
    fn rejects_bound_that_only_works_by_clamping() {
        // chord == pinned radius: cos(alpha) hits exactly 1 at angle 0.
        let blade_radius = 48.0;
        let theta = 0.2;
        let chord = chord_length(blade_radius, theta);
        let err = IrisConfiguration::new(IrisParams {
            pinned_radius: chord,
            min_actuator_angle: 0.0,
            max_actuator_angle: 0.3,
            blade_width: 1.0,
            ..params()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::BoundaryInfeasible { angle, .. } if angle == 0.0));
    }

    #[test]
    fn deserializes_through_validation() {
        let yaml = "
bladeCount: 6
bladeRadius: 40
subtendedAngle: 0.5
bladeWidth: 4
pinDiameter: 2
pinnedRadius: 45
minActuatorAngle: 0.2
maxActuatorAngle: 0.9
";
        let cfg: IrisConfiguration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.blade_count(), 6);
        assert_eq!(cfg.clearance(), 0.0);

        let bad = yaml.replace("bladeCount: 6", "bladeCount: 2");
        let err = serde_yaml::from_str::<IrisConfiguration>(&bad).unwrap_err();
        assert!(err.to_string().contains("bladeCount must be at least 3"));
    }
}
