use iris_geometry::GeometryError;
use thiserror::Error;

/// A parameter set that cannot describe a working iris. Raised once, when the configuration is
/// built, so the solver never sees it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("bladeCount must be at least 3 (got {count})")]
    TooFewBlades { count: usize },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be > 0 (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("clearance must be >= 0 (got {value})")]
    NegativeClearance { value: f64 },

    #[error("subtendedAngle must lie strictly between 0 and π (got {value})")]
    SubtendedAngleOutOfRange { value: f64 },

    #[error("bladeWidth ({blade_width}) must be smaller than bladeRadius ({blade_radius})")]
    BladeTooWide { blade_width: f64, blade_radius: f64 },

    #[error("minActuatorAngle ({min}) must be smaller than maxActuatorAngle ({max})")]
    EmptyActuatorRange { min: f64, max: f64 },

    #[error("blade chord ({chord}) exceeds pinnedRadius ({pinned_radius})")]
    ChordExceedsPinnedRadius { chord: f64, pinned_radius: f64 },

    #[error("actuator angle {angle} puts cos(alpha) at {cos_alpha}, outside the open range (-1, 1)")]
    BoundaryInfeasible { angle: f64, cos_alpha: f64 },
}

/// Failure of a single solve. Any of these on a validated configuration points at a validation
/// gap, not a transient condition: the same input fails the same way every time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("actuator angle must be finite (got {angle})")]
    NonFiniteAngle { angle: f64 },

    #[error("{what} argument {value} is outside [-1, 1] beyond rounding tolerance")]
    Domain { what: &'static str, value: f64 },

    #[error("handle tab needs a positive, finite width and height (got {width} x {height})")]
    InvalidTab { width: f64, height: f64 },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
