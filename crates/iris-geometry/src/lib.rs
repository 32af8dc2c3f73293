//! 2D geometry primitives for iris diaphragm layouts.

pub mod arc;
pub mod outline;
pub mod point;
pub mod primitives;

pub use arc::{ArcSegment, Circle};
pub use cavalier_contours::polyline::{PlineSource, PlineVertex, Polyline};
pub use point::Point2;

/// Relative tolerance used when deciding whether a geometric constraint holds "exactly".
pub const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("radius must be > 0 (got {radius})")]
    NonPositiveRadius { radius: f64 },
    #[error("chord is too long for radius {radius}: half chord is {half_chord}")]
    ChordTooLong { radius: f64, half_chord: f64 },
    #[error("{what} argument {value} is outside [-1, 1]")]
    Domain { what: &'static str, value: f64 },
    #[error("arc chain is not continuous at segment {index}")]
    OpenChain { index: usize },
}
