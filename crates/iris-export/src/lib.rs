//! Output side of the iris engine: viewport layout, a format-neutral entity list, and the DXF/SVG
//! writers that consume it.

pub mod drawing;
pub mod dxf;
pub mod layout;
pub mod svg;

pub use drawing::{Drawing, Entity, LwPolyline};
pub use layout::{DEFAULT_MARGIN, Layout};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("non-finite value for {what}")]
    NonFinite { what: &'static str },
    #[error("nothing to export: drawing has no entities")]
    Empty,
    #[error("viewport {width}x{height} with extent {extent} cannot be fitted")]
    InvalidViewport { width: f64, height: f64, extent: f64 },
}
