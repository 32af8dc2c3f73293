//! Forward kinematics for a multi-blade iris diaphragm.
//!
//! Build an [`IrisConfiguration`] once, then call [`compute_iris_geometry`] for every actuator
//! angle of interest. Everything here is a pure function of its inputs.

pub mod aperture;
pub mod blade;
pub mod config;
pub mod error;
pub mod interchange;
pub mod motion;
pub mod plates;
pub mod solver;

use serde::Serialize;
use tracing::debug;

pub use aperture::{aperture_diameter, aperture_radius};
pub use blade::{Blade, BladeShape};
pub use config::{IrisConfiguration, IrisParams};
pub use error::{ConfigError, SolveError};
pub use interchange::{DesignRequest, DesignResponse};
pub use motion::Oscillation;
pub use plates::{
    DrivenTravel, HandleTab, PlatePattern, Slot, TabSize, actuator_ring, base_plate, driven_travel,
};

/// All blades of the iris at one actuator angle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrisGeometry {
    pub actuator_angle: f64,
    pub alpha: f64,
    /// The angle is inside the design envelope and needed no clamping.
    pub feasible: bool,
    pub blades: Vec<Blade>,
}

/// Solve every blade at `actuator_angle`.
///
/// Angles outside `[min, max]` are still solved; they only come back with `feasible == false`.
pub fn compute_iris_geometry(
    config: &IrisConfiguration,
    actuator_angle: f64,
) -> Result<IrisGeometry, SolveError> {
    let alpha = solver::solve_alpha(config, actuator_angle)?;
    let blades = solver::solve_blades(config, actuator_angle)?;
    let feasible =
        config.contains_angle(actuator_angle) && solver::cos_alpha(config, actuator_angle).abs() < 1.0;

    debug!(
        blade_count = blades.len(),
        actuator_angle,
        alpha,
        feasible,
        "solved iris geometry"
    );
    Ok(IrisGeometry {
        actuator_angle,
        alpha,
        feasible,
        blades,
    })
}
