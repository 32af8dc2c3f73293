use std::io::Write;

use anyhow::Result;
use iris_mechanism::{IrisConfiguration, aperture_diameter, compute_iris_geometry};
use serde::Serialize;

use crate::error::CliError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepSample {
    actuator_angle: f64,
    aperture_diameter: f64,
    feasible: bool,
}

pub fn run_solve(config: &IrisConfiguration, angle: f64) -> Result<()> {
    let geometry = compute_iris_geometry(config, angle).map_err(CliError::from)?;
    let json = serde_json::to_string_pretty(&geometry)
        .map_err(|e| CliError::output(format!("Could not encode geometry: {e}")))?;
    println!("{json}");
    Ok(())
}

pub fn run_sweep(config: &IrisConfiguration, steps: usize) -> Result<()> {
    if steps < 2 {
        return Err(CliError::usage(format!("--steps must be at least 2 (got {steps})")).into());
    }
    let min = config.min_actuator_angle();
    let span = config.max_actuator_angle() - min;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for step in 0..steps {
        let angle = min + span * step as f64 / (steps - 1) as f64;
        let geometry = compute_iris_geometry(config, angle).map_err(CliError::from)?;
        let sample = SweepSample {
            actuator_angle: angle,
            aperture_diameter: aperture_diameter(&geometry),
            feasible: geometry.feasible,
        };
        let line = serde_json::to_string(&sample)
            .map_err(|e| CliError::output(format!("Could not encode sweep sample: {e}")))?;
        writeln!(out, "{line}").map_err(|e| CliError::output(format!("Could not write stdout: {e}")))?;
    }
    Ok(())
}
