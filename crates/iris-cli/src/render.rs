use std::path::Path;

use anyhow::Result;
use iris_export::dxf::to_dxf_string;
use iris_export::svg::svg_document;
use iris_export::{DEFAULT_MARGIN, Drawing, Layout};
use iris_mechanism::{IrisConfiguration, TabSize, actuator_ring, base_plate, compute_iris_geometry};
use tracing::info;

use crate::error::CliError;

/// Preview in the actuator ring's frame: the ring sits still and the base plate turns by `-angle`,
/// so its holes stay under the fixed pivots.
pub fn run_render(
    config: &IrisConfiguration,
    angle: f64,
    tab: TabSize,
    width: f64,
    height: f64,
    output: &Path,
) -> Result<()> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(CliError::usage(format!(
            "--width and --height must be positive (got {width} x {height})"
        ))
        .into());
    }

    let geometry = compute_iris_geometry(config, angle).map_err(CliError::from)?;
    let base = base_plate(config, -angle, Some(tab)).map_err(CliError::from)?;
    let ring = actuator_ring(config, 0.0, Some(tab)).map_err(CliError::from)?;

    let mut drawing = Drawing::iris(&geometry);
    drawing.extend(Drawing::plate(&base));
    drawing.extend(Drawing::plate(&ring));

    let layout =
        Layout::fit(width, height, drawing.extent_radius(), DEFAULT_MARGIN).map_err(CliError::from)?;
    let svg = svg_document(&layout.apply_drawing(&drawing), width, height).map_err(CliError::from)?;

    write_output(output, "iris.svg", &svg)?;
    Ok(())
}

/// Cut files at rest (actuator at its minimum angle).
pub fn run_export(config: &IrisConfiguration, tab: TabSize, output: &Path) -> Result<()> {
    let rest = config.min_actuator_angle();
    let geometry = compute_iris_geometry(config, rest).map_err(CliError::from)?;
    let Some(blade) = geometry.blades.first() else {
        return Err(CliError::output("no blades to export").into());
    };

    let blade = Drawing::blade_profile(blade)
        .map_err(|e| CliError::output(format!("Could not outline blade: {e}")))?;
    let base = base_plate(config, 0.0, Some(tab)).map_err(CliError::from)?;
    let ring = actuator_ring(config, 0.0, Some(tab)).map_err(CliError::from)?;

    for (name, drawing) in [
        ("blade.dxf", blade),
        ("base_plate.dxf", Drawing::plate(&base)),
        ("actuator_ring.dxf", Drawing::plate(&ring)),
    ] {
        let dxf = to_dxf_string(&drawing).map_err(CliError::from)?;
        write_output(output, name, &dxf)?;
    }
    Ok(())
}

fn write_output(dir: &Path, name: &str, contents: &str) -> Result<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CliError::output(format!("Could not create {}: {e}", dir.display())))?;
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .map_err(|e| CliError::output(format!("Could not write {}: {e}", path.display())))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
