use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use iris_mechanism::{IrisConfiguration, IrisParams, Oscillation, TabSize};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod error;
mod render;
mod report;

use error::{CliError, exit_code};

#[derive(Parser)]
#[command(name = "iris", version, about = "Iris diaphragm geometry: solve, preview, export", long_about = None)]
struct Cli {
    /// Log solver details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the blade geometry at one actuator angle as JSON
    Solve {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        pose: PoseArgs,
    },
    /// Write an SVG preview of the blades over the base plate and actuator ring
    Render {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        pose: PoseArgs,
        #[command(flatten)]
        tab: TabArgs,
        /// Viewport width in millimetres
        #[arg(long, default_value_t = 200.0)]
        width: f64,
        /// Viewport height in millimetres
        #[arg(long, default_value_t = 200.0)]
        height: f64,
        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,
    },
    /// Write DXF cut files for one blade, the base plate and the actuator ring
    Export {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        tab: TabArgs,
        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,
    },
    /// Print aperture diameter against actuator angle as JSON lines
    Sweep {
        #[command(flatten)]
        input: InputArgs,
        /// Number of evenly spaced angles, both bounds included
        #[arg(long, default_value_t = 16)]
        steps: usize,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Parameter file (YAML or JSON)
    #[arg(value_name = "PARAMS")]
    params: PathBuf,
}

/// Where the actuator sits: an explicit angle, or a moment in a ping-pong sweep of its range.
#[derive(Args)]
struct PoseArgs {
    /// Actuator angle in radians (default: minActuatorAngle)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "time")]
    angle: Option<f64>,
    /// Seconds into a min -> max -> min sweep that starts at minActuatorAngle
    #[arg(long, allow_negative_numbers = true)]
    time: Option<f64>,
    /// Sweep speed in radians per second, used with --time
    #[arg(long, default_value_t = 0.5, requires = "time")]
    speed: f64,
}

/// Handle tab on the plate edges (default: half the blade width each way).
#[derive(Args)]
struct TabArgs {
    /// Tab width in millimetres, measured as a chord of the outer edge
    #[arg(long)]
    tab_width: Option<f64>,
    /// How far the tab stands out from the outer edge, in millimetres
    #[arg(long)]
    tab_height: Option<f64>,
}

impl TabArgs {
    fn size(&self, config: &IrisConfiguration) -> TabSize {
        let default = TabSize::for_config(config);
        TabSize {
            width: self.tab_width.unwrap_or(default.width),
            height: self.tab_height.unwrap_or(default.height),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::from(error::ErrorCode::Usage as u8)
            } else {
                ExitCode::SUCCESS
            };
            // Help and version go to stdout, real usage errors to stderr.
            let _ = err.print();
            return code;
        }
    };

    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err) as u8)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Solve { input, pose } => {
            let config = load_config(&input.params)?;
            let angle = resolve_angle(&config, &pose)?;
            report::run_solve(&config, angle)
        }
        Command::Render {
            input,
            pose,
            tab,
            width,
            height,
            output,
        } => {
            let config = load_config(&input.params)?;
            let angle = resolve_angle(&config, &pose)?;
            render::run_render(&config, angle, tab.size(&config), width, height, &output)
        }
        Command::Export { input, tab, output } => {
            let config = load_config(&input.params)?;
            render::run_export(&config, tab.size(&config), &output)
        }
        Command::Sweep { input, steps } => {
            let config = load_config(&input.params)?;
            report::run_sweep(&config, steps)
        }
    }
}

fn load_config(path: &Path) -> Result<IrisConfiguration> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CliError::params(format!("Could not read {}: {e}", path.display())))?;
    // serde_yaml also accepts JSON documents.
    let params: IrisParams = serde_yaml::from_str(&raw)
        .map_err(|e| CliError::params(format!("Invalid parameter file {}: {e}", path.display())))?;
    let config = IrisConfiguration::new(params).map_err(CliError::from)?;
    debug!(
        blade_count = config.blade_count(),
        chord = config.chord_length(),
        "loaded configuration"
    );
    Ok(config)
}

fn resolve_angle(config: &IrisConfiguration, pose: &PoseArgs) -> Result<f64> {
    if let Some(time) = pose.time {
        if !(time.is_finite() && pose.speed.is_finite() && pose.speed > 0.0) {
            return Err(CliError::usage(format!(
                "--time must be finite and --speed positive (got {time} s at {} rad/s)",
                pose.speed
            ))
            .into());
        }
        let angle = Oscillation::for_config(config, pose.speed).angle_at(time);
        debug!(time, speed = pose.speed, angle, "actuator angle from sweep time");
        return Ok(angle);
    }

    let angle = pose.angle.unwrap_or(config.min_actuator_angle());
    if !angle.is_finite() {
        return Err(CliError::usage(format!("--angle must be finite (got {angle})")).into());
    }
    Ok(angle)
}
