use std::fmt;

use iris_export::ExportError;
use iris_mechanism::{ConfigError, SolveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Flags the iris commands cannot act on: a non-finite angle or time, an empty viewport, a
    /// sweep with fewer than two steps.
    Usage = 1,
    /// Parameter file missing, unparsable, or describing an iris that cannot move.
    Params = 2,
    /// Geometry that could not be solved or drawn, or an output file that could not be written.
    Output = 3,
}

#[derive(Debug)]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Usage,
            message: message.into(),
        }
    }

    pub fn params(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Params,
            message: message.into(),
        }
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Output,
            message: message.into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::params(format!("Invalid iris parameters: {err}"))
    }
}

impl From<SolveError> for CliError {
    fn from(err: SolveError) -> Self {
        Self::output(format!("Could not solve iris geometry: {err}"))
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        Self::output(format!("Could not draw iris geometry: {err}"))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Exit code for an error bubbled up to `main`. Anything not tagged with a [`CliError`] counts as
/// an output failure.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>()
        .map_or(ErrorCode::Output, |e| e.code) as i32
}
