use crate::config::ConfigError;
use crate::scorecard::{ScorecardError, SelectionOverrideError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Scorecard(ScorecardError),
    Selection(SelectionOverrideError),
}

impl AppError {
    /// Exit code for the command line: 2 for bad user input, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Selection(_) | AppError::Scorecard(ScorecardError::Parse(_)) => 2,
            AppError::Scorecard(ScorecardError::Validation(_)) => 2,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Scorecard(ScorecardError::Store(_)) => 1,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Scorecard(ScorecardError::Validation(report)) => {
                write!(f, "scorecard error: {}", report)?;
                for issue in &report.issues {
                    write!(f, "\n  - {}", issue)?;
                }
                Ok(())
            }
            AppError::Scorecard(err) => write!(f, "scorecard error: {}", err),
            AppError::Selection(err) => write!(f, "selection error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Scorecard(err) => Some(err),
            AppError::Selection(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ScorecardError> for AppError {
    fn from(value: ScorecardError) -> Self {
        Self::Scorecard(value)
    }
}

impl From<SelectionOverrideError> for AppError {
    fn from(value: SelectionOverrideError) -> Self {
        Self::Selection(value)
    }
}
