use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidLogLevel { directive: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidLogLevel { directive, .. } => write!(
                f,
                "APP_LOG_LEVEL '{directive}' is not a level or tracing directive"
            ),
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "a log subscriber is already installed for this process: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidLogLevel { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Which setting produced the active log filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FilterOrigin {
    RustLog,
    AppLogLevel,
}

/// A parseable `RUST_LOG` wins; otherwise `APP_LOG_LEVEL` must parse.
pub(crate) fn log_filter(
    config: &TelemetryConfig,
) -> Result<(EnvFilter, FilterOrigin), TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok((filter, FilterOrigin::RustLog));
    }

    let filter =
        EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::InvalidLogLevel {
            directive: config.log_level.clone(),
            source,
        })?;
    Ok((filter, FilterOrigin::AppLogLevel))
}

/// Installs the process-wide subscriber on stderr, leaving stdout to command output.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let (filter, origin) = log_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)?;

    tracing::debug!(?origin, "log filter installed");
    Ok(())
}
