use property_scorer::config::AppConfig;
use property_scorer::error::AppError;
use property_scorer::scorecard::{
    parse_config, validate_config, JsonFileConfigStore, ScorecardError, ScorecardService,
    ScoringConfig,
};
use property_scorer::telemetry;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Resolved settings plus the service backed by the on-disk store.
pub(crate) struct AppContext {
    pub(crate) config: AppConfig,
    pub(crate) store: Arc<JsonFileConfigStore>,
    pub(crate) service: ScorecardService<JsonFileConfigStore>,
}

impl AppContext {
    pub(crate) fn init() -> Result<Self, AppError> {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;

        let store = Arc::new(config.storage.store());
        let service = ScorecardService::new(store.clone());
        debug!(
            environment = ?config.environment,
            path = %store.path().display(),
            "scorecard store ready"
        );

        Ok(Self {
            config,
            store,
            service,
        })
    }

    /// The rubric to score against: a file when one is given, otherwise the stored rubric.
    pub(crate) fn rubric(&self, path: Option<&Path>) -> Result<ScoringConfig, AppError> {
        match path {
            Some(path) => read_rubric(path, self),
            None => Ok(self.service.config()?),
        }
    }
}

pub(crate) fn read_rubric(path: &Path, context: &AppContext) -> Result<ScoringConfig, AppError> {
    let raw = fs::read_to_string(path)?;
    let rubric = parse_config(&raw)?;
    validate_config(&rubric, context.service.policy()).map_err(ScorecardError::from)?;
    debug!(path = %path.display(), metrics = rubric.metrics.len(), "loaded rubric file");
    Ok(rubric)
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}
