use std::sync::Arc;

use tracing::{debug, info, warn};

use super::defaults::default_config;
use super::domain::{ScoringConfig, Selections};
use super::evaluation::{weight_shares, ScoreEngine, ScoreResult, WeightShare};
use super::selection::initial_selections;
use super::store::{ConfigStore, StoreError};
use super::summary::ScorecardSummary;
use super::validation::{parse_config, validate_config, ValidationPolicy, ValidationReport};

/// Service composing the configuration store, the validator, and the scoring engine.
///
/// Every call works on a fresh configuration snapshot read from the store; the service holds no
/// mutable state of its own.
pub struct ScorecardService<S> {
    store: Arc<S>,
    policy: ValidationPolicy,
}

impl<S> ScorecardService<S>
where
    S: ConfigStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, ValidationPolicy::default())
    }

    pub fn with_policy(store: Arc<S>, policy: ValidationPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// The stored rubric, or the built-in defaults when nothing has been saved.
    ///
    /// A stored rubric is validated again on load. An invalid one is an error, never a silent
    /// fallback to the defaults.
    pub fn config(&self) -> Result<ScoringConfig, ScorecardError> {
        match self.store.load()? {
            Some(config) => {
                if let Err(report) = validate_config(&config, &self.policy) {
                    warn!(
                        issues = report.issues.len(),
                        "stored scoring configuration failed validation"
                    );
                    return Err(report.into());
                }
                Ok(config)
            }
            None => {
                debug!("no stored configuration, using built-in defaults");
                Ok(default_config())
            }
        }
    }

    /// Validate and persist a rubric. Nothing is stored when validation fails.
    pub fn save_config(&self, config: ScoringConfig) -> Result<ScoringConfig, ScorecardError> {
        validate_config(&config, &self.policy)?;
        self.store.save(&config)?;

        info!(
            metrics = config.metrics.len(),
            layout = config.weight_layout().label(),
            "stored scoring configuration"
        );
        Ok(config)
    }

    /// Decode a JSON rubric and save it.
    pub fn import_config(&self, json: &str) -> Result<ScoringConfig, ScorecardError> {
        let config = parse_config(json)?;
        self.save_config(config)
    }

    /// Drop the stored rubric, returning the defaults now in effect.
    pub fn reset_config(&self) -> Result<ScoringConfig, ScorecardError> {
        self.store.clear()?;
        info!("cleared stored scoring configuration");
        Ok(default_config())
    }

    pub fn initial_selections(&self) -> Result<Selections, ScorecardError> {
        let config = self.config()?;
        Ok(initial_selections(&config))
    }

    pub fn weight_percentages(&self) -> Result<Vec<WeightShare>, ScorecardError> {
        let config = self.config()?;
        Ok(weight_shares(&config))
    }

    pub fn evaluate(&self, selections: &Selections) -> Result<ScoreResult, ScorecardError> {
        let config = self.config()?;
        let result = ScoreEngine::new(&config).score(selections);

        debug!(
            status = %result.status,
            score = result.score,
            failures = result.failures.len(),
            "evaluated scorecard"
        );
        Ok(result)
    }

    /// Evaluate and build the shareable summary in one snapshot.
    pub fn summarize(
        &self,
        property_title: &str,
        selections: &Selections,
    ) -> Result<(ScoreResult, ScorecardSummary), ScorecardError> {
        let config = self.config()?;
        let result = ScoreEngine::new(&config).score(selections);
        let summary = ScorecardSummary::build(property_title, &config, selections, &result);
        Ok((result, summary))
    }
}

/// Error raised by the scorecard service.
#[derive(Debug, thiserror::Error)]
pub enum ScorecardError {
    #[error("configuration is not a well-formed rubric: {0}")]
    Parse(#[source] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationReport),
    #[error(transparent)]
    Store(#[from] StoreError),
}
