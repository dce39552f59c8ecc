mod rules;
pub mod weights;

pub use weights::{normalize, percentages, weight_shares, WeightShare};

use std::fmt;

use super::domain::{ScoringConfig, Selections};
use serde::{Deserialize, Serialize};
use weights::round_to_hundredths;

/// Stateless evaluator that applies a rubric to a set of selections.
///
/// Weights are normalized on every call; nothing is cached between evaluations.
pub struct ScoreEngine<'a> {
    config: &'a ScoringConfig,
}

impl<'a> ScoreEngine<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, selections: &Selections) -> ScoreResult {
        let normalized_weights = normalize(&self.config.raw_weights());
        let walk = rules::walk_metrics(self.config, selections, &normalized_weights);

        let score = round_to_hundredths(self.config.aggregation.base_points * walk.product);
        let status = if walk.failures.is_empty() {
            ScoreStatus::Ok
        } else {
            ScoreStatus::GateFail
        };

        ScoreResult {
            status,
            score,
            product: walk.product,
            failures: walk.failures,
            contributions: walk.contributions,
        }
    }
}

/// Scores `selections` against `config`. Never fails: unresolvable selections are skipped.
pub fn compute_score(config: &ScoringConfig, selections: &Selections) -> ScoreResult {
    ScoreEngine::new(config).score(selections)
}

/// Pass/fail outcome of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "GATEFAIL")]
    GateFail,
}

impl ScoreStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::GateFail => "GATEFAIL",
        }
    }
}

impl fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deal breaker triggered by a selected option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateFailure {
    pub metric_id: String,
    /// Label of the offending option.
    pub reason: String,
}

/// Audit entry for one metric that took part in the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreContribution {
    pub metric_id: String,
    pub option_id: String,
    pub multiplier: f64,
    /// Normalized weight of the metric.
    pub weight: f64,
    /// `1 + (multiplier - 1) * weight`
    pub factor: f64,
}

/// Evaluation output. Built fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub status: ScoreStatus,
    pub score: f64,
    pub product: f64,
    pub failures: Vec<GateFailure>,
    #[serde(default)]
    pub contributions: Vec<ScoreContribution>,
}

impl ScoreResult {
    pub fn passed(&self) -> bool {
        self.status == ScoreStatus::Ok
    }
}
