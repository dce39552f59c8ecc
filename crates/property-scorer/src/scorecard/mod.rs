//! Property scorecard: rubric model, scoring engine, and the shell collaborators around it.
//!
//! The engine in [`evaluation`] is a pure function of a [`ScoringConfig`] snapshot and a
//! [`Selections`] snapshot. Everything else in this module loads, validates, stores, or presents
//! those snapshots without touching the scoring arithmetic.

pub mod defaults;
pub mod domain;
pub mod evaluation;
pub mod selection;
pub mod service;
pub mod store;
pub mod summary;
pub mod validation;

#[cfg(test)]
mod tests;

pub use defaults::default_config;
pub use domain::{
    Aggregation, Metric, MetricOption, MetricTable, ScoringConfig, Selections, WeightLayout,
    WeightMap,
};
pub use evaluation::{
    compute_score, normalize, percentages, weight_shares, GateFailure, ScoreContribution,
    ScoreEngine, ScoreResult, ScoreStatus, WeightShare,
};
pub use selection::{apply_overrides, initial_selections, SelectionOverride, SelectionOverrideError};
pub use service::{ScorecardError, ScorecardService};
pub use store::{ConfigStore, JsonFileConfigStore, StoreError};
pub use summary::{FailureView, ScorecardSummary, SelectedOptionView};
pub use validation::{
    parse_config, validate_config, ValidationIssue, ValidationPolicy, ValidationReport,
};
