use std::str::FromStr;

use super::domain::{Metric, MetricOption, ScoringConfig, Selections};

/// Starting selections for a fresh scorecard.
///
/// Each metric starts on its option flagged `default`, falling back to the first option that is
/// not a deal breaker. Metrics with neither are left unselected.
pub fn initial_selections(config: &ScoringConfig) -> Selections {
    config
        .metrics
        .iter()
        .filter_map(|(metric_id, metric)| {
            starting_option(metric).map(|option| (metric_id, option.id.as_str()))
        })
        .collect()
}

pub fn starting_option(metric: &Metric) -> Option<&MetricOption> {
    metric
        .options
        .iter()
        .find(|option| option.default)
        .or_else(|| metric.options.iter().find(|option| !option.gate_fail))
}

/// A `metric=option` pair supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOverride {
    pub metric_id: String,
    pub option_id: String,
}

impl FromStr for SelectionOverride {
    type Err = SelectionOverrideError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (metric_id, option_id) = raw
            .split_once('=')
            .map(|(metric, option)| (metric.trim(), option.trim()))
            .filter(|(metric, option)| !metric.is_empty() && !option.is_empty())
            .ok_or_else(|| SelectionOverrideError::Malformed(raw.to_string()))?;

        Ok(Self {
            metric_id: metric_id.to_string(),
            option_id: option_id.to_string(),
        })
    }
}

/// Rejected user selection. The engine itself ignores unknown ids; the shell reports them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionOverrideError {
    #[error("selection '{0}' must look like METRIC=OPTION")]
    Malformed(String),
    #[error("unknown metric '{0}'")]
    UnknownMetric(String),
    #[error("metric '{metric_id}' has no option '{option_id}' (expected one of: {available})")]
    UnknownOption {
        metric_id: String,
        option_id: String,
        available: String,
    },
}

/// Layers user overrides on top of `base`, checking each against the rubric.
pub fn apply_overrides(
    config: &ScoringConfig,
    base: Selections,
    overrides: &[SelectionOverride],
) -> Result<Selections, SelectionOverrideError> {
    let mut selections = base;

    for SelectionOverride {
        metric_id,
        option_id,
    } in overrides
    {
        let metric = config
            .metric(metric_id)
            .ok_or_else(|| SelectionOverrideError::UnknownMetric(metric_id.clone()))?;

        if metric.option(option_id).is_none() {
            let available = metric
                .options
                .iter()
                .map(|option| option.id.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(SelectionOverrideError::UnknownOption {
                metric_id: metric_id.clone(),
                option_id: option_id.clone(),
                available,
            });
        }

        selections.choose(metric_id.as_str(), option_id.as_str());
    }

    Ok(selections)
}
