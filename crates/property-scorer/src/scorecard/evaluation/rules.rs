use super::super::domain::{ScoringConfig, Selections, WeightMap};
use super::{GateFailure, ScoreContribution};

pub(crate) struct MetricWalk {
    pub product: f64,
    pub failures: Vec<GateFailure>,
    pub contributions: Vec<ScoreContribution>,
}

/// Folds every resolvable selection into the product, in metric order.
///
/// Options are resolved against the metric's own option list, so an id that only exists on
/// another metric is no match.
pub(crate) fn walk_metrics(
    config: &ScoringConfig,
    selections: &Selections,
    normalized_weights: &WeightMap,
) -> MetricWalk {
    let mut product = 1.0;
    let mut failures = Vec::new();
    let mut contributions = Vec::new();

    for (metric_id, metric) in config.metrics.iter() {
        let Some(option) = selections
            .get(metric_id)
            .and_then(|option_id| metric.option(option_id))
        else {
            continue;
        };

        if option.gate_fail {
            failures.push(GateFailure {
                metric_id: metric_id.to_string(),
                reason: option.label.clone(),
            });
        }

        let weight = normalized_weights.get(metric_id).copied().unwrap_or(0.0);
        let factor = 1.0 + (option.value - 1.0) * weight;
        product *= factor;

        contributions.push(ScoreContribution {
            metric_id: metric_id.to_string(),
            option_id: option.id.clone(),
            multiplier: option.value,
            weight,
            factor,
        });
    }

    MetricWalk {
        product,
        failures,
        contributions,
    }
}
