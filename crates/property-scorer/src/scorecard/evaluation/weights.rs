use serde::{Deserialize, Serialize};

use super::super::domain::{ScoringConfig, WeightMap};

/// Scales raw weights so they sum to one.
///
/// Zero and negative weights are summed as given. When the total is exactly zero the input is
/// returned unchanged so no NaN or infinity reaches the product.
pub fn normalize(weights: &WeightMap) -> WeightMap {
    let sum: f64 = weights.values().sum();
    if sum == 0.0 {
        return weights.clone();
    }

    weights
        .iter()
        .map(|(id, weight)| (id.clone(), weight / sum))
        .collect()
}

/// Normalized weights expressed as percentages rounded to two decimals, for display.
pub fn percentages(weights: &WeightMap) -> WeightMap {
    let sum: f64 = weights.values().sum();
    if sum == 0.0 {
        return weights.clone();
    }

    weights
        .iter()
        .map(|(id, weight)| (id.clone(), round_to_hundredths(weight / sum * 100.0)))
        .collect()
}

/// Rounds half up to two decimal places.
pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Display row pairing a metric's raw weight with its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightShare {
    pub metric_id: String,
    pub label: String,
    pub raw: f64,
    pub percentage: f64,
}

/// Weight shares in metric order. Weight-map entries without a metric are not listed.
pub fn weight_shares(config: &ScoringConfig) -> Vec<WeightShare> {
    let raw = config.raw_weights();
    let shares = percentages(&raw);

    config
        .metrics
        .iter()
        .map(|(id, metric)| WeightShare {
            metric_id: id.to_string(),
            label: metric.label.clone(),
            raw: raw.get(id).copied().unwrap_or(0.0),
            percentage: shares.get(id).copied().unwrap_or(0.0),
        })
        .collect()
}
