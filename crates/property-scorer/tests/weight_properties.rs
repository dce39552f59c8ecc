use std::collections::BTreeMap;

use property_scorer::scorecard::{
    compute_score, normalize, Aggregation, Metric, MetricOption, ScoreStatus, ScoringConfig,
    Selections,
};
use proptest::prelude::*;

fn rubric(weights: &[f64], values: &[f64], base_points: f64) -> ScoringConfig {
    ScoringConfig {
        aggregation: Aggregation {
            base_points,
            formula: None,
        },
        weights: None,
        metrics: weights
            .iter()
            .zip(values)
            .enumerate()
            .map(|(index, (weight, value))| {
                (
                    format!("metric_{index}"),
                    Metric::new(
                        format!("Metric {index}"),
                        *weight,
                        vec![
                            MetricOption::new("picked", "Picked", *value),
                            MetricOption::new("neutral", "Neutral", 1.0),
                        ],
                    ),
                )
            })
            .collect(),
    }
}

fn pick_all(config: &ScoringConfig, option_id: &str) -> Selections {
    config.metrics.keys().map(|id| (id, option_id)).collect()
}

proptest! {
    #[test]
    fn normalized_weights_sum_to_one(raw in prop::collection::btree_map("[a-z]{1,8}", 0.001f64..1000.0, 1..20)) {
        let normalized = normalize(&raw);
        let total: f64 = normalized.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "sum was {}", total);
        prop_assert_eq!(normalized.len(), raw.len());
    }

    #[test]
    fn all_zero_weights_are_returned_unchanged(keys in prop::collection::btree_set("[a-z]{1,8}", 0..10)) {
        let raw: BTreeMap<String, f64> = keys.into_iter().map(|key| (key, 0.0)).collect();
        prop_assert_eq!(normalize(&raw), raw);
    }

    #[test]
    fn neutral_selections_score_base_points(
        weights in prop::collection::vec(0.1f64..50.0, 1..12),
        base_points in 0.0f64..500.0,
    ) {
        let values = vec![1.0; weights.len()];
        let config = rubric(&weights, &values, base_points);
        let result = compute_score(&config, &pick_all(&config, "neutral"));

        prop_assert_eq!(result.product, 1.0);
        prop_assert!((result.score - base_points).abs() <= 0.005 + 1e-9);
        prop_assert_eq!(result.status, ScoreStatus::Ok);
    }

    #[test]
    fn scoring_is_idempotent(
        weights in prop::collection::vec(0.1f64..50.0, 1..12),
        values in prop::collection::vec(0.75f64..1.5, 12),
    ) {
        let config = rubric(&weights, &values, 50.0);
        let chosen = pick_all(&config, "picked");

        prop_assert_eq!(compute_score(&config, &chosen), compute_score(&config, &chosen));
    }

    #[test]
    fn product_stays_bounded_by_the_weight_budget(
        weights in prop::collection::vec(0.1f64..50.0, 1..12),
        values in prop::collection::vec(0.75f64..1.5, 12),
    ) {
        let config = rubric(&weights, &values, 50.0);
        let result = compute_score(&config, &pick_all(&config, "picked"));

        prop_assert!(result.product >= 0.75 - 1e-9, "product {}", result.product);
        // Each factor is at most 1 + w/2 and the weights sum to one, so the product is below e^0.5.
        prop_assert!(result.product <= 0.5f64.exp() + 1e-9, "product {}", result.product);
    }
}
