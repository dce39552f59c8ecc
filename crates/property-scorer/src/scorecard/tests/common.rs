use std::sync::{Arc, Mutex};

use crate::scorecard::domain::{
    Aggregation, Metric, MetricOption, MetricTable, ScoringConfig, Selections, WeightMap,
};
use crate::scorecard::service::ScorecardService;
use crate::scorecard::store::{ConfigStore, StoreError};

/// Two metrics of equal weight: `school` and `commute`, base points 50.
pub(super) fn two_metric_config() -> ScoringConfig {
    ScoringConfig {
        aggregation: Aggregation {
            base_points: 50.0,
            formula: None,
        },
        weights: None,
        metrics: [
            (
                "school",
                Metric::new(
                    "Primary School",
                    1.0,
                    vec![
                        MetricOption::new("great", "Great school", 1.5),
                        MetricOption::new("average", "Average school", 1.0).preselected(),
                        MetricOption::new("poor", "Poor school", 0.75),
                    ],
                ),
            ),
            (
                "commute",
                Metric::new(
                    "Commute",
                    1.0,
                    vec![
                        MetricOption::new("short", "Under 20 min", 1.5),
                        MetricOption::new("ok", "20-40 min", 1.0),
                        MetricOption::new("long", "Over an hour", 0.75),
                    ],
                ),
            ),
        ]
        .into_iter()
        .map(|(id, metric)| (id.to_string(), metric))
        .collect(),
    }
}

/// Same rubric as [`two_metric_config`] with the long commute flagged as a deal breaker.
pub(super) fn gated_config() -> ScoringConfig {
    let mut config = two_metric_config();
    let mut commute = config.metric("commute").cloned().expect("commute metric");
    commute.options[2] = MetricOption::new("long", "Over an hour", 0.75).gate_fail();
    config.metrics.insert("commute".to_string(), commute);
    config
}

/// Same rubric as [`two_metric_config`], expressed with a top-level weight map.
pub(super) fn external_weight_config() -> ScoringConfig {
    let mut config = two_metric_config();
    let metrics: MetricTable = config
        .metrics
        .iter()
        .map(|(id, metric)| {
            let mut metric = metric.clone();
            metric.weight = None;
            (id.to_string(), metric)
        })
        .collect();
    config.metrics = metrics;
    config.weights = Some(weights(&[("school", 3.0), ("commute", 3.0)]));
    config
}

pub(super) fn weights(entries: &[(&str, f64)]) -> WeightMap {
    entries
        .iter()
        .map(|(id, weight)| (id.to_string(), *weight))
        .collect()
}

pub(super) fn selections(entries: &[(&str, &str)]) -> Selections {
    entries.iter().copied().collect()
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[derive(Default)]
pub(super) struct InMemoryConfigStore {
    slot: Mutex<Option<ScoringConfig>>,
    saves: Mutex<usize>,
}

impl InMemoryConfigStore {
    pub(super) fn holding(config: ScoringConfig) -> Self {
        Self {
            slot: Mutex::new(Some(config)),
            saves: Mutex::new(0),
        }
    }

    pub(super) fn stored(&self) -> Option<ScoringConfig> {
        self.slot.lock().expect("store mutex poisoned").clone()
    }

    pub(super) fn save_count(&self) -> usize {
        *self.saves.lock().expect("store mutex poisoned")
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load(&self) -> Result<Option<ScoringConfig>, StoreError> {
        Ok(self.stored())
    }

    fn save(&self, config: &ScoringConfig) -> Result<(), StoreError> {
        *self.slot.lock().expect("store mutex poisoned") = Some(config.clone());
        *self.saves.lock().expect("store mutex poisoned") += 1;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().expect("store mutex poisoned") = None;
        Ok(())
    }
}

pub(super) fn service_with(
    store: InMemoryConfigStore,
) -> (
    ScorecardService<InMemoryConfigStore>,
    Arc<InMemoryConfigStore>,
) {
    let store = Arc::new(store);
    (ScorecardService::new(store.clone()), store)
}
