use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Weights keyed by metric id, raw or normalized depending on the producer.
pub type WeightMap = BTreeMap<String, f64>;

/// One selectable outcome for a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricOption {
    pub id: String,
    pub label: String,
    /// Multiplier applied to the product, weighted by the metric's normalized weight.
    pub value: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub gate_fail: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub default: bool,
}

impl MetricOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
            gate_fail: false,
            default: false,
        }
    }

    /// Marks the option as a deal breaker.
    pub fn gate_fail(mut self) -> Self {
        self.gate_fail = true;
        self
    }

    /// Marks the option as pre-selected when a scorecard is initialised.
    pub fn preselected(mut self) -> Self {
        self.default = true;
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single scored dimension with an ordered list of options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub options: Vec<MetricOption>,
}

impl Metric {
    pub fn new(label: impl Into<String>, weight: f64, options: Vec<MetricOption>) -> Self {
        Self {
            label: label.into(),
            weight: Some(weight),
            options,
        }
    }

    /// Looks up an option by id within this metric only.
    pub fn option(&self, option_id: &str) -> Option<&MetricOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

/// Metrics keyed by id, in the order they were defined.
///
/// The order drives iteration, failure ordering, and display.
pub type MetricTable = IndexMap<String, Metric>;

/// Decodes the metric table, rejecting a JSON object that repeats a metric id.
fn unique_metrics<'de, D>(deserializer: D) -> Result<MetricTable, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueMetrics;

    impl<'de> Visitor<'de> for UniqueMetrics {
        type Value = MetricTable;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping metric ids to metric definitions")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut metrics = MetricTable::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((id, metric)) = access.next_entry::<String, Metric>()? {
                if metrics.contains_key(&id) {
                    return Err(de::Error::custom(format_args!("duplicate metric id `{id}`")));
                }
                metrics.insert(id, metric);
            }
            Ok(metrics)
        }
    }

    deserializer.deserialize_map(UniqueMetrics)
}

/// Scale applied to the aggregated product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub base_points: f64,
    /// Human-readable description of the formula. Never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

/// Where a configuration keeps its raw metric weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightLayout {
    /// Each metric carries its own `weight` field.
    Embedded,
    /// A top-level `weights` map keyed by metric id.
    External,
}

impl WeightLayout {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Embedded => "per-metric weights",
            Self::External => "weight map",
        }
    }
}

/// Rubric describing how a property is scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub aggregation: Aggregation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightMap>,
    #[serde(deserialize_with = "unique_metrics")]
    pub metrics: MetricTable,
}

impl ScoringConfig {
    pub fn weight_layout(&self) -> WeightLayout {
        if self.weights.is_some() {
            WeightLayout::External
        } else {
            WeightLayout::Embedded
        }
    }

    /// Raw, unnormalized weights regardless of which layout the configuration uses.
    ///
    /// A top-level weight map is returned as given. Otherwise each metric contributes its own
    /// weight, with a missing weight read as zero.
    pub fn raw_weights(&self) -> WeightMap {
        match &self.weights {
            Some(weights) => weights.clone(),
            None => self
                .metrics
                .iter()
                .map(|(id, metric)| (id.to_string(), metric.weight.unwrap_or(0.0)))
                .collect(),
        }
    }

    /// Folds a top-level weight map into the metrics.
    ///
    /// Map entries without a matching metric are dropped and metrics missing from the map get a
    /// weight of zero.
    pub fn embed_weights(mut self) -> Self {
        if let Some(weights) = self.weights.take() {
            for (id, metric) in self.metrics.iter_mut() {
                metric.weight = Some(weights.get(id).copied().unwrap_or(0.0));
            }
        }
        self
    }

    pub fn metric(&self, id: &str) -> Option<&Metric> {
        self.metrics.get(id)
    }
}

/// Chosen option id per metric id.
///
/// Entries may be missing, or may name an option the metric does not have. The engine treats both
/// cases as "nothing selected" for that metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selections(BTreeMap<String, String>);

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a choice, returning the option id it replaced.
    pub fn choose(
        &mut self,
        metric_id: impl Into<String>,
        option_id: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(metric_id.into(), option_id.into())
    }

    pub fn clear(&mut self, metric_id: &str) -> Option<String> {
        self.0.remove(metric_id)
    }

    pub fn get(&self, metric_id: &str) -> Option<&str> {
        self.0.get(metric_id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(metric, option)| (metric.as_str(), option.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Selections
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(metric, option)| (metric.into(), option.into()))
                .collect(),
        )
    }
}
