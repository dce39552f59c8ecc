use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use super::domain::{ScoringConfig, WeightLayout};
use super::service::ScorecardError;

/// Allowed deviation from 1.0 when [`ValidationPolicy::require_unit_weight_sum`] is enabled.
pub const UNIT_WEIGHT_TOLERANCE: f64 = 0.01;

/// Rules a rubric must satisfy before it is stored or scored from user input.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationPolicy {
    pub option_value_range: RangeInclusive<f64>,
    /// Reject rubrics whose raw weights do not already sum to one.
    pub require_unit_weight_sum: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            option_value_range: 0.75..=1.5,
            require_unit_weight_sum: false,
        }
    }
}

/// Single problem found in a rubric, addressed by a JSON-pointer-like path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every issue found in a rubric, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("configuration failed validation with {} issue(s)", .issues.len())]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn mentions(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }
}

#[derive(Default)]
struct IssueCollector {
    issues: Vec<ValidationIssue>,
}

impl IssueCollector {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    fn finish(self) -> Result<(), ValidationReport> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport {
                issues: self.issues,
            })
        }
    }
}

/// Decodes a JSON rubric. Documents with the wrong shape fail here, before validation.
pub fn parse_config(json: &str) -> Result<ScoringConfig, ScorecardError> {
    serde_json::from_str(json).map_err(ScorecardError::Parse)
}

/// Checks a decoded rubric, collecting every issue instead of stopping at the first.
pub fn validate_config(
    config: &ScoringConfig,
    policy: &ValidationPolicy,
) -> Result<(), ValidationReport> {
    let mut issues = IssueCollector::default();

    let base_points = config.aggregation.base_points;
    if !base_points.is_finite() || base_points < 0.0 {
        issues.push(
            "/aggregation/basePoints",
            format!("must be a non-negative number, got {base_points}"),
        );
    }

    if config.metrics.is_empty() {
        issues.push("/metrics", "must define at least one metric");
    }

    let layout = config.weight_layout();
    for (metric_id, metric) in config.metrics.iter() {
        let metric_path = format!("/metrics/{metric_id}");

        if metric.label.trim().is_empty() {
            issues.push(format!("{metric_path}/label"), "must not be blank");
        }

        if layout == WeightLayout::Embedded {
            match metric.weight {
                Some(weight) => check_weight(&mut issues, format!("{metric_path}/weight"), weight),
                None => issues.push(format!("{metric_path}/weight"), "is required"),
            }
        }

        if metric.options.is_empty() {
            issues.push(format!("{metric_path}/options"), "must list at least one option");
        }

        let mut seen = BTreeSet::new();
        for (index, option) in metric.options.iter().enumerate() {
            let option_path = format!("{metric_path}/options/{index}");

            if option.id.trim().is_empty() {
                issues.push(format!("{option_path}/id"), "must not be blank");
            } else if !seen.insert(option.id.as_str()) {
                issues.push(
                    format!("{option_path}/id"),
                    format!("duplicates option id '{}'", option.id),
                );
            }

            if !option.value.is_finite() || !policy.option_value_range.contains(&option.value) {
                issues.push(
                    format!("{option_path}/value"),
                    format!(
                        "must be between {} and {}, got {}",
                        policy.option_value_range.start(),
                        policy.option_value_range.end(),
                        option.value
                    ),
                );
            }
        }
    }

    if let Some(weights) = &config.weights {
        for (metric_id, weight) in weights {
            let path = format!("/weights/{metric_id}");
            if config.metrics.contains_key(metric_id) {
                check_weight(&mut issues, path, *weight);
            } else {
                issues.push(path, "does not match any metric");
            }
        }
        for metric_id in config.metrics.keys() {
            if !weights.contains_key(metric_id) {
                issues.push(format!("/weights/{metric_id}"), "is required");
            }
        }
    }

    let total: f64 = config.raw_weights().values().sum();
    if total.is_finite() && !config.metrics.is_empty() {
        if total <= 0.0 {
            issues.push(weights_root(layout), "must sum to a positive value");
        } else if policy.require_unit_weight_sum && (total - 1.0).abs() > UNIT_WEIGHT_TOLERANCE {
            issues.push(
                weights_root(layout),
                format!("must sum to 1, got {total:.4}"),
            );
        }
    }

    issues.finish()
}

fn check_weight(issues: &mut IssueCollector, path: String, weight: f64) {
    if !weight.is_finite() || weight < 0.0 {
        issues.push(path, format!("must be a non-negative number, got {weight}"));
    }
}

fn weights_root(layout: WeightLayout) -> &'static str {
    match layout {
        WeightLayout::Embedded => "/metrics",
        WeightLayout::External => "/weights",
    }
}
