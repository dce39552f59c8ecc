use std::fmt;

use serde::Serialize;

use super::domain::{ScoringConfig, Selections};
use super::evaluation::{ScoreResult, ScoreStatus};

const UNNAMED_PROPERTY: &str = "Unnamed Property";
const UNKNOWN_METRIC: &str = "Unknown";

/// Shareable summary of an evaluated property. `Display` renders the plain-text export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardSummary {
    pub property_title: String,
    pub status: ScoreStatus,
    pub score: f64,
    pub selections: Vec<SelectedOptionView>,
    pub deal_breakers: Vec<FailureView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOptionView {
    pub metric_id: String,
    pub metric_label: String,
    pub option_label: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureView {
    pub metric_id: String,
    pub metric_label: String,
    pub reason: String,
}

impl ScorecardSummary {
    /// Resolves ids to labels. Selections that do not resolve to an option are left out.
    pub fn build(
        property_title: &str,
        config: &ScoringConfig,
        selections: &Selections,
        result: &ScoreResult,
    ) -> Self {
        let property_title = match property_title.trim() {
            "" => UNNAMED_PROPERTY.to_string(),
            title => title.to_string(),
        };

        let selections = config
            .metrics
            .iter()
            .filter_map(|(metric_id, metric)| {
                let option = selections
                    .get(metric_id)
                    .and_then(|option_id| metric.option(option_id))?;
                Some(SelectedOptionView {
                    metric_id: metric_id.to_string(),
                    metric_label: metric.label.clone(),
                    option_label: option.label.clone(),
                    multiplier: option.value,
                })
            })
            .collect();

        let deal_breakers = result
            .failures
            .iter()
            .map(|failure| FailureView {
                metric_id: failure.metric_id.clone(),
                metric_label: config
                    .metric(&failure.metric_id)
                    .map(|metric| metric.label.clone())
                    .unwrap_or_else(|| UNKNOWN_METRIC.to_string()),
                reason: failure.reason.clone(),
            })
            .collect();

        Self {
            property_title,
            status: result.status,
            score: result.score,
            selections,
            deal_breakers,
        }
    }
}

impl fmt::Display for ScorecardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Property: {}", self.property_title)?;
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Final Score: {}", self.score)?;
        writeln!(f)?;
        write!(f, "Selections:")?;
        for selected in &self.selections {
            write!(
                f,
                "\n{}: {} ({}×)",
                selected.metric_label, selected.option_label, selected.multiplier
            )?;
        }

        if !self.deal_breakers.is_empty() {
            write!(f, "\n\nDeal Breakers:")?;
            for failure in &self.deal_breakers {
                write!(f, "\n- {}: {}", failure.metric_label, failure.reason)?;
            }
        }

        Ok(())
    }
}
