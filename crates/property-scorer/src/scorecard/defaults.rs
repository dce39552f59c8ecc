use super::domain::{Aggregation, Metric, MetricOption, MetricTable, ScoringConfig};

pub const DEFAULT_BASE_POINTS: f64 = 50.0;
pub const DEFAULT_FORMULA: &str = "Final = basePoints * product(1 + (m_i - 1) * w_i)";

/// Built-in rubric used until the user stores their own.
pub fn default_config() -> ScoringConfig {
    ScoringConfig {
        aggregation: Aggregation {
            base_points: DEFAULT_BASE_POINTS,
            formula: Some(DEFAULT_FORMULA.to_string()),
        },
        weights: None,
        metrics: default_metrics(),
    }
}

fn opt(id: &str, label: &str, value: f64) -> MetricOption {
    MetricOption::new(id, label, value)
}

fn default_metrics() -> MetricTable {
    [
        (
            "primary_school",
            Metric::new(
                "Primary School in Zone",
                7.0,
                vec![
                    opt("4_star", "4★ rating", 1.5),
                    opt("3_star", "3★ rating", 1.0).preselected(),
                    opt("2_star", "2★ rating", 0.75).gate_fail(),
                ],
            ),
        ),
        (
            "public_transport",
            Metric::new(
                "Public Transport with Parking",
                5.0,
                vec![
                    opt("within_suburb_10m", "Within suburb or ≤ 10 min", 1.5),
                    opt("neighbour_20m", "Neighbour suburbs or ≤ 20 min", 1.0).preselected(),
                    opt("none_20m", "No public transport within 20 min", 0.75).gate_fail(),
                ],
            ),
        ),
        (
            "house_quality",
            Metric::new(
                "House Quality",
                4.0,
                vec![
                    opt("brand_new", "Brand New", 1.5),
                    opt("within_8_years", "Within 8 years old", 1.0).preselected(),
                    opt("8_15_years", "8-15 years old", 0.8),
                    opt("over_15_years", "More than 15 years old", 0.75).gate_fail(),
                ],
            ),
        ),
        (
            "property_price",
            Metric::new(
                "Property Price",
                5.0,
                vec![
                    opt("below_budget", "Below Budget", 1.5),
                    opt("within_budget", "Within Budget", 1.0).preselected(),
                    opt("above_budget", "Far Above the Budget", 0.8).gate_fail(),
                ],
            ),
        ),
        (
            "family_proximity",
            Metric::new(
                "Close to Family",
                3.0,
                vec![
                    opt("within_30m", "Within 30 mins", 1.5),
                    opt("within_1h", "Within 1 hour", 1.0).preselected(),
                    opt("within_2h", "Within 2 hours", 0.8),
                    opt("over_2h", "More than 2 hours", 0.75).gate_fail(),
                ],
            ),
        ),
        (
            "supermarket",
            Metric::new(
                "Supermarket (Coles/Aldi/IGA/Woolworths)",
                3.0,
                vec![
                    opt("within_5m", "Within 5 mins", 1.25),
                    opt("within_15m", "Within 15 mins", 1.0).preselected(),
                    opt("over_20m", "More than 20 mins", 0.8).gate_fail(),
                ],
            ),
        ),
        (
            "indian_groceries",
            Metric::new(
                "Indian Groceries",
                3.0,
                vec![
                    opt("within_15m", "Within 15 mins", 1.5),
                    opt("within_30m", "Within 30 mins", 1.0).preselected(),
                    opt("over_45m", "More than 45 mins", 0.8).gate_fail(),
                ],
            ),
        ),
        (
            "safety_environment",
            Metric::new(
                "Safety & Environment",
                3.0,
                vec![
                    opt("very_safe", "Very Safe", 1.2),
                    opt("safe", "Safe", 1.0).preselected(),
                    opt("not_safe", "Not Safe", 0.8).gate_fail(),
                ],
            ),
        ),
        (
            "health_services",
            Metric::new(
                "Health & Services",
                3.0,
                vec![
                    opt("within_10m", "Within 10 mins", 1.5),
                    opt("within_20m", "Within 20 mins", 1.0).preselected(),
                    opt("over_30m", "More than 30 mins", 0.8).gate_fail(),
                ],
            ),
        ),
        (
            "amenities",
            Metric::new(
                "Amenities (Shopping Malls, Pools, Recreation)",
                3.0,
                vec![
                    opt("within_15m", "Within 15 mins", 1.5),
                    opt("within_30m", "Within 30 mins", 1.0).preselected(),
                    opt("over_45m", "More than 45 mins", 0.8).gate_fail(),
                ],
            ),
        ),
        (
            "stores",
            Metric::new(
                "Stores (OfficeWorks, Bunnings, JB HiFi, Costco)",
                2.0,
                vec![
                    opt("within_20m", "Within 20 mins", 1.2),
                    opt("within_30m", "Within 30 mins", 1.0).preselected(),
                    opt("over_1h", "More than 1 hour", 0.8).gate_fail(),
                ],
            ),
        ),
        (
            "indian_restaurants",
            Metric::new(
                "Indian Restaurants",
                3.0,
                vec![
                    opt("within_15m", "Within 15 mins", 1.3),
                    opt("within_30m", "Within 30 mins", 1.0).preselected(),
                    opt("over_45m", "More than 45 mins", 0.8).gate_fail(),
                ],
            ),
        ),
        (
            "hindu_temples",
            Metric::new(
                "Hindu Temples",
                3.0,
                vec![
                    opt("within_15m", "Within 15 mins", 1.25),
                    opt("within_30m", "Within 30 mins", 1.0).preselected(),
                    opt("over_1h", "More than 1 hour", 0.75),
                ],
            ),
        ),
        (
            "private_schools",
            Metric::new(
                "Private Schools",
                2.0,
                vec![
                    opt("within_20m", "Within 20 mins", 1.2),
                    opt("within_30m", "Within 30 mins", 1.0).preselected(),
                    opt("over_30m", "More than 30 mins", 0.8),
                ],
            ),
        ),
        (
            "indian_community",
            Metric::new(
                "Indian Community",
                2.0,
                vec![
                    opt("decent", "Decent", 1.5),
                    opt("very_high", "Very High", 1.0).preselected(),
                    opt("very_low", "Very Low or No Community", 0.8).gate_fail(),
                ],
            ),
        ),
    ]
    .into_iter()
    .map(|(id, metric)| (id.to_string(), metric))
    .collect()
}
