use super::common::*;
use crate::scorecard::defaults::default_config;
use crate::scorecard::domain::MetricOption;
use crate::scorecard::service::ScorecardError;
use crate::scorecard::validation::{parse_config, validate_config, ValidationPolicy};

#[test]
fn built_in_rubric_is_valid() {
    validate_config(&default_config(), &ValidationPolicy::default()).expect("defaults validate");
}

#[test]
fn both_weight_layouts_validate() {
    let policy = ValidationPolicy::default();
    validate_config(&two_metric_config(), &policy).expect("embedded layout validates");
    validate_config(&external_weight_config(), &policy).expect("external layout validates");
}

#[test]
fn collects_every_issue_with_paths() {
    let mut config = two_metric_config();
    config.aggregation.base_points = -5.0;
    let mut school = config.metric("school").cloned().expect("school metric");
    school.weight = None;
    school.options.push(MetricOption::new("great", "Duplicate", 1.1));
    school.options.push(MetricOption::new("mansion", "Mansion", 3.0));
    config.metrics.insert("school".to_string(), school);

    let report = validate_config(&config, &ValidationPolicy::default())
        .expect_err("invalid rubric rejected");

    assert!(report.mentions("/aggregation/basePoints"));
    assert!(report.mentions("/metrics/school/weight"));
    assert!(report.mentions("/metrics/school/options/3/id"));
    assert!(report.mentions("/metrics/school/options/4/value"));
    assert_eq!(report.issues.len(), 4);
}

#[test]
fn metrics_need_labels_and_options() {
    let mut config = two_metric_config();
    let mut commute = config.metric("commute").cloned().expect("commute metric");
    commute.label = "  ".to_string();
    commute.options.clear();
    config.metrics.insert("commute".to_string(), commute);

    let report = validate_config(&config, &ValidationPolicy::default())
        .expect_err("invalid rubric rejected");

    assert!(report.mentions("/metrics/commute/label"));
    assert!(report.mentions("/metrics/commute/options"));
}

#[test]
fn weight_map_must_match_metric_ids() {
    let mut config = external_weight_config();
    config.weights = Some(weights(&[("school", 1.0), ("garage", 2.0)]));

    let report = validate_config(&config, &ValidationPolicy::default())
        .expect_err("mismatched weight map rejected");

    assert!(report.mentions("/weights/garage"));
    assert!(report.mentions("/weights/commute"));
    assert!(!report.mentions("/weights/school"));
}

#[test]
fn negative_and_zero_total_weights_are_rejected() {
    let mut config = two_metric_config();
    for (_, metric) in config.metrics.iter_mut() {
        metric.weight = Some(0.0);
    }
    let report = validate_config(&config, &ValidationPolicy::default())
        .expect_err("zero total rejected");
    assert!(report.mentions("/metrics"));

    let mut config = external_weight_config();
    config.weights = Some(weights(&[("school", -1.0), ("commute", 2.0)]));
    let report = validate_config(&config, &ValidationPolicy::default())
        .expect_err("negative weight rejected");
    assert!(report.mentions("/weights/school"));
}

#[test]
fn unit_weight_sum_is_opt_in() {
    let strict = ValidationPolicy {
        require_unit_weight_sum: true,
        ..ValidationPolicy::default()
    };

    let report = validate_config(&external_weight_config(), &strict)
        .expect_err("weights summing to 6 rejected");
    assert!(report.mentions("/weights"));

    let mut config = external_weight_config();
    config.weights = Some(weights(&[("school", 0.6), ("commute", 0.405)]));
    validate_config(&config, &strict).expect("sum within tolerance");
}

#[test]
fn custom_value_range_is_honoured() {
    let mut config = two_metric_config();
    let mut school = config.metric("school").cloned().expect("school metric");
    school.options.push(MetricOption::new("mansion", "Mansion", 3.0));
    config.metrics.insert("school".to_string(), school);

    let lenient = ValidationPolicy {
        option_value_range: 0.5..=3.0,
        ..ValidationPolicy::default()
    };
    validate_config(&config, &lenient).expect("wider range accepts 3.0");
}

#[test]
fn parse_keeps_metric_order_and_both_layouts() {
    let json = r#"{
        "aggregation": { "basePoints": 50 },
        "weights": { "zoning": 2, "amenities": 1 },
        "metrics": {
            "zoning": {
                "label": "Zoning",
                "options": [
                    { "id": "good", "label": "Good", "value": 1.2, "default": true },
                    { "id": "bad", "label": "Bad", "value": 0.8, "gateFail": true }
                ]
            },
            "amenities": {
                "label": "Amenities",
                "options": [{ "id": "near", "label": "Near", "value": 1.1 }]
            }
        }
    }"#;

    let config = parse_config(json).expect("rubric parses");

    let ids: Vec<_> = config.metrics.keys().collect();
    assert_eq!(ids, vec!["zoning", "amenities"]);
    let zoning = config.metric("zoning").expect("zoning metric");
    assert!(zoning.options[0].default);
    assert!(zoning.options[1].gate_fail);
    assert_eq!(config.raw_weights()["zoning"], 2.0);
    validate_config(&config, &ValidationPolicy::default()).expect("parsed rubric validates");
}

#[test]
fn parse_rejects_wrong_shapes_and_duplicate_metrics() {
    let wrong_type = r#"{ "aggregation": { "basePoints": "fifty" }, "metrics": {} }"#;
    assert!(matches!(parse_config(wrong_type), Err(ScorecardError::Parse(_))));

    let duplicated = r#"{
        "aggregation": { "basePoints": 50 },
        "metrics": {
            "price": { "label": "Price", "weight": 1, "options": [] },
            "price": { "label": "Price again", "weight": 1, "options": [] }
        }
    }"#;
    match parse_config(duplicated) {
        Err(ScorecardError::Parse(err)) => {
            assert!(err.to_string().contains("duplicate metric id `price`"))
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn serialized_rubric_round_trips_in_order() {
    let config = default_config();
    let json = serde_json::to_string(&config).expect("rubric serializes");

    let reparsed = parse_config(&json).expect("rubric reparses");

    assert_eq!(reparsed, config);
    assert!(reparsed.metrics.keys().eq(config.metrics.keys()));
    assert!(json.find("primary_school") < json.find("indian_community"));
}
