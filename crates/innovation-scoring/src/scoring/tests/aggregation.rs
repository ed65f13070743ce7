use super::common::*;
use crate::scoring::{
    compute_composite, compute_overall, AdjustedField, Criterion, ScoreAggregator,
    ValidationError,
};
use std::collections::BTreeMap;

#[test]
fn composite_weights_business_value_scenario() {
    let composite = compute_composite("impact", &impact_criteria()).expect("composite computes");

    assert_eq!(composite.name, "impact");
    assert_eq!(composite.score, 87);
    assert!(!composite.was_clamped());
}

#[test]
fn empty_composite_scores_zero() {
    let composite = compute_composite("impact", &[]).expect("empty composite is valid");
    assert_eq!(composite.score, 0);
    assert_eq!(composite.exact_score, 0.0);
}

#[test]
fn all_zero_weights_score_zero() {
    let criteria = vec![
        criterion("Business Value", 9.0, 10.0, 0.0),
        criterion("Alignment", 8.0, 10.0, 0.0),
    ];
    let composite = compute_composite("impact", &criteria).expect("composite computes");
    assert_eq!(composite.score, 0);
}

#[test]
fn single_criterion_scores_its_clamped_ratio() {
    let composite = compute_composite("feasibility", &[criterion("Effort", 15.0, 20.0, 5.0)])
        .expect("composite computes");
    assert_eq!(composite.score, 75);
}

#[test]
fn weights_are_renormalized_when_they_do_not_sum_to_100() {
    let criteria = vec![
        criterion("Business Value", 10.0, 10.0, 1.0),
        criterion("Alignment", 0.0, 10.0, 1.0),
    ];
    let composite = compute_composite("impact", &criteria).expect("composite computes");
    assert_eq!(composite.score, 50);
}

#[test]
fn huge_weights_score_like_their_proportions() {
    let modest = vec![
        criterion("Business Value", 9.0, 10.0, 40.0),
        criterion("Alignment", 8.0, 10.0, 60.0),
    ];
    let huge = vec![
        criterion("Business Value", 9.0, 10.0, 4e306),
        criterion("Alignment", 8.0, 10.0, 6e306),
    ];

    let modest = compute_composite("impact", &modest).expect("composite computes");
    let huge = compute_composite("impact", &huge).expect("composite computes");

    assert_eq!(modest.score, 84);
    assert_eq!(huge.score, 84);
    assert!(huge.exact_score.is_finite());
    assert!(!huge.was_clamped());
}

#[test]
fn infinite_weight_counts_as_zero_and_is_reported() {
    let criteria = vec![
        criterion("Business Value", 10.0, 10.0, f64::INFINITY),
        criterion("Alignment", 4.0, 10.0, 50.0),
    ];

    let composite = compute_composite("impact", &criteria).expect("composite computes");

    assert_eq!(composite.score, 40);
    assert_eq!(composite.adjustments.len(), 1);
    assert_eq!(composite.adjustments[0].field, AdjustedField::Weight);
    assert_eq!(composite.adjustments[0].applied, 0.0);
}

#[test]
fn out_of_range_values_are_clamped_and_reported() {
    let criteria = vec![
        criterion("Business Value", 14.0, 10.0, 50.0),
        criterion("Alignment", -2.0, 10.0, 50.0),
    ];

    let composite = compute_composite("impact", &criteria).expect("composite computes");

    assert_eq!(composite.score, 50);
    assert!(composite.was_clamped());
    assert_eq!(composite.adjustments.len(), 2);
    assert!(composite
        .adjustments
        .iter()
        .all(|adjustment| adjustment.field == AdjustedField::RawValue));
}

#[test]
fn rounding_is_half_to_even_on_the_final_score() {
    let below_half = vec![
        criterion("A", 1.0, 8.0, 50.0),
        criterion("B", 0.0, 8.0, 50.0),
    ];
    let composite = compute_composite("x", &below_half).expect("composite computes");
    assert_eq!(composite.exact_score, 6.25);
    assert_eq!(composite.score, 6);

    let tie_to_even = vec![
        criterion("A", 10.0, 10.0, 1.0),
        criterion("B", 0.0, 10.0, 39.0),
    ];
    let composite = compute_composite("x", &tie_to_even).expect("composite computes");
    assert_eq!(composite.exact_score, 2.5);
    assert_eq!(composite.score, 2);

    let tie_to_odd_up = vec![
        criterion("A", 10.0, 10.0, 7.0),
        criterion("B", 0.0, 10.0, 193.0),
    ];
    let composite = compute_composite("x", &tie_to_odd_up).expect("composite computes");
    assert_eq!(composite.exact_score, 3.5);
    assert_eq!(composite.score, 4);
}

#[test]
fn zero_max_value_is_a_validation_error() {
    let broken = Criterion {
        label: "Business Value".to_string(),
        raw_value: 5.0,
        max_value: 0.0,
        weight_percent: 40.0,
    };

    let err = compute_composite("impact", &[broken]).expect_err("zero max must fail");
    assert!(matches!(err, ValidationError::NonPositiveMax { .. }));
}

#[test]
fn duplicate_labels_are_rejected() {
    let criteria = vec![
        criterion("Alignment", 5.0, 10.0, 50.0),
        criterion("Alignment", 6.0, 10.0, 50.0),
    ];
    let err = compute_composite("impact", &criteria).expect_err("duplicates must fail");
    assert_eq!(err, ValidationError::DuplicateCriterion("Alignment".to_string()));
}

#[test]
fn overall_defaults_to_equal_weights() {
    let overall = ScoreAggregator::new()
        .composite("impact", impact_criteria())
        .composite("feasibility", feasibility_criteria())
        .evaluate()
        .expect("overall computes");

    assert_eq!(overall.composite("impact").map(|c| c.score), Some(87));
    assert_eq!(overall.composite("feasibility").map(|c| c.score), Some(65));
    assert_eq!(overall.overall, 76);
    assert_eq!(
        overall
            .composites
            .iter()
            .map(|composite| composite.name.as_str())
            .collect::<Vec<_>>(),
        vec!["impact", "feasibility"]
    );
}

#[test]
fn overall_applies_explicit_weights_and_zeroes_missing_composites() {
    let impact = compute_composite("impact", &impact_criteria()).expect("impact computes");
    let feasibility =
        compute_composite("feasibility", &feasibility_criteria()).expect("feasibility computes");
    let mut weights = BTreeMap::new();
    weights.insert("impact".to_string(), 100.0);

    let overall = compute_overall(vec![impact, feasibility], Some(&weights))
        .expect("overall computes");

    assert_eq!(overall.overall, 87);
    assert_eq!(overall.weights[1].weight_percent, 0.0);
}

#[test]
fn overall_with_only_zero_weights_is_zero() {
    let impact = compute_composite("impact", &impact_criteria()).expect("impact computes");
    let mut weights = BTreeMap::new();
    weights.insert("impact".to_string(), 0.0);

    let overall = compute_overall(vec![impact], Some(&weights)).expect("overall computes");
    assert_eq!(overall.overall, 0);
}

#[test]
fn overall_handles_weights_near_the_float_limit() {
    let impact = compute_composite("impact", &impact_criteria()).expect("impact computes");
    let feasibility =
        compute_composite("feasibility", &feasibility_criteria()).expect("feasibility computes");
    let mut weights = BTreeMap::new();
    weights.insert("impact".to_string(), f64::MAX);
    weights.insert("feasibility".to_string(), f64::MAX);

    let overall = compute_overall(vec![impact, feasibility], Some(&weights))
        .expect("overall computes");

    assert_eq!(overall.overall, 76);
}

#[test]
fn overall_rejects_unknown_and_duplicate_composites() {
    let impact = compute_composite("impact", &impact_criteria()).expect("impact computes");
    let mut weights = BTreeMap::new();
    weights.insert("velocity".to_string(), 50.0);

    let err = compute_overall(vec![impact.clone()], Some(&weights)).expect_err("unknown name");
    assert_eq!(err, ValidationError::UnknownComposite("velocity".to_string()));

    let err = compute_overall(vec![impact.clone(), impact], None).expect_err("duplicate name");
    assert_eq!(err, ValidationError::DuplicateComposite("impact".to_string()));
}

#[test]
fn overall_of_no_composites_is_zero() {
    let overall = compute_overall(Vec::new(), None).expect("empty overall is valid");
    assert_eq!(overall.overall, 0);
}
