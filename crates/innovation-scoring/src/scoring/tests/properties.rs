use crate::scoring::{
    compute_composite, rank, track, Candidate, Criterion, FieldSet, MatchRequest, MatchWeights,
};
use proptest::prelude::*;

fn criteria_strategy() -> impl Strategy<Value = Vec<Criterion>> {
    prop::collection::vec((-50.0..150.0f64, 1.0..100.0f64, 0.0..100.0f64), 0..6).prop_map(
        |entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(index, (raw, max, weight))| Criterion {
                    label: format!("criterion-{index}"),
                    raw_value: raw,
                    max_value: max,
                    weight_percent: weight,
                })
                .collect()
        },
    )
}

fn skills() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["Python", "ML", "SQL", "Design", "Rust"]),
        0..4,
    )
    .prop_map(|picked| picked.into_iter().map(str::to_string).collect())
}

proptest! {
    #[test]
    fn composite_score_stays_in_range(criteria in criteria_strategy()) {
        let composite = compute_composite("impact", &criteria).expect("valid criteria");
        prop_assert!(composite.score <= 100);
        prop_assert_eq!(
            composite,
            compute_composite("impact", &criteria).expect("valid criteria")
        );
    }

    #[test]
    fn scaling_weights_does_not_change_the_score(
        criteria in criteria_strategy(),
        factor in prop::sample::select(vec![0.5f64, 2.0, 4.0, 10.0, 1e300]),
    ) {
        let scaled: Vec<Criterion> = criteria
            .iter()
            .cloned()
            .map(|mut criterion| {
                criterion.weight_percent *= factor;
                criterion
            })
            .collect();

        let original = compute_composite("impact", &criteria).expect("valid criteria");
        let rescaled = compute_composite("impact", &scaled).expect("valid criteria");
        prop_assert!((original.exact_score - rescaled.exact_score).abs() < 1e-9);
    }

    #[test]
    fn clamping_matches_pre_clamped_input(criteria in criteria_strategy()) {
        let pre_clamped: Vec<Criterion> = criteria
            .iter()
            .cloned()
            .map(|mut criterion| {
                criterion.raw_value = criterion.raw_value.clamp(0.0, criterion.max_value);
                criterion
            })
            .collect();

        let clamped = compute_composite("impact", &criteria).expect("valid criteria");
        let direct = compute_composite("impact", &pre_clamped).expect("valid criteria");
        prop_assert_eq!(clamped.score, direct.score);
        prop_assert_eq!(clamped.exact_score, direct.exact_score);
    }

    #[test]
    fn raising_capacity_never_lowers_the_match(
        attributes in skills(),
        capacity in 0.0..100.0f64,
        bump in 0.0..50.0f64,
    ) {
        let request = MatchRequest::new(["Python", "ML"]);
        let before = vec![Candidate::new("sarah", attributes.clone(), capacity)];
        let after = vec![Candidate::new("sarah", attributes, capacity + bump)];

        let before = rank(&request, &before, MatchWeights::default(), None).expect("ranks");
        let after = rank(&request, &after, MatchWeights::default(), None).expect("ranks");
        prop_assert!(after[0].match_score >= before[0].match_score);
    }

    #[test]
    fn equal_candidates_keep_relative_order(
        others in prop::collection::vec((skills(), 0.0..100.0f64), 0..5),
        insert_at in 0usize..6,
    ) {
        let request = MatchRequest::new(["Python", "ML"]);
        let mut pool: Vec<Candidate> = others
            .into_iter()
            .enumerate()
            .map(|(index, (attributes, capacity))| {
                Candidate::new(format!("other-{index}"), attributes, capacity)
            })
            .collect();
        let position = insert_at.min(pool.len());
        pool.insert(position, Candidate::new("first", ["Python"], 40.0));
        pool.push(Candidate::new("second", ["ML"], 40.0));

        let ranked = rank(&request, &pool, MatchWeights::default(), None).expect("ranks");
        let first = ranked.iter().position(|entry| entry.candidate.id == "first");
        let second = ranked.iter().position(|entry| entry.candidate.id == "second");
        prop_assert!(first < second);
    }

    #[test]
    fn filling_a_field_never_lowers_completion(
        states in prop::collection::vec(any::<bool>(), 1..12),
        pick in any::<prop::sample::Index>(),
    ) {
        let pairs = |states: &[bool]| {
            states
                .iter()
                .enumerate()
                .map(|(index, filled)| (format!("field-{index}"), *filled))
                .collect::<Vec<_>>()
        };
        let before = FieldSet::new(pairs(&states[..])).expect("unique fields");

        let mut updated = states.clone();
        let index = pick.index(updated.len());
        updated[index] = true;
        let after = FieldSet::new(pairs(&updated[..])).expect("unique fields");

        prop_assert_eq!(track(&before), track(&before));
        prop_assert!(track(&after).completion_percent >= track(&before).completion_percent);
    }
}
