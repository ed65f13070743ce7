use crate::scoring::{Candidate, Criterion, MatchRequest, MatchWeights};

pub(super) fn criterion(label: &str, raw: f64, max: f64, weight: f64) -> Criterion {
    Criterion::new(label, raw, max, weight).expect("valid criterion")
}

pub(super) fn impact_criteria() -> Vec<Criterion> {
    vec![
        criterion("Business Value", 9.0, 10.0, 40.0),
        criterion("Strategic Alignment", 8.0, 10.0, 30.0),
        criterion("Customer Benefit", 9.0, 10.0, 30.0),
    ]
}

pub(super) fn feasibility_criteria() -> Vec<Criterion> {
    vec![
        criterion("Technical Complexity", 6.0, 10.0, 50.0),
        criterion("Resource Availability", 7.0, 10.0, 50.0),
    ]
}

pub(super) fn efficiency_criteria() -> Vec<Criterion> {
    vec![
        criterion("Cost Reduction", 7.0, 10.0, 60.0),
        criterion("Time Savings", 8.0, 10.0, 40.0),
    ]
}

pub(super) fn ml_request() -> MatchRequest {
    MatchRequest::new(["Python", "ML"])
}

pub(super) fn team() -> Vec<Candidate> {
    vec![
        Candidate::new("sarah", ["Python", "SQL"], 60.0),
        Candidate::new("marcus", ["Python", "ML", "Statistics"], 40.0),
        Candidate::new("priya", ["Design"], 100.0),
        Candidate::new("tom", Vec::<String>::new(), 20.0),
    ]
}

pub(super) fn default_weights() -> MatchWeights {
    MatchWeights::default()
}
