//! Multi-criteria scoring, candidate ranking, completion tracking, and
//! threshold classification.
//!
//! Every entry point is a pure function over immutable inputs: callers build
//! a fresh snapshot from their current state and recompute, so identical
//! inputs always produce identical outputs.

pub mod aggregate;
pub mod completion;
pub mod criterion;
pub mod idea;
pub mod ranking;
pub mod readiness;

#[cfg(test)]
mod tests;

pub use aggregate::{compute_composite, compute_overall, Composite, OverallScore, ScoreAggregator};
pub use completion::{track, CompletionReport, FieldRule, FieldSet, FieldState};
pub use criterion::{AdjustedField, ClampAdjustment, Criterion};
pub use idea::{IdeaAssessment, IdeaScorecard};
pub use ranking::{rank, Candidate, MatchRanker, MatchRequest, MatchWeights, RankedCandidate};
pub use readiness::{classify, ReadinessTable, Threshold};

/// Structurally invalid input that has no mathematically sound answer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("criterion label must not be empty")]
    EmptyLabel,
    #[error("criterion '{label}' has non-positive max value {max_value}")]
    NonPositiveMax { label: String, max_value: f64 },
    #[error("criterion label '{0}' appears more than once in the composite")]
    DuplicateCriterion(String),
    #[error("composite '{0}' appears more than once")]
    DuplicateComposite(String),
    #[error("overall weights reference unknown composite '{0}'")]
    UnknownComposite(String),
    #[error("candidate id must not be empty")]
    EmptyCandidateId,
    #[error("candidate id '{0}' appears more than once")]
    DuplicateCandidate(String),
    #[error("field '{0}' appears more than once")]
    DuplicateField(String),
    #[error("threshold table must contain at least one threshold")]
    EmptyThresholds,
}

/// Rounds a 0-100 figure half-to-even and pins it into `u8` range.
pub(crate) fn round_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round_ties_even() as u8
}

/// Weighted mean of `(value, weight)` pairs; zero total weight yields 0.
///
/// Weights are divided by the largest one first so huge finite weights
/// cannot overflow the sums.
pub(crate) fn weighted_mean<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let pairs: Vec<(f64, f64)> = pairs.into_iter().collect();
    let largest = pairs
        .iter()
        .map(|(_, weight)| *weight)
        .fold(0.0, f64::max);
    if largest <= 0.0 {
        return 0.0;
    }

    let (weighted_sum, total_weight) = pairs.iter().fold((0.0, 0.0), |(sum, total), (value, weight)| {
        let share = weight / largest;
        (sum + value * share, total + share)
    });

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}

/// Negative, NaN, and infinite weights count as 0.
pub(crate) fn usable_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}
