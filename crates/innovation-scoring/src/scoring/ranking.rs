use super::{round_percent, usable_weight, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Attributes a candidate should bring, e.g. the skills a task needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub required_attributes: BTreeSet<String>,
}

impl MatchRequest {
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(default)]
    pub attributes: BTreeSet<String>,
    /// Availability percent; clamped into `[0, 100]` before scoring.
    pub capacity: f64,
}

impl Candidate {
    pub fn new<I, S>(id: impl Into<String>, attributes: I, capacity: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            attributes: attributes.into_iter().map(Into::into).collect(),
            capacity,
        }
    }

    fn clamped_capacity(&self) -> f64 {
        if self.capacity.is_nan() {
            0.0
        } else {
            self.capacity.clamp(0.0, 100.0)
        }
    }
}

/// Blend between attribute overlap and capacity. The pair is normalised by
/// its sum; two zero weights fall back to overlap only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skill_weight: f64,
    pub capacity_weight: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skill_weight: 0.7,
            capacity_weight: 0.3,
        }
    }
}

impl MatchWeights {
    /// Returns `(skill, capacity)` shares summing to 1.
    pub fn normalized(&self) -> (f64, f64) {
        let skill = usable_weight(self.skill_weight);
        let capacity = usable_weight(self.capacity_weight);
        let largest = skill.max(capacity);
        if largest <= 0.0 {
            return (1.0, 0.0);
        }

        let (skill, capacity) = (skill / largest, capacity / largest);
        let total = skill + capacity;
        (skill / total, capacity / total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub match_score: u8,
    pub exact_score: f64,
    pub overlap_ratio: f64,
    /// Required attributes the candidate lacks, in sorted order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_attributes: Vec<String>,
}

/// Scores every candidate against the request and orders them best first.
///
/// Candidates with equal rounded scores keep their input order. `limit`
/// truncates the ordered list without changing it.
pub fn rank(
    request: &MatchRequest,
    candidates: &[Candidate],
    weights: MatchWeights,
    limit: Option<usize>,
) -> Result<Vec<RankedCandidate>, ValidationError> {
    let mut seen = HashSet::new();
    for candidate in candidates {
        if candidate.id.trim().is_empty() {
            return Err(ValidationError::EmptyCandidateId);
        }
        if !seen.insert(candidate.id.as_str()) {
            return Err(ValidationError::DuplicateCandidate(candidate.id.clone()));
        }
    }

    let (skill_share, capacity_share) = weights.normalized();
    let required = &request.required_attributes;

    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .map(|candidate| {
            let matched = required.intersection(&candidate.attributes).count();
            let overlap_ratio = if required.is_empty() {
                0.0
            } else {
                matched as f64 / required.len() as f64
            };
            let exact_score =
                skill_share * overlap_ratio * 100.0 + capacity_share * candidate.clamped_capacity();
            let missing_attributes = required
                .difference(&candidate.attributes)
                .cloned()
                .collect();

            RankedCandidate {
                candidate: candidate.clone(),
                match_score: round_percent(exact_score),
                exact_score,
                overlap_ratio,
                missing_attributes,
            }
        })
        .collect();

    // `sort_by` is stable, which keeps input order for ties.
    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    debug!(
        candidates = candidates.len(),
        returned = ranked.len(),
        "ranked candidates against request"
    );

    Ok(ranked)
}

/// Ranker bound to one weighting scheme, reusable across requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchRanker {
    weights: MatchWeights,
}

impl MatchRanker {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> MatchWeights {
        self.weights
    }

    pub fn rank(
        &self,
        request: &MatchRequest,
        candidates: &[Candidate],
    ) -> Result<Vec<RankedCandidate>, ValidationError> {
        rank(request, candidates, self.weights, None)
    }

    pub fn top(
        &self,
        request: &MatchRequest,
        candidates: &[Candidate],
        limit: usize,
    ) -> Result<Vec<RankedCandidate>, ValidationError> {
        rank(request, candidates, self.weights, Some(limit))
    }
}
