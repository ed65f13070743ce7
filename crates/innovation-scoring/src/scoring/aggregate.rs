use super::criterion::{ClampAdjustment, Criterion};
use super::{round_percent, usable_weight, weighted_mean, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Named group of criteria reduced to one 0-100 score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    pub name: String,
    pub criteria: Vec<Criterion>,
    pub score: u8,
    /// Unrounded weighted mean, kept for audits.
    pub exact_score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<ClampAdjustment>,
}

impl Composite {
    pub fn was_clamped(&self) -> bool {
        !self.adjustments.is_empty()
    }
}

/// Weight actually applied to a composite when building the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedWeight {
    pub composite: String,
    pub weight_percent: f64,
}

/// Composites in insertion order plus their weighted overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub composites: Vec<Composite>,
    pub weights: Vec<AppliedWeight>,
    pub overall: u8,
}

impl OverallScore {
    pub fn composite(&self, name: &str) -> Option<&Composite> {
        self.composites.iter().find(|composite| composite.name == name)
    }
}

/// Reduces criteria to a single composite score.
///
/// Raw values are clamped into `[0, max_value]` and negative or infinite
/// weights count as zero; each correction is returned in `Composite::adjustments`. Weights are
/// renormalised by their actual sum, and an all-zero or empty set scores 0.
pub fn compute_composite(
    name: impl Into<String>,
    criteria: &[Criterion],
) -> Result<Composite, ValidationError> {
    let name = name.into();
    let mut seen = HashSet::new();
    for criterion in criteria {
        criterion.validate()?;
        if !seen.insert(criterion.label.as_str()) {
            return Err(ValidationError::DuplicateCriterion(criterion.label.clone()));
        }
    }

    let adjustments: Vec<ClampAdjustment> = criteria
        .iter()
        .flat_map(ClampAdjustment::for_criterion)
        .collect();

    for adjustment in &adjustments {
        warn!(
            composite = %name,
            criterion = %adjustment.label,
            field = adjustment.field.label(),
            original = adjustment.original,
            applied = adjustment.applied,
            "corrected out-of-range criterion input"
        );
    }

    let exact_score = weighted_mean(
        criteria
            .iter()
            .map(|criterion| (criterion.ratio() * 100.0, criterion.effective_weight())),
    );
    let score = round_percent(exact_score);

    debug!(composite = %name, criteria = criteria.len(), score, "computed composite score");

    Ok(Composite {
        name,
        criteria: criteria.to_vec(),
        score,
        exact_score,
        adjustments,
    })
}

/// Combines composite scores into one overall figure.
///
/// Without `overall_weights` every composite weighs the same. With them,
/// composites missing from the map weigh zero and names that match no
/// composite are rejected.
pub fn compute_overall(
    composites: Vec<Composite>,
    overall_weights: Option<&BTreeMap<String, f64>>,
) -> Result<OverallScore, ValidationError> {
    let mut seen = HashSet::new();
    for composite in &composites {
        if !seen.insert(composite.name.as_str()) {
            return Err(ValidationError::DuplicateComposite(composite.name.clone()));
        }
    }

    if let Some(weights) = overall_weights {
        if let Some(unknown) = weights.keys().find(|name| !seen.contains(name.as_str())) {
            return Err(ValidationError::UnknownComposite(unknown.clone()));
        }
    }

    let weights: Vec<AppliedWeight> = composites
        .iter()
        .map(|composite| {
            let weight_percent = match overall_weights {
                Some(weights) => weights
                    .get(&composite.name)
                    .copied()
                    .map(usable_weight)
                    .unwrap_or(0.0),
                None => 1.0,
            };
            AppliedWeight {
                composite: composite.name.clone(),
                weight_percent,
            }
        })
        .collect();

    let overall = round_percent(weighted_mean(
        composites
            .iter()
            .zip(&weights)
            .map(|(composite, weight)| (f64::from(composite.score), weight.weight_percent)),
    ));

    debug!(composites = composites.len(), overall, "computed overall score");

    Ok(OverallScore {
        composites,
        weights,
        overall,
    })
}

/// Builder collecting named composites and optional overall weights.
#[derive(Debug, Clone, Default)]
pub struct ScoreAggregator {
    groups: Vec<(String, Vec<Criterion>)>,
    weights: Option<BTreeMap<String, f64>>,
}

impl ScoreAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn composite(mut self, name: impl Into<String>, criteria: Vec<Criterion>) -> Self {
        self.groups.push((name.into(), criteria));
        self
    }

    pub fn weight(mut self, name: impl Into<String>, weight_percent: f64) -> Self {
        self.weights
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), weight_percent);
        self
    }

    pub fn evaluate(&self) -> Result<OverallScore, ValidationError> {
        let composites = self
            .groups
            .iter()
            .map(|(name, criteria)| compute_composite(name.clone(), criteria))
            .collect::<Result<Vec<_>, _>>()?;

        compute_overall(composites, self.weights.as_ref())
    }
}
