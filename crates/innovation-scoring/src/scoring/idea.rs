use super::aggregate::{OverallScore, ScoreAggregator};
use super::criterion::Criterion;
use super::readiness::ReadinessTable;
use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const IMPACT: &str = "impact";
pub const FEASIBILITY: &str = "feasibility";
pub const EFFICIENCY: &str = "efficiency";

/// Criteria gathered while reviewing an idea, grouped by composite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeaAssessment {
    #[serde(default)]
    pub impact: Vec<Criterion>,
    #[serde(default)]
    pub feasibility: Vec<Criterion>,
    #[serde(default)]
    pub efficiency: Vec<Criterion>,
    /// Per-composite weights for the overall score; equal when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaScorecard {
    pub impact: u8,
    pub feasibility: u8,
    pub efficiency: u8,
    pub overall: u8,
    pub confidence: String,
    pub breakdown: OverallScore,
}

impl IdeaAssessment {
    pub fn scorecard(&self, bands: &ReadinessTable) -> Result<IdeaScorecard, ValidationError> {
        let mut aggregator = ScoreAggregator::new()
            .composite(IMPACT, self.impact.clone())
            .composite(FEASIBILITY, self.feasibility.clone())
            .composite(EFFICIENCY, self.efficiency.clone());

        if let Some(weights) = &self.weights {
            for (name, weight) in weights {
                aggregator = aggregator.weight(name.clone(), *weight);
            }
        }

        let breakdown = aggregator.evaluate()?;
        let score_of = |name: &str| {
            breakdown
                .composite(name)
                .map(|composite| composite.score)
                .unwrap_or(0)
        };

        Ok(IdeaScorecard {
            impact: score_of(IMPACT),
            feasibility: score_of(FEASIBILITY),
            efficiency: score_of(EFFICIENCY),
            overall: breakdown.overall,
            confidence: bands.classify(f64::from(breakdown.overall)).to_string(),
            breakdown,
        })
    }
}
