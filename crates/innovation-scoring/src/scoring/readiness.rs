use super::ValidationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FALLBACK_LABEL: &str = "incomplete";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub label: String,
    /// Inclusive lower bound.
    pub minimum: f64,
}

impl Threshold {
    pub fn new(label: impl Into<String>, minimum: f64) -> Self {
        Self {
            label: label.into(),
            minimum,
        }
    }
}

/// Maps a score to the label of the first threshold it meets.
///
/// Thresholds are evaluated in the order given and must be supplied sorted
/// from the highest minimum to the lowest; the table never re-sorts them.
/// Non-finite scores and scores below every threshold get `fallback`.
pub fn classify<'a>(
    score: f64,
    thresholds: &'a [Threshold],
    fallback: &'a str,
) -> Result<&'a str, ValidationError> {
    if thresholds.is_empty() {
        return Err(ValidationError::EmptyThresholds);
    }

    Ok(first_met(score, thresholds, fallback))
}

fn first_met<'a>(score: f64, thresholds: &'a [Threshold], fallback: &'a str) -> &'a str {
    if !score.is_finite() {
        return fallback;
    }
    thresholds
        .iter()
        .find(|threshold| score >= threshold.minimum)
        .map(|threshold| threshold.label.as_str())
        .unwrap_or(fallback)
}

/// Validated threshold table with an explicit label for scores below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReadinessTable")]
pub struct ReadinessTable {
    thresholds: Vec<Threshold>,
    fallback: String,
}

#[derive(Deserialize)]
struct RawReadinessTable {
    thresholds: Vec<Threshold>,
    #[serde(default = "default_fallback")]
    fallback: String,
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK_LABEL.to_string()
}

impl TryFrom<RawReadinessTable> for ReadinessTable {
    type Error = ValidationError;

    fn try_from(raw: RawReadinessTable) -> Result<Self, Self::Error> {
        Self::new(raw.thresholds, raw.fallback)
    }
}

impl ReadinessTable {
    pub fn new(
        thresholds: Vec<Threshold>,
        fallback: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if thresholds.is_empty() {
            return Err(ValidationError::EmptyThresholds);
        }
        Ok(Self {
            thresholds,
            fallback: fallback.into(),
        })
    }

    /// Score colour bands used for idea confidence and project health.
    ///
    /// `high` must not be below `medium`, otherwise the medium band is
    /// unreachable.
    pub fn score_bands(high: f64, medium: f64) -> Self {
        debug_assert!(
            high >= medium,
            "high threshold {high} is below medium threshold {medium}"
        );
        Self {
            thresholds: vec![Threshold::new("high", high), Threshold::new("medium", medium)],
            fallback: "low".to_string(),
        }
    }

    /// Complete / in progress / incomplete for completion percentages.
    pub fn completion_status() -> Self {
        Self {
            thresholds: vec![
                Threshold::new("complete", 100.0),
                Threshold::new("in_progress", 1.0),
            ],
            fallback: DEFAULT_FALLBACK_LABEL.to_string(),
        }
    }

    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn classify(&self, score: f64) -> &str {
        first_met(score, &self.thresholds, &self.fallback)
    }
}

impl Default for ReadinessTable {
    fn default() -> Self {
        Self::score_bands(80.0, 60.0)
    }
}
