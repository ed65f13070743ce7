use super::{usable_weight, ValidationError};
use serde::{Deserialize, Serialize};

/// A single weighted sub-measurement inside a composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub label: String,
    pub raw_value: f64,
    pub max_value: f64,
    pub weight_percent: f64,
}

impl Criterion {
    pub fn new(
        label: impl Into<String>,
        raw_value: f64,
        max_value: f64,
        weight_percent: f64,
    ) -> Result<Self, ValidationError> {
        let criterion = Self {
            label: label.into(),
            raw_value,
            max_value,
            weight_percent,
        };
        criterion.validate()?;
        Ok(criterion)
    }

    /// Rejects records whose ratio cannot be computed. Raw values and weights
    /// are corrected later instead of rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.label.trim().is_empty() {
            return Err(ValidationError::EmptyLabel);
        }
        if !self.max_value.is_finite() || self.max_value <= 0.0 {
            return Err(ValidationError::NonPositiveMax {
                label: self.label.clone(),
                max_value: self.max_value,
            });
        }
        Ok(())
    }

    /// Raw value pulled into `[0, max_value]`; NaN is treated as 0.
    pub fn clamped_value(&self) -> f64 {
        if self.raw_value.is_nan() {
            0.0
        } else {
            self.raw_value.clamp(0.0, self.max_value)
        }
    }

    /// Clamped raw value as a fraction of the maximum, always in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        self.clamped_value() / self.max_value
    }

    /// Weight used for aggregation; negative or non-finite weights count as 0.
    pub fn effective_weight(&self) -> f64 {
        usable_weight(self.weight_percent)
    }
}

/// Which part of a criterion was corrected before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustedField {
    RawValue,
    Weight,
}

impl AdjustedField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RawValue => "raw value",
            Self::Weight => "weight",
        }
    }
}

/// Record of a silent correction applied to caller input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClampAdjustment {
    pub label: String,
    pub field: AdjustedField,
    pub original: f64,
    pub applied: f64,
}

impl ClampAdjustment {
    pub(crate) fn for_criterion(criterion: &Criterion) -> Vec<Self> {
        let mut adjustments = Vec::new();

        let applied = criterion.clamped_value();
        if !same_value(applied, criterion.raw_value) {
            adjustments.push(Self {
                label: criterion.label.clone(),
                field: AdjustedField::RawValue,
                original: criterion.raw_value,
                applied,
            });
        }

        let weight = criterion.effective_weight();
        if !same_value(weight, criterion.weight_percent) {
            adjustments.push(Self {
                label: criterion.label.clone(),
                field: AdjustedField::Weight,
                original: criterion.weight_percent,
                applied: weight,
            });
        }

        adjustments
    }
}

fn same_value(applied: f64, original: f64) -> bool {
    !original.is_nan() && applied == original
}
