use super::{round_percent, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub name: String,
    pub filled: bool,
}

/// Named predicate deciding whether one field of a snapshot is filled.
pub struct FieldRule<T> {
    pub name: &'static str,
    pub is_filled: fn(&T) -> bool,
}

impl<T> FieldRule<T> {
    pub const fn new(name: &'static str, is_filled: fn(&T) -> bool) -> Self {
        Self { name, is_filled }
    }
}

/// Ordered, duplicate-free snapshot of field states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldSet {
    fields: Vec<FieldState>,
}

impl FieldSet {
    pub fn new<I, S>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let fields: Vec<FieldState> = pairs
            .into_iter()
            .map(|(name, filled)| FieldState {
                name: name.into(),
                filled,
            })
            .collect();

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ValidationError::DuplicateField(field.name.clone()));
            }
        }

        Ok(Self { fields })
    }

    /// Evaluates each rule against the snapshot, in rule order.
    pub fn from_snapshot<T>(snapshot: &T, rules: &[FieldRule<T>]) -> Result<Self, ValidationError> {
        Self::new(
            rules
                .iter()
                .map(|rule| (rule.name, (rule.is_filled)(snapshot))),
        )
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub completion_percent: u8,
    pub filled: usize,
    pub total: usize,
    /// Status of every field in input order.
    pub per_field: Vec<FieldState>,
    /// Unfilled fields in input order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

impl CompletionReport {
    pub fn is_complete(&self) -> bool {
        self.completion_percent == 100
    }

    pub fn status(&self, name: &str) -> Option<bool> {
        self.per_field
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.filled)
    }
}

/// Recomputes completion from the latest snapshot; an empty set is 0%.
pub fn track(fields: &FieldSet) -> CompletionReport {
    let total = fields.len();
    let filled = fields.fields().iter().filter(|field| field.filled).count();
    let completion_percent = if total == 0 {
        0
    } else {
        round_percent(filled as f64 * 100.0 / total as f64)
    };

    let per_field = fields.fields().to_vec();
    let missing = fields
        .fields()
        .iter()
        .filter(|field| !field.filled)
        .map(|field| field.name.clone())
        .collect();

    CompletionReport {
        completion_percent,
        filled,
        total,
        per_field,
        missing,
    }
}
