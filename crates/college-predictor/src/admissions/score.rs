use std::fmt;

use serde::{Deserialize, Serialize};

use super::query::QueryError;

/// A numeric field as supplied by a form: a JSON number, raw text, or any
/// other JSON value, which never counts as numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreInput {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl ScoreInput {
    /// Finite numeric value, if the input holds one.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            ScoreInput::Number(value) => *value,
            ScoreInput::Text(raw) => raw.trim().parse::<f64>().ok()?,
            ScoreInput::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for ScoreInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ScoreInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScoreInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parse-with-fallback: anything missing or non-numeric counts as zero.
pub fn mark_or_zero(input: Option<&ScoreInput>) -> f64 {
    input.and_then(ScoreInput::as_f64).unwrap_or(0.0)
}

/// Parse-with-rejection for bounds that must be supplied.
pub fn required_bound(field: &'static str, input: Option<&ScoreInput>) -> Result<f64, QueryError> {
    let input = input.ok_or(QueryError::MissingBound { field })?;
    input.as_f64().ok_or_else(|| QueryError::MalformedNumber {
        field,
        value: describe(input),
    })
}

/// Parse-with-rejection for bounds that may be omitted but must be numeric when present.
pub fn optional_bound(
    field: &'static str,
    input: Option<&ScoreInput>,
) -> Result<Option<f64>, QueryError> {
    input.map(|value| required_bound(field, Some(value))).transpose()
}

fn describe(input: &ScoreInput) -> String {
    match input {
        ScoreInput::Number(value) => value.to_string(),
        ScoreInput::Text(raw) => raw.clone(),
        ScoreInput::Other(value) => value.to_string(),
    }
}

/// Raw subject marks as entered by the student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectMarks {
    #[serde(default)]
    pub maths: Option<ScoreInput>,
    #[serde(default)]
    pub physics: Option<ScoreInput>,
    #[serde(default)]
    pub chemistry: Option<ScoreInput>,
}

impl SubjectMarks {
    pub fn score(&self) -> CutoffScore {
        compute_score(
            mark_or_zero(self.maths.as_ref()),
            mark_or_zero(self.physics.as_ref()),
            mark_or_zero(self.chemistry.as_ref()),
        )
    }
}

/// Admission score derived from subject marks. Comparisons use the exact value;
/// rounding only happens when it is displayed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CutoffScore(f64);

impl CutoffScore {
    pub const fn from_value(value: f64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    pub fn rounded(self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }
}

impl fmt::Display for CutoffScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// `maths + physics / 2 + chemistry / 2`, unclamped.
pub fn compute_score(maths: f64, physics: f64, chemistry: f64) -> CutoffScore {
    CutoffScore(maths + physics / 2.0 + chemistry / 2.0)
}
