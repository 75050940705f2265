use serde::{Deserialize, Serialize};

use super::score::{optional_bound, required_bound, CutoffScore, ScoreInput, SubjectMarks};

/// Rejected prediction input. The caller is expected to re-prompt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("{field} is required")]
    MissingBound { field: &'static str },
    #[error("{field} must be numeric, got '{value}'")]
    MalformedNumber { field: &'static str, value: String },
}

/// Prediction form as received from a caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub min_score: Option<ScoreInput>,
    #[serde(default)]
    pub max_score: Option<ScoreInput>,
    #[serde(default)]
    pub marks: Option<SubjectMarks>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

/// Validated prediction query. Built fresh for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionQuery {
    min_score: f64,
    max_score: f64,
    category: String,
    branch: Option<String>,
    district: Option<String>,
}

impl PredictionQuery {
    pub fn new(min_score: f64, max_score: f64, category: impl Into<String>) -> Self {
        Self {
            min_score,
            max_score,
            category: category.into(),
            branch: None,
            district: None,
        }
    }

    /// Validates a raw request. An explicit `max_score` must be numeric; without one the
    /// student's score is derived from the marks, each missing mark counting as zero.
    pub fn from_request(
        request: &PredictionRequest,
        default_category: &str,
    ) -> Result<Self, QueryError> {
        let min_score = required_bound("min_score", request.min_score.as_ref())?;
        let max_score = match optional_bound("max_score", request.max_score.as_ref())? {
            Some(value) => value,
            None => request
                .marks
                .as_ref()
                .map(SubjectMarks::score)
                .map_or(0.0, CutoffScore::value),
        };

        let category = non_blank(request.category.as_deref())
            .unwrap_or(default_category)
            .to_string();

        Ok(Self {
            min_score,
            max_score,
            category,
            branch: non_blank(request.branch.as_deref()).map(str::to_string),
            district: non_blank(request.district.as_deref()).map(str::to_string),
        })
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into()).filter(|value| !value.trim().is_empty());
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into()).filter(|value| !value.trim().is_empty());
        self
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }
}

/// Search-as-you-type narrowing. Every populated field is a case-insensitive
/// substring test; blank fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub college_code: Option<String>,
}

impl BrowseQuery {
    pub fn is_empty(&self) -> bool {
        [&self.text, &self.district, &self.college_code]
            .into_iter()
            .all(|field| non_blank(field.as_deref()).is_none())
    }
}

/// Whitespace-only filters mean "no constraint".
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_min_score_is_rejected() {
        let request = PredictionRequest {
            max_score: Some(ScoreInput::Number(180.0)),
            ..PredictionRequest::default()
        };
        let error = PredictionQuery::from_request(&request, "General").expect_err("rejected");
        assert_eq!(error, QueryError::MissingBound { field: "min_score" });
    }

    #[test]
    fn non_numeric_min_score_is_rejected() {
        let request = PredictionRequest {
            min_score: Some(ScoreInput::from("high")),
            ..PredictionRequest::default()
        };
        let error = PredictionQuery::from_request(&request, "General").expect_err("rejected");
        assert!(matches!(
            error,
            QueryError::MalformedNumber { field: "min_score", .. }
        ));
    }

    #[test]
    fn blank_category_defaults_and_blank_filters_are_unset() {
        let request = PredictionRequest {
            min_score: Some(ScoreInput::from("120")),
            max_score: Some(ScoreInput::Number(175.5)),
            category: Some("   ".to_string()),
            branch: Some(String::new()),
            district: Some("Chennai".to_string()),
            ..PredictionRequest::default()
        };
        let query = PredictionQuery::from_request(&request, "General").expect("valid");
        assert_eq!(query.min_score(), 120.0);
        assert_eq!(query.max_score(), 175.5);
        assert_eq!(query.category(), "General");
        assert_eq!(query.branch(), None);
        assert_eq!(query.district(), Some("Chennai"));
    }

    #[test]
    fn max_score_derives_from_marks_when_absent() {
        let request = PredictionRequest {
            min_score: Some(ScoreInput::Number(100.0)),
            marks: Some(SubjectMarks {
                maths: Some(ScoreInput::Number(90.0)),
                physics: Some(ScoreInput::from("80")),
                chemistry: None,
            }),
            category: Some("BC".to_string()),
            ..PredictionRequest::default()
        };
        let query = PredictionQuery::from_request(&request, "General").expect("valid");
        assert_eq!(query.max_score(), 130.0);
        assert_eq!(query.category(), "BC");
    }

    #[test]
    fn malformed_max_score_is_rejected_even_with_marks() {
        let request = PredictionRequest {
            min_score: Some(ScoreInput::Number(100.0)),
            max_score: Some(ScoreInput::from("lots")),
            marks: Some(SubjectMarks::default()),
            ..PredictionRequest::default()
        };
        assert!(PredictionQuery::from_request(&request, "General").is_err());
    }

    #[test]
    fn browse_query_emptiness_ignores_whitespace() {
        let query = BrowseQuery {
            text: Some("  ".to_string()),
            ..BrowseQuery::default()
        };
        assert!(query.is_empty());
        let query = BrowseQuery {
            college_code: Some("2006".to_string()),
            ..BrowseQuery::default()
        };
        assert!(!query.is_empty());
    }
}
