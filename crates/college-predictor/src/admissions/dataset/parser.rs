use super::normalizer::normalize_field;
use super::DatasetError;
use crate::admissions::domain::AdmissionRecord;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::io::Read;

/// Why a single CSV row was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum RowProblem {
    EmptyCollegeCode,
    InvalidCutoff { field: &'static str, value: String },
    InvertedRange { min_cutoff: f64, max_cutoff: f64 },
    InvalidSelectedCount { value: String },
}

impl fmt::Display for RowProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowProblem::EmptyCollegeCode => write!(f, "college_code is empty"),
            RowProblem::InvalidCutoff { field, value } => {
                write!(f, "{field} '{value}' is not a finite number")
            }
            RowProblem::InvertedRange {
                min_cutoff,
                max_cutoff,
            } => write!(f, "min_cutoff {min_cutoff} exceeds max_cutoff {max_cutoff}"),
            RowProblem::InvalidSelectedCount { value } => {
                write!(f, "selected_count '{value}' is not a non-negative integer")
            }
        }
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<AdmissionRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let raw = result?;
        let line = raw.position().map_or(0, |position| position.line());
        let row: CutoffRow = raw.deserialize(Some(&headers))?;
        let record = row
            .into_record()
            .map_err(|problem| DatasetError::InvalidRow { line, problem })?;
        records.push(record);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CutoffRow {
    college_code: String,
    college_name: String,
    district: String,
    branch: String,
    category: String,
    min_cutoff: String,
    max_cutoff: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    selected_count: Option<String>,
}

impl CutoffRow {
    fn into_record(self) -> Result<AdmissionRecord, RowProblem> {
        let college_code = normalize_field(&self.college_code);
        if college_code.is_empty() {
            return Err(RowProblem::EmptyCollegeCode);
        }

        let min_cutoff = parse_cutoff("min_cutoff", &self.min_cutoff)?;
        let max_cutoff = parse_cutoff("max_cutoff", &self.max_cutoff)?;
        if min_cutoff > max_cutoff {
            return Err(RowProblem::InvertedRange {
                min_cutoff,
                max_cutoff,
            });
        }

        let selected_count = match self.selected_count.as_deref() {
            None => 0,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| RowProblem::InvalidSelectedCount {
                    value: raw.to_string(),
                })?,
        };

        Ok(AdmissionRecord {
            college_code,
            college_name: normalize_field(&self.college_name),
            district: normalize_field(&self.district),
            branch: normalize_field(&self.branch),
            category: normalize_field(&self.category),
            min_cutoff,
            max_cutoff,
            selected_count,
        })
    }
}

fn parse_cutoff(field: &'static str, raw: &str) -> Result<f64, RowProblem> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RowProblem::InvalidCutoff {
            field,
            value: raw.to_string(),
        })
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
