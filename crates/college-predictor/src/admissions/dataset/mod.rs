mod normalizer;
mod parser;

use crate::admissions::domain::AdmissionRecord;
use std::io::Read;
use std::path::{Path, PathBuf};

pub use parser::RowProblem;

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, problem: RowProblem },
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "failed to read cutoff dataset: {}", err),
            DatasetError::Csv(err) => write!(f, "invalid cutoff CSV data: {}", err),
            DatasetError::InvalidRow { line, problem } => {
                write!(f, "invalid cutoff record on line {}: {}", line, problem)
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(err) => Some(err),
            DatasetError::Csv(err) => Some(err),
            DatasetError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// External source of historical cutoffs.
pub trait DatasetProvider: Send + Sync {
    fn fetch(&self) -> Result<Vec<AdmissionRecord>, DatasetError>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String {
        "dataset provider".to_string()
    }
}

/// Reads the full dataset from a CSV file on every fetch.
#[derive(Debug, Clone)]
pub struct CsvDatasetProvider {
    path: PathBuf,
}

impl CsvDatasetProvider {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<AdmissionRecord>, DatasetError> {
        parser::parse_records(reader)
    }
}

impl DatasetProvider for CsvDatasetProvider {
    fn fetch(&self) -> Result<Vec<AdmissionRecord>, DatasetError> {
        let file = std::fs::File::open(&self.path)?;
        Self::from_reader(file)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str =
        "college_code,college_name,district,branch,category,min_cutoff,max_cutoff,selected_count\n";

    fn parse(body: &str) -> Result<Vec<AdmissionRecord>, DatasetError> {
        CsvDatasetProvider::from_reader(Cursor::new(format!("{HEADER}{body}")))
    }

    #[test]
    fn parses_and_normalizes_rows() {
        let records = parse(
            "2006 , PSG  College of Technology ,Coimbatore,Mechanical Engineering,OC,180.5,195,12\n\
1,Anna University,Chennai,Civil Engineering,BC,170,190,\n",
        )
        .expect("parse succeeds");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].college_code, "2006");
        assert_eq!(records[0].college_name, "PSG College of Technology");
        assert_eq!(records[0].min_cutoff, 180.5);
        assert_eq!(records[0].selected_count, 12);
        assert_eq!(records[1].selected_count, 0);
    }

    #[test]
    fn inverted_range_reports_line() {
        let error = parse(
            "1,Anna University,Chennai,Civil Engineering,BC,170,190,3\n\
2,Madras Institute,Chennai,Civil Engineering,BC,195,190,3\n",
        )
        .expect_err("row rejected");

        match error {
            DatasetError::InvalidRow { line, problem } => {
                assert_eq!(line, 3);
                assert!(matches!(problem, RowProblem::InvertedRange { .. }));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_code_and_bad_numbers() {
        let error = parse(",Anna University,Chennai,Civil,BC,170,190,3\n").expect_err("rejected");
        assert!(matches!(
            error,
            DatasetError::InvalidRow {
                problem: RowProblem::EmptyCollegeCode,
                ..
            }
        ));

        let error = parse("1,Anna University,Chennai,Civil,BC,inf,190,3\n").expect_err("rejected");
        assert!(matches!(
            error,
            DatasetError::InvalidRow {
                problem: RowProblem::InvalidCutoff {
                    field: "min_cutoff",
                    ..
                },
                ..
            }
        ));

        let error = parse("1,Anna University,Chennai,Civil,BC,170,190,-2\n").expect_err("rejected");
        assert!(matches!(
            error,
            DatasetError::InvalidRow {
                problem: RowProblem::InvalidSelectedCount { .. },
                ..
            }
        ));
    }

    #[test]
    fn missing_column_is_a_csv_error() {
        let error = CsvDatasetProvider::from_reader(Cursor::new(
            "college_code,college_name\n1,Anna University\n",
        ))
        .expect_err("missing columns");
        assert!(matches!(error, DatasetError::Csv(_)));
    }

    #[test]
    fn fetch_propagates_io_errors() {
        let provider = CsvDatasetProvider::new("./does-not-exist.csv");
        let error = provider.fetch().expect_err("expected io error");
        match error {
            DatasetError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
