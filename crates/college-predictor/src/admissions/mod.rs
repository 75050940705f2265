//! Score calculation and eligibility matching against historical admission cutoffs.
//!
//! [`score`] turns raw marks into a cutoff score. [`predict`] and [`browse`] are
//! pure functions over a record slice; [`catalog`] owns the loaded snapshot and
//! is what the HTTP layer talks to.

pub mod browse;
pub mod catalog;
pub mod dataset;
pub mod domain;
pub mod predict;
pub mod query;
pub mod router;
pub mod score;

#[cfg(test)]
mod tests;

pub use catalog::{AdmissionCatalog, AdmissionDataset, AdmissionError, PredictionOutcome};
pub use dataset::{CsvDatasetProvider, DatasetError, DatasetProvider, RowProblem};
pub use domain::{AdmissionRecord, CollegeSummary, FilterOptions};
pub use predict::PredictedOffering;
pub use query::{BrowseQuery, PredictionQuery, PredictionRequest, QueryError};
pub use router::admissions_router;
pub use score::{compute_score, mark_or_zero, required_bound, CutoffScore, ScoreInput, SubjectMarks};
