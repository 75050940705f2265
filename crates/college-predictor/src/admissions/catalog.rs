use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::browse;
use super::dataset::{DatasetError, DatasetProvider};
use super::domain::{college_directory, AdmissionRecord, CollegeSummary, FilterOptions};
use super::predict::{predict, PredictedOffering};
use super::query::{BrowseQuery, PredictionQuery, PredictionRequest, QueryError};
use super::score::CutoffScore;

/// Failure at the engine boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdmissionError {
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryError),
    #[error("admission data unavailable: {reason}")]
    DataUnavailable { reason: String },
}

/// One complete, immutable load of the dataset.
#[derive(Debug)]
pub struct AdmissionDataset {
    records: Vec<AdmissionRecord>,
    colleges: Vec<CollegeSummary>,
    options: FilterOptions,
    loaded_at: DateTime<Utc>,
}

impl AdmissionDataset {
    pub fn new(records: Vec<AdmissionRecord>) -> Self {
        let colleges = college_directory(&records);
        let options = FilterOptions::from_records(&records);
        Self {
            records,
            colleges,
            options,
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[AdmissionRecord] {
        &self.records
    }

    pub fn colleges(&self) -> &[CollegeSummary] {
        &self.colleges
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn predict(&self, query: &PredictionQuery) -> Vec<PredictedOffering> {
        predict(&self.records, query)
    }

    pub fn browse_records(&self, query: &BrowseQuery) -> Vec<&AdmissionRecord> {
        browse::filter(&self.records, query)
    }

    pub fn browse_colleges(&self, query: &BrowseQuery) -> Vec<&CollegeSummary> {
        browse::filter(&self.colleges, query)
    }
}

/// Ranked prediction plus the bounds it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutcome {
    pub student_score: f64,
    pub student_score_display: String,
    pub min_score: f64,
    pub category: String,
    pub results: Vec<PredictedOffering>,
}

#[derive(Default)]
struct CatalogState {
    current: Option<Arc<AdmissionDataset>>,
    last_error: Option<String>,
}

/// Read-mostly holder of the current dataset snapshot.
///
/// Queries clone the snapshot `Arc` and run without holding the lock, so a
/// concurrent reload can never be observed half-applied.
pub struct AdmissionCatalog<P> {
    provider: P,
    default_category: String,
    state: RwLock<CatalogState>,
    reload: Mutex<()>,
}

impl<P> AdmissionCatalog<P>
where
    P: DatasetProvider,
{
    pub fn new(provider: P, default_category: impl Into<String>) -> Self {
        Self {
            provider,
            default_category: default_category.into(),
            state: RwLock::new(CatalogState::default()),
            reload: Mutex::new(()),
        }
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Fetches from the provider and swaps in the new snapshot. On failure the
    /// previous snapshot, if any, stays in service.
    /// Loads are serialized, so the installed snapshot is always the latest fetch.
    pub fn load(&self) -> Result<Arc<AdmissionDataset>, DatasetError> {
        let _reload = self.reload.lock().unwrap_or_else(PoisonError::into_inner);
        let source = self.provider.describe();
        match self.provider.fetch() {
            Ok(records) => {
                let dataset = Arc::new(AdmissionDataset::new(records));
                if dataset.is_empty() {
                    warn!(%source, "admission dataset has no records");
                }
                let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                state.current = Some(dataset.clone());
                state.last_error = None;
                info!(%source, records = dataset.len(), colleges = dataset.colleges().len(), "admission dataset loaded");
                Ok(dataset)
            }
            Err(err) => {
                let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                state.last_error = Some(err.to_string());
                warn!(%source, error = %err, retained = state.current.is_some(), "admission dataset load failed");
                Err(err)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .is_some()
    }

    pub fn snapshot(&self) -> Result<Arc<AdmissionDataset>, AdmissionError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        match (&state.current, &state.last_error) {
            (Some(dataset), _) => Ok(dataset.clone()),
            (None, Some(reason)) => Err(AdmissionError::DataUnavailable {
                reason: reason.clone(),
            }),
            (None, None) => Err(AdmissionError::DataUnavailable {
                reason: "dataset has not been loaded".to_string(),
            }),
        }
    }

    /// Validates the request, then ranks offerings from the current snapshot.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionOutcome, AdmissionError> {
        let query = PredictionQuery::from_request(request, &self.default_category)?;
        let dataset = self.snapshot()?;
        let results = dataset.predict(&query);

        debug!(
            min_score = query.min_score(),
            max_score = query.max_score(),
            category = query.category(),
            matches = results.len(),
            "prediction evaluated"
        );

        let student_score = CutoffScore::from_value(query.max_score());
        Ok(PredictionOutcome {
            student_score: student_score.value(),
            student_score_display: student_score.to_string(),
            min_score: query.min_score(),
            category: query.category().to_string(),
            results,
        })
    }

    pub fn browse_records(&self, query: &BrowseQuery) -> Result<Vec<AdmissionRecord>, AdmissionError> {
        let dataset = self.snapshot()?;
        let matches: Vec<AdmissionRecord> =
            dataset.browse_records(query).into_iter().cloned().collect();
        debug!(matches = matches.len(), "record browse evaluated");
        Ok(matches)
    }

    pub fn browse_colleges(&self, query: &BrowseQuery) -> Result<Vec<CollegeSummary>, AdmissionError> {
        let dataset = self.snapshot()?;
        let matches: Vec<CollegeSummary> =
            dataset.browse_colleges(query).into_iter().cloned().collect();
        debug!(matches = matches.len(), "college browse evaluated");
        Ok(matches)
    }

    pub fn options(&self) -> Result<FilterOptions, AdmissionError> {
        Ok(self.snapshot()?.options().clone())
    }
}
