use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::admissions::catalog::AdmissionCatalog;
use crate::admissions::dataset::{DatasetError, DatasetProvider, RowProblem};
use crate::admissions::domain::AdmissionRecord;

pub(super) fn record(
    code: &str,
    name: &str,
    district: &str,
    branch: &str,
    category: &str,
    min_cutoff: f64,
    max_cutoff: f64,
    selected_count: u32,
) -> AdmissionRecord {
    AdmissionRecord {
        college_code: code.to_string(),
        college_name: name.to_string(),
        district: district.to_string(),
        branch: branch.to_string(),
        category: category.to_string(),
        min_cutoff,
        max_cutoff,
        selected_count,
    }
}

/// Small dataset spanning two districts, three categories and a duplicated offering.
pub(super) fn sample_records() -> Vec<AdmissionRecord> {
    vec![
        record("2006", "PSG College of Technology", "Coimbatore", "Mechanical", "General", 180.0, 195.0, 12),
        record("1", "Anna University", "Chennai", "Civil", "General", 170.0, 190.0, 20),
        record("1", "Anna University", "Chennai", "Civil", "General", 172.0, 188.0, 6),
        record("1", "Anna University", "Chennai", "Civil", "BC", 160.0, 185.0, 9),
        record("4", "Government College of Engineering", "Salem", "Civil", "General", 140.0, 160.0, 15),
        record("7", "Madras Institute of Technology", "Chennai", "Mechanical", "General", 140.0, 175.0, 30),
        record("9", "Kongu Engineering College", "Erode", "Mechanical", "MBC", 120.0, 150.0, 8),
    ]
}

#[derive(Default)]
pub(super) struct StaticProvider {
    records: Mutex<Vec<AdmissionRecord>>,
    fail: Mutex<bool>,
}

impl StaticProvider {
    pub(super) fn with_records(records: Vec<AdmissionRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            fail: Mutex::new(false),
        }
    }

    pub(super) fn replace(&self, records: Vec<AdmissionRecord>) {
        *self.records.lock().expect("records mutex poisoned") = records;
    }

    pub(super) fn set_failing(&self, fail: bool) {
        *self.fail.lock().expect("fail mutex poisoned") = fail;
    }
}

impl DatasetProvider for StaticProvider {
    fn fetch(&self) -> Result<Vec<AdmissionRecord>, DatasetError> {
        if *self.fail.lock().expect("fail mutex poisoned") {
            return Err(DatasetError::InvalidRow {
                line: 2,
                problem: RowProblem::EmptyCollegeCode,
            });
        }
        Ok(self.records.lock().expect("records mutex poisoned").clone())
    }
}

impl DatasetProvider for Arc<StaticProvider> {
    fn fetch(&self) -> Result<Vec<AdmissionRecord>, DatasetError> {
        self.as_ref().fetch()
    }
}

pub(super) fn loaded_catalog() -> Arc<AdmissionCatalog<StaticProvider>> {
    let catalog = AdmissionCatalog::new(StaticProvider::with_records(sample_records()), "General");
    catalog.load().expect("static dataset loads");
    Arc::new(catalog)
}

pub(super) fn empty_catalog() -> Arc<AdmissionCatalog<StaticProvider>> {
    Arc::new(AdmissionCatalog::new(StaticProvider::default(), "General"))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
