use college_predictor::admissions::{AdmissionCatalog, CsvDatasetProvider};
use college_predictor::registration::{
    RepositoryError, StudentId, StudentProfile, StudentRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};

pub(crate) type SharedCatalog = Arc<AdmissionCatalog<CsvDatasetProvider>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: SharedCatalog,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryStudentRepository {
    profiles: Arc<Mutex<HashMap<StudentId, StudentProfile>>>,
}

impl StudentRepository for InMemoryStudentRepository {
    fn insert(&self, profile: StudentProfile) -> Result<StudentProfile, RepositoryError> {
        let mut guard = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.contains_key(&profile.student_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(profile.student_id.clone(), profile.clone());
        Ok(profile)
    }

    fn fetch(&self, id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        let guard = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(id).cloned())
    }
}
