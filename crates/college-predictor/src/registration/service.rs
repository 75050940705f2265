use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use super::domain::{RegistrationSubmission, StudentId, StudentProfile};
use super::repository::{RepositoryError, StudentRepository};
use super::validation::{validate, RegistrationViolation};

/// Validates registration forms and hands accepted profiles to the repository.
pub struct RegistrationService<R> {
    repository: Arc<R>,
    sequence: AtomicU64,
}

impl<R> RegistrationService<R>
where
    R: StudentRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_student_id(&self) -> StudentId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        StudentId(format!("stu-{id:06}"))
    }

    pub fn register(
        &self,
        submission: RegistrationSubmission,
    ) -> Result<StudentProfile, RegistrationError> {
        let mut profile = validate(submission)?;
        profile.student_id = self.next_student_id();

        let stored = self.repository.insert(profile)?;
        info!(student_id = %stored.student_id.0, "student registered");
        Ok(stored)
    }

    pub fn get(&self, id: &StudentId) -> Result<Option<StudentProfile>, RegistrationError> {
        Ok(self.repository.fetch(id)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Invalid(#[from] RegistrationViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
