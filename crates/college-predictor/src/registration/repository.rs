use serde::Serialize;

use super::domain::{StudentId, StudentProfile};

/// Storage abstraction so the registration service can be exercised in isolation.
pub trait StudentRepository: Send + Sync {
    fn insert(&self, profile: StudentProfile) -> Result<StudentProfile, RepositoryError>;
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("student already registered")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Acknowledgement returned to the registering client.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationReceipt {
    pub student_id: StudentId,
    pub status: &'static str,
}

impl RegistrationReceipt {
    pub fn registered(profile: &StudentProfile) -> Self {
        Self {
            student_id: profile.student_id.clone(),
            status: "registered",
        }
    }
}
