//! Student registration. Purely administrative; nothing here feeds the
//! admissions engine.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub(crate) mod validation;


pub use domain::{Gender, RegistrationSubmission, StudentId, StudentProfile};
pub use repository::{RegistrationReceipt, RepositoryError, StudentRepository};
pub use router::registration_router;
pub use service::{RegistrationError, RegistrationService};
pub use validation::RegistrationViolation;
