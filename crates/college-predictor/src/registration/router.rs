use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::RegistrationSubmission;
use super::repository::{RegistrationReceipt, RepositoryError, StudentRepository};
use super::service::{RegistrationError, RegistrationService};

/// Router exposing the registration endpoint.
pub fn registration_router<R>(service: Arc<RegistrationService<R>>) -> Router
where
    R: StudentRepository + 'static,
{
    Router::new()
        .route("/api/v1/register", post(register_handler::<R>))
        .with_state(service)
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<RegistrationService<R>>>,
    axum::Json(submission): axum::Json<RegistrationSubmission>,
) -> Response
where
    R: StudentRepository + 'static,
{
    match service.register(submission) {
        Ok(profile) => {
            let receipt = RegistrationReceipt::registered(&profile);
            (StatusCode::CREATED, axum::Json(receipt)).into_response()
        }
        Err(RegistrationError::Invalid(violation)) => {
            let payload = json!({
                "error": violation.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "student already registered",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
