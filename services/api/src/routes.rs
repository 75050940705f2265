use crate::infra::{AppState, InMemoryStudentRepository, SharedCatalog};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use college_predictor::admissions::admissions_router;
use college_predictor::registration::{registration_router, RegistrationService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_service_routes(
    catalog: SharedCatalog,
    registrations: Arc<RegistrationService<InMemoryStudentRepository>>,
) -> axum::Router {
    admissions_router(catalog)
        .merge(registration_router(registrations))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let listening = state.readiness.load(Ordering::Relaxed);
    let loaded = state.catalog.is_loaded();

    let (status, payload) = match (listening, loaded) {
        (true, true) => (StatusCode::OK, json!({ "status": "ready" })),
        (false, _) => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "status": "initializing" }),
        ),
        (true, false) => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "status": "dataset_unavailable" }),
        ),
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
