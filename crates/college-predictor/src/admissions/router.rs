use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::catalog::AdmissionCatalog;
use super::dataset::DatasetProvider;
use super::query::{BrowseQuery, PredictionRequest};
use super::score::SubjectMarks;
use crate::error::AppError;

/// Router exposing prediction, browse and filter-option endpoints.
pub fn admissions_router<P>(catalog: Arc<AdmissionCatalog<P>>) -> Router
where
    P: DatasetProvider + 'static,
{
    Router::new()
        .route("/api/v1/filters", get(filters_handler::<P>))
        .route("/api/v1/categories", get(categories_handler::<P>))
        .route("/api/v1/branches", get(branches_handler::<P>))
        .route("/api/v1/districts", get(districts_handler::<P>))
        .route("/api/v1/colleges", get(colleges_handler::<P>))
        .route("/api/v1/records", get(records_handler::<P>))
        .route("/api/v1/score", post(score_handler))
        .route("/api/v1/predict", post(predict_handler::<P>))
        .route("/api/v1/dataset/reload", post(reload_handler::<P>))
        .with_state(catalog)
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: f64,
    pub display: String,
}

fn error_response(error: impl Into<AppError>) -> Response {
    error.into().into_response()
}

pub(crate) async fn filters_handler<P>(State(catalog): State<Arc<AdmissionCatalog<P>>>) -> Response
where
    P: DatasetProvider + 'static,
{
    match catalog.options() {
        Ok(options) => (StatusCode::OK, Json(options)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn categories_handler<P>(
    State(catalog): State<Arc<AdmissionCatalog<P>>>,
) -> Response
where
    P: DatasetProvider + 'static,
{
    match catalog.options() {
        Ok(options) => Json(json!({ "categories": options.categories })).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn branches_handler<P>(State(catalog): State<Arc<AdmissionCatalog<P>>>) -> Response
where
    P: DatasetProvider + 'static,
{
    match catalog.options() {
        Ok(options) => Json(json!({ "branches": options.branches })).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn districts_handler<P>(
    State(catalog): State<Arc<AdmissionCatalog<P>>>,
) -> Response
where
    P: DatasetProvider + 'static,
{
    match catalog.options() {
        Ok(options) => Json(json!({ "districts": options.districts })).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn colleges_handler<P>(
    State(catalog): State<Arc<AdmissionCatalog<P>>>,
    Query(query): Query<BrowseQuery>,
) -> Response
where
    P: DatasetProvider + 'static,
{
    match catalog.browse_colleges(&query) {
        Ok(colleges) => Json(json!({ "colleges": colleges })).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn records_handler<P>(
    State(catalog): State<Arc<AdmissionCatalog<P>>>,
    Query(query): Query<BrowseQuery>,
) -> Response
where
    P: DatasetProvider + 'static,
{
    match catalog.browse_records(&query) {
        Ok(records) => Json(json!({ "records": records })).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler(Json(marks): Json<SubjectMarks>) -> Json<ScoreResponse> {
    let score = marks.score();
    Json(ScoreResponse {
        score: score.value(),
        display: score.to_string(),
    })
}

pub(crate) async fn predict_handler<P>(
    State(catalog): State<Arc<AdmissionCatalog<P>>>,
    Json(request): Json<PredictionRequest>,
) -> Response
where
    P: DatasetProvider + 'static,
{
    match catalog.predict(&request) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reload_handler<P>(State(catalog): State<Arc<AdmissionCatalog<P>>>) -> Response
where
    P: DatasetProvider + 'static,
{
    match tokio::task::spawn_blocking(move || catalog.load()).await {
        Ok(Ok(dataset)) => {
            let payload = json!({
                "status": "reloaded",
                "records": dataset.len(),
                "loaded_at": dataset.loaded_at(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Ok(Err(error)) => error_response(error),
        Err(join_error) => {
            let payload = json!({ "error": join_error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
