use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ProgrammeForm, ProgrammeId};
use super::importer::{CatalogImporter, CatalogSummary};
use super::repository::{ProgrammeRepository, RepositoryError};
use super::service::{CatalogService, CatalogServiceError, ImportReport};
use crate::scoring::RawGrades;

/// Body of a course qualification check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCheckRequest {
    pub cluster: u32,
    pub course_name: String,
    pub points: f64,
    #[serde(default)]
    pub grades: RawGrades,
}

#[derive(Debug, Serialize)]
struct ImportResponse {
    summary: CatalogSummary,
    report: ImportReport,
}

/// Router exposing programme administration, CSV import and course checks.
pub fn catalog_router<R>(service: Arc<CatalogService<R>>) -> Router
where
    R: ProgrammeRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/programmes",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route("/api/v1/programmes/import", post(import_handler::<R>))
        .route("/api/v1/programmes/check", post(check_handler::<R>))
        .route(
            "/api/v1/programmes/:programme_id",
            get(fetch_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<CatalogService<R>>>) -> Response
where
    R: ProgrammeRepository + 'static,
{
    match service.by_cluster() {
        Ok(grouped) => (StatusCode::OK, axum::Json(grouped)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    axum::Json(form): axum::Json<ProgrammeForm>,
) -> Response
where
    R: ProgrammeRepository + 'static,
{
    match service.create(form) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(programme_id): Path<u64>,
) -> Response
where
    R: ProgrammeRepository + 'static,
{
    match service.get(ProgrammeId(programme_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(programme_id): Path<u64>,
    axum::Json(form): axum::Json<ProgrammeForm>,
) -> Response
where
    R: ProgrammeRepository + 'static,
{
    match service.update(ProgrammeId(programme_id), form) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(programme_id): Path<u64>,
) -> Response
where
    R: ProgrammeRepository + 'static,
{
    match service.delete(ProgrammeId(programme_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(other) => error_response(other),
    }
}

/// Accepts the raw CSV export as the request body.
pub(crate) async fn import_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    body: String,
) -> Response
where
    R: ProgrammeRepository + 'static,
{
    let catalog = match CatalogImporter::from_reader(body.as_bytes()) {
        Ok(catalog) => catalog,
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let summary = CatalogSummary::of(&catalog);
    match service.import(catalog) {
        Ok(report) => (
            StatusCode::OK,
            axum::Json(ImportResponse { summary, report }),
        )
            .into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn check_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    axum::Json(request): axum::Json<CourseCheckRequest>,
) -> Response
where
    R: ProgrammeRepository + 'static,
{
    match service.check_course(
        request.cluster,
        &request.course_name,
        request.points,
        &request.grades,
    ) {
        Ok(check) => (StatusCode::OK, axum::Json(check)).into_response(),
        Err(other) => error_response(other),
    }
}

fn error_response(error: CatalogServiceError) -> Response {
    let status = match &error {
        CatalogServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogServiceError::Repository(RepositoryError::NotFound)
        | CatalogServiceError::CourseNotFound { .. } => StatusCode::NOT_FOUND,
        CatalogServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
