use crate::infra::AppState;
use crate::report::{build_cluster_report, ClusterReport};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use cluster_points::catalog::catalog_router;
use cluster_points::eligibility::{check_requirements, EligibilityVerdict, Requirement};
use cluster_points::error::AppError;
use cluster_points::scoring::{subject_catalog, RawGrades, SubjectEntry};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct ClusterRequest {
    #[serde(default)]
    pub(crate) grades: RawGrades,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityRequest {
    #[serde(default)]
    pub(crate) grades: RawGrades,
    #[serde(default)]
    pub(crate) requirements: Vec<Requirement>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityResponse {
    #[serde(flatten)]
    pub(crate) verdict: EligibilityVerdict,
    pub(crate) messages: Vec<String>,
}

pub(crate) fn with_api_routes(state: &AppState) -> axum::Router {
    catalog_router(state.catalog.clone())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/subjects", axum::routing::get(subjects_endpoint))
        .route("/api/v1/clusters", axum::routing::post(clusters_endpoint))
        .route(
            "/api/v1/eligibility",
            axum::routing::post(eligibility_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
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

pub(crate) async fn subjects_endpoint() -> Json<Vec<SubjectEntry>> {
    Json(subject_catalog())
}

/// Scores every cluster and lists the stored programmes under each one.
pub(crate) async fn clusters_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ClusterRequest>,
) -> Result<Json<ClusterReport>, AppError> {
    let programmes = state.catalog.names_by_cluster()?;
    let report = build_cluster_report(&payload.grades, &programmes);
    debug!(
        subjects = payload.grades.len(),
        medicine_eligible = report.medicine_eligible,
        "cluster points computed"
    );
    Ok(Json(report))
}

pub(crate) async fn eligibility_endpoint(
    Json(payload): Json<EligibilityRequest>,
) -> Json<EligibilityResponse> {
    let verdict = check_requirements(&payload.grades, &payload.requirements);
    let messages = verdict.failed.iter().map(|failure| failure.summary()).collect();
    Json(EligibilityResponse { verdict, messages })
}
