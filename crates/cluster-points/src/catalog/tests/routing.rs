use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::catalog::router::{check_handler, create_handler, list_handler};
use crate::catalog::{catalog_router, CatalogService, CourseCheckRequest};

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn create_handler_returns_created_record() {
    let service = build_service();

    let response =
        create_handler::<MemoryRepository>(State(service), axum::Json(law_form())).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], 1);
    assert_eq!(payload["name"], "Bachelor of Laws");
    assert_eq!(payload["universities"][0]["cutoff"], 43.5);
}

#[tokio::test]
async fn create_handler_rejects_invalid_form() {
    let service = build_service();
    let mut form = law_form();
    form.name = String::new();

    let response = create_handler::<MemoryRepository>(State(service), axum::Json(form)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "course name is required");
}

#[tokio::test]
async fn list_handler_returns_internal_error_when_store_is_down() {
    let service = Arc::new(CatalogService::new(Arc::new(UnavailableRepository)));

    let response = list_handler::<UnavailableRepository>(State(service)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn check_handler_returns_not_found_for_unknown_course() {
    let service = build_service();
    let request = CourseCheckRequest {
        cluster: 4,
        course_name: "Bachelor of Architecture".to_string(),
        points: 40.0,
        grades: sample_grades(),
    };

    let response = check_handler::<MemoryRepository>(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn programme_routes_cover_the_admin_lifecycle() {
    let router = catalog_router(build_service());

    let created = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/programmes",
            serde_json::to_value(law_form()).unwrap(),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let updated = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/programmes/1",
            json!({
                "name": "Bachelor of Laws",
                "cluster": 1,
                "requirements": "ENG: A-",
                "universities": "Moi University",
                "cutoffs": "39.9",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let payload = read_json_body(updated).await;
    assert_eq!(payload["requirements"][0]["minimum_grade"], "A-");
    assert_eq!(payload["universities"][0]["name"], "Moi University");

    let fetched = router
        .clone()
        .oneshot(
            Request::get("/api/v1/programmes/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);

    let deleted = router
        .clone()
        .oneshot(
            Request::delete("/api/v1/programmes/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = router
        .oneshot(
            Request::get("/api/v1/programmes/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn import_route_loads_csv_and_lists_by_cluster() {
    let router = catalog_router(build_service());

    let imported = router
        .clone()
        .oneshot(
            Request::post("/api/v1/programmes/import")
                .header(header::CONTENT_TYPE, "text/csv")
                .body(Body::from(CATALOG_CSV))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(imported.status(), StatusCode::OK);
    let payload = read_json_body(imported).await;
    assert_eq!(payload["summary"]["courses"], 2);
    assert_eq!(payload["report"]["imported"], 1);
    assert_eq!(payload["report"]["skipped"], 1);

    let listed = router
        .clone()
        .oneshot(Request::get("/api/v1/programmes").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let payload = read_json_body(listed).await;
    assert_eq!(payload["13"][0]["name"], "Bachelor of Science (Nursing)");
    assert_eq!(payload["1"], json!([]));

    let checked = router
        .oneshot(json_request(
            "POST",
            "/api/v1/programmes/check",
            json!({
                "cluster": 13,
                "course_name": "Bachelor of Science (Nursing)",
                "points": 41.0,
                "grades": {"BIO": "B", "CHE": "C+"},
            }),
        ))
        .await
        .unwrap();
    assert_eq!(checked.status(), StatusCode::OK);
    let payload = read_json_body(checked).await;
    assert_eq!(payload["subject_check"]["passed"], true);
    assert_eq!(payload["qualified"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn import_route_rejects_csv_without_courses() {
    let router = catalog_router(build_service());

    let response = router
        .oneshot(
            Request::post("/api/v1/programmes/import")
                .body(Body::from(
                    "COURSE NAME,CLUSTER,COURSE CODE,UNIVERSITY,CUT-OFF POINTS,MINIMUM SUBJECT REQUIREMENTS\n",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
