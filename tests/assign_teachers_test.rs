//! Batch teacher assignment tests
//!
//! Covers:
//! - POST /api/v1/hod/teachers/assign
//! - AssignTeachersRequest deserialization (camelCase, setPrimary default)
//! - BatchAssignResponse dual-list serialization
//! - Continue-on-per-item-failure batch contract

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::post,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use validator::Validate;

use smis_server::domain::assignment::dto::{
    AssignTeachersRequest, AssignedTeacherItem, BatchAssignResponse,
};

// ============== DTO tests ==============

#[test]
fn should_deserialize_request_with_camel_case_set_primary() {
    // Arrange
    let body = json!({ "teachers": [7, 12], "setPrimary": true });

    // Act
    let req: AssignTeachersRequest = serde_json::from_value(body).unwrap();

    // Assert
    assert_eq!(req.teachers, vec![7, 12]);
    assert!(req.set_primary);
}

#[test]
fn should_default_set_primary_to_false() {
    let body = json!({ "teachers": [7] });

    let req: AssignTeachersRequest = serde_json::from_value(body).unwrap();

    assert!(!req.set_primary);
}

#[test]
fn should_reject_empty_teacher_list() {
    let body = json!({ "teachers": [] });

    let req: AssignTeachersRequest = serde_json::from_value(body).unwrap();

    assert!(req.validate().is_err());
}

#[test]
fn should_serialize_batch_result_with_both_lists() {
    // Arrange - scenario: teacher 7 assigned, 99999 invalid
    let result = BatchAssignResponse {
        assigned: vec![AssignedTeacherItem {
            teacher_id: 7,
            first_name: "Jane".to_string(),
            last_name: "Mwangi".to_string(),
            is_primary: false,
        }],
        errors: vec!["Invalid teacher ID: 99999".to_string()],
    };

    // Act
    let json = serde_json::to_string(&result).unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();

    // Assert - camelCase keys, both lists present
    let assigned = parsed["assigned"].as_array().unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0]["teacherId"], 7);
    assert_eq!(assigned[0]["firstName"], "Jane");
    assert_eq!(assigned[0]["isPrimary"], false);
    assert!(assigned[0].get("teacher_id").is_none());

    let errors = parsed["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], "Invalid teacher ID: 99999");
}

// ============== Route-level tests (DB-less stub router) ==============

/// Test router replicating the assign endpoint's validation and batch
/// semantics without a database.
fn create_test_router() -> Router {
    Router::new().route("/api/v1/hod/teachers/assign", post(assign_handler))
}

/// Known teachers in the stub: 7 and 12.
async fn assign_handler(
    headers: axum::http::HeaderMap,
    body: Option<axum::Json<Value>>,
) -> (StatusCode, axum::Json<Value>) {
    if headers.get(header::AUTHORIZATION).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({
                "isSuccess": false,
                "code": "AUTH4001",
                "message": "Authentication required.",
                "result": null
            })),
        );
    }

    let Some(axum::Json(body)) = body else {
        return (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "isSuccess": false,
                "code": "COMMON400",
                "message": "Malformed request body.",
                "result": null
            })),
        );
    };

    let teachers = match body.get("teachers").and_then(|t| t.as_array()) {
        Some(teachers) if !teachers.is_empty() => teachers.clone(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({
                    "isSuccess": false,
                    "code": "COMMON400",
                    "message": "teachers must contain at least one id",
                    "result": null
                })),
            );
        }
    };

    let mut assigned = Vec::new();
    let mut errors = Vec::new();
    for id in teachers.iter().filter_map(|v| v.as_i64()) {
        if id == 7 || id == 12 {
            assigned.push(json!({ "teacherId": id }));
        } else {
            errors.push(format!("Invalid teacher ID: {}", id));
        }
    }

    (
        StatusCode::OK,
        axum::Json(json!({
            "isSuccess": true,
            "code": "COMMON200",
            "message": "Success.",
            "result": { "assigned": assigned, "errors": errors }
        })),
    )
}

async fn parse_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn assign_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/hod/teachers/assign")
        .header("Content-Type", "application/json")
        .header(header::AUTHORIZATION, "Bearer test-token")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn should_report_invalid_ids_without_aborting_batch() {
    // Arrange
    let app = create_test_router();
    let request = assign_request(json!({ "teachers": [7, 99999] }));

    // Act
    let response = app.oneshot(request).await.unwrap();

    // Assert - one assigned, one per-item error, HTTP 200
    assert_eq!(response.status(), StatusCode::OK);
    let parsed = parse_body(response.into_body()).await;
    assert_eq!(parsed["isSuccess"], true);
    assert_eq!(parsed["result"]["assigned"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["result"]["assigned"][0]["teacherId"], 7);
    assert_eq!(
        parsed["result"]["errors"][0],
        "Invalid teacher ID: 99999"
    );
}

#[tokio::test]
async fn should_reject_empty_teacher_list_with_400() {
    let app = create_test_router();
    let request = assign_request(json!({ "teachers": [] }));

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = parse_body(response.into_body()).await;
    assert_eq!(parsed["isSuccess"], false);
    assert_eq!(parsed["code"], "COMMON400");
}

#[tokio::test]
async fn should_require_authentication() {
    let app = create_test_router();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/hod/teachers/assign")
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "teachers": [7] }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
