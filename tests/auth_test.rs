//! Auth and error envelope tests
//!
//! Covers:
//! - Access-token round trip with the role claim
//! - AppError status / code mapping for the documented error taxonomy
//! - ErrorResponse envelope shape

use axum::http::StatusCode;
use serde_json::Value;

use smis_server::utils::auth::AuthUser;
use smis_server::utils::error::AppError;
use smis_server::utils::jwt::{decode_access_token, encode_access_token};
use smis_server::utils::response::ErrorResponse;

const SECRET: &str = "test-secret";

// ============== JWT tests ==============

#[test]
fn should_round_trip_hod_access_token() {
    // Arrange & Act
    let token = encode_access_token("5".to_string(), "hod".to_string(), SECRET, 3600).unwrap();
    let claims = decode_access_token(&token, SECRET).unwrap();

    // Assert
    assert_eq!(claims.sub, "5");
    assert_eq!(claims.role, "hod");
}

#[test]
fn should_expose_caller_id_for_audit_logging() {
    // Arrange - the claims a mutation handler receives via DepartmentScope
    let token = encode_access_token("5".to_string(), "hod".to_string(), SECRET, 3600).unwrap();
    let caller = AuthUser(decode_access_token(&token, SECRET).unwrap());

    // Act & Assert - numeric subject resolves, role helpers agree
    assert_eq!(caller.user_id().unwrap(), 5);
    assert!(caller.is_hod());
    assert!(!caller.is_admin());
}

#[test]
fn should_reject_non_numeric_subject() {
    let token =
        encode_access_token("not-a-number".to_string(), "hod".to_string(), SECRET, 3600).unwrap();
    let caller = AuthUser(decode_access_token(&token, SECRET).unwrap());

    assert!(matches!(
        caller.user_id(),
        Err(AppError::Unauthorized(_))
    ));
}

#[test]
fn should_reject_tampered_token() {
    let token = encode_access_token("5".to_string(), "admin".to_string(), SECRET, 3600).unwrap();
    let mut tampered = token.clone();
    tampered.push('x');

    assert!(decode_access_token(&tampered, SECRET).is_err());
}

// ============== Error taxonomy tests ==============

#[test]
fn should_map_not_found_errors_to_404() {
    let department = AppError::DepartmentNotFound("Department not found.".to_string());
    let teacher = AppError::TeacherNotFound("Teacher not found.".to_string());

    assert_eq!(department.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(department.error_code(), "DEPT4041");
    assert_eq!(teacher.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(teacher.error_code(), "TEACHER4042");
}

#[test]
fn should_map_validation_errors_to_400() {
    let error = AppError::ValidationError("teachers must contain at least one id".to_string());

    assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error.error_code(), "COMMON400");
}

#[test]
fn should_map_authorization_errors_to_403() {
    let forbidden = AppError::Forbidden("not allowed".to_string());
    let not_head = AppError::NotDepartmentHead("not a head".to_string());

    assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(not_head.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(not_head.error_code(), "DEPT4031");
}

#[test]
fn should_map_storage_errors_to_500() {
    let error = AppError::InternalError("connection reset".to_string());

    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error.error_code(), "COMMON500");
}

#[test]
fn should_serialize_error_envelope_in_camel_case() {
    // Arrange
    let response = ErrorResponse::new("DEPT4041", "Department not found.");

    // Act
    let parsed: Value = serde_json::to_value(&response).unwrap();

    // Assert
    assert_eq!(parsed["isSuccess"], false);
    assert_eq!(parsed["code"], "DEPT4041");
    assert_eq!(parsed["message"], "Department not found.");
    assert_eq!(parsed["result"], Value::Null);
}
