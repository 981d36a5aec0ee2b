use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::department;

/// Request body for `POST /api/v1/departments`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "code must be 1-20 characters"))]
    pub code: String,
    /// Optional Head of Department; must reference a user with role `hod`.
    pub head_id: Option<i64>,
}

/// Request body for `PUT /api/v1/departments/{department_id}`.
/// Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 20, message = "code must be 1-20 characters"))]
    pub code: Option<String>,
    /// New Head of Department; must reference a user with role `hod`.
    pub head_id: Option<i64>,
}

/// Department representation returned by every department endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub department_id: i64,
    pub name: String,
    pub code: String,
    pub head_id: Option<i64>,
    pub teacher_count: u64,
}

impl DepartmentResponse {
    pub fn from_model(model: department::Model, teacher_count: u64) -> Self {
        Self {
            department_id: model.department_id,
            name: model.name,
            code: model.code,
            head_id: model.head_id,
            teacher_count,
        }
    }
}

/// Swagger-only success wrapper for single-department endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessDepartmentResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: DepartmentResponse,
}

/// Swagger-only success wrapper for the department list endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessDepartmentListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<DepartmentResponse>,
}
