use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::entity::user::UserStatus;

/// Request body for `POST /api/v1/hod/teachers/assign`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignTeachersRequest {
    /// Teacher ids to assign to the scoped department.
    #[validate(length(min = 1, message = "teachers must contain at least one id"))]
    pub teachers: Vec<i64>,
    /// When true, the scoped department becomes each teacher's primary
    /// department.
    #[serde(default)]
    pub set_primary: bool,
}

/// Request body for `POST /api/v1/hod/teachers/remove`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTeachersRequest {
    #[validate(length(min = 1, message = "teachers must contain at least one id"))]
    pub teachers: Vec<i64>,
}

/// One department a teacher belongs to, as seen from the teacher side.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentMembershipItem {
    pub department_id: i64,
    pub name: String,
    pub code: String,
    pub is_primary: bool,
}

/// One successfully assigned teacher in a batch result.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTeacherItem {
    pub teacher_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub is_primary: bool,
}

/// Batch assignment outcome: per-item failures never abort the batch,
/// successes and errors are reported side by side.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchAssignResponse {
    pub assigned: Vec<AssignedTeacherItem>,
    pub errors: Vec<String>,
}

/// Batch removal outcome, same dual-list contract as assignment.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchRemoveResponse {
    pub removed: Vec<i64>,
    pub errors: Vec<String>,
}

/// One teacher in a department roster, enriched with their full
/// membership view.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentTeacherItem {
    pub teacher_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: UserStatus,
    pub departments: Vec<DepartmentMembershipItem>,
    pub primary_department: Option<DepartmentMembershipItem>,
    pub total_departments: usize,
}

/// Swagger-only success wrapper for the teacher roster endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessDepartmentTeachersResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<DepartmentTeacherItem>,
}

/// Swagger-only success wrapper for the teacher membership endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessTeacherDepartmentsResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<DepartmentMembershipItem>,
}

/// Swagger-only success wrapper for the batch assign endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBatchAssignResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: BatchAssignResponse,
}

/// Swagger-only success wrapper for the batch remove endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBatchRemoveResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: BatchRemoveResponse,
}
