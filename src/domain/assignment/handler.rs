use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;
use validator::Validate;

use super::dto::{
    AssignTeachersRequest, BatchAssignResponse, BatchRemoveResponse, DepartmentMembershipItem,
    DepartmentTeacherItem, RemoveTeachersRequest, SuccessBatchAssignResponse,
    SuccessBatchRemoveResponse, SuccessDepartmentTeachersResponse,
    SuccessTeacherDepartmentsResponse,
};
use super::service::AssignmentService;
use crate::state::AppState;
use crate::utils::auth::{AuthUser, DepartmentScope};
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

/// Batch-assign teachers to the caller's department.
///
/// HOD callers are scoped to the department they head; admins pass an
/// explicit `departmentId` query parameter. Invalid ids are reported
/// per-item without aborting the batch.
#[utoipa::path(
    post,
    path = "/api/v1/hod/teachers/assign",
    request_body = AssignTeachersRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Batch processed", body = SuccessBatchAssignResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 403, description = "Caller is not an HOD or admin", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Assignment"
)]
pub async fn assign_teachers(
    State(state): State<AppState>,
    scope: DepartmentScope,
    Json(req): Json<AssignTeachersRequest>,
) -> Result<Json<BaseResponse<BatchAssignResponse>>, AppError> {
    req.validate()?;

    let caller_id = scope.caller.user_id()?;
    info!(
        caller_id = caller_id,
        caller_role = %scope.caller.0.role,
        department_id = scope.department.department_id,
        teacher_count = req.teachers.len(),
        "batch assign requested"
    );

    let result = AssignmentService::assign_many(
        &state,
        scope.department.department_id,
        &req.teachers,
        req.set_primary,
    )
    .await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Batch-remove teachers from the caller's department.
///
/// Ids that were never assigned show up in the `errors` list, not as
/// silent successes.
#[utoipa::path(
    post,
    path = "/api/v1/hod/teachers/remove",
    request_body = RemoveTeachersRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Batch processed", body = SuccessBatchRemoveResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 403, description = "Caller is not an HOD or admin", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Assignment"
)]
pub async fn remove_teachers(
    State(state): State<AppState>,
    scope: DepartmentScope,
    Json(req): Json<RemoveTeachersRequest>,
) -> Result<Json<BaseResponse<BatchRemoveResponse>>, AppError> {
    req.validate()?;

    let caller_id = scope.caller.user_id()?;
    info!(
        caller_id = caller_id,
        caller_role = %scope.caller.0.role,
        department_id = scope.department.department_id,
        teacher_count = req.teachers.len(),
        "batch remove requested"
    );

    let result = AssignmentService::remove_many(
        &state,
        scope.department.department_id,
        &req.teachers,
    )
    .await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Roster of the caller's department, each teacher enriched with their
/// full membership view.
#[utoipa::path(
    get,
    path = "/api/v1/hod/teachers",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Roster returned", body = SuccessDepartmentTeachersResponse),
        (status = 403, description = "Caller is not an HOD or admin", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Assignment"
)]
pub async fn list_department_teachers(
    State(state): State<AppState>,
    scope: DepartmentScope,
) -> Result<Json<BaseResponse<Vec<DepartmentTeacherItem>>>, AppError> {
    let result =
        AssignmentService::list_teachers_for_department(&state, scope.department.department_id)
            .await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Departments a teacher belongs to, with the primary flag.
#[utoipa::path(
    get,
    path = "/api/v1/hod/teachers/{teacher_id}/departments",
    params(
        ("teacher_id" = i64, Path, description = "Teacher id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Membership list returned", body = SuccessTeacherDepartmentsResponse),
        (status = 403, description = "Caller is not an HOD or admin", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Assignment"
)]
pub async fn list_teacher_departments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(teacher_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<DepartmentMembershipItem>>>, AppError> {
    if !user.is_hod() && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only department heads or admins may view teacher memberships.".to_string(),
        ));
    }

    let result = AssignmentService::list_departments_for_teacher(&state, teacher_id).await?;

    Ok(Json(BaseResponse::success(result)))
}
