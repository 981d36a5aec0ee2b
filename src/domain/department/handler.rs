use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use super::dto::{
    CreateDepartmentRequest, DepartmentResponse, SuccessDepartmentListResponse,
    SuccessDepartmentResponse, UpdateDepartmentRequest,
};
use super::service::DepartmentService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

fn require_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins may manage departments.".to_string(),
        ));
    }
    Ok(())
}

/// Create a department (admin only).
#[utoipa::path(
    post,
    path = "/api/v1/departments",
    request_body = CreateDepartmentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Department created", body = SuccessDepartmentResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Duplicate department code", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn create_department(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateDepartmentRequest>,
) -> Result<Json<BaseResponse<DepartmentResponse>>, AppError> {
    require_admin(&user)?;
    req.validate()?;

    let result = DepartmentService::create(&state, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// List all departments (admin only).
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Department list", body = SuccessDepartmentListResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn list_departments(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<Vec<DepartmentResponse>>>, AppError> {
    require_admin(&user)?;

    let result = DepartmentService::list(&state).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Fetch one department (admin only).
#[utoipa::path(
    get,
    path = "/api/v1/departments/{department_id}",
    params(
        ("department_id" = i64, Path, description = "Department id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Department returned", body = SuccessDepartmentResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn get_department(
    State(state): State<AppState>,
    user: AuthUser,
    Path(department_id): Path<i64>,
) -> Result<Json<BaseResponse<DepartmentResponse>>, AppError> {
    require_admin(&user)?;

    let result = DepartmentService::get(&state, department_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Update a department (admin only).
#[utoipa::path(
    put,
    path = "/api/v1/departments/{department_id}",
    request_body = UpdateDepartmentRequest,
    params(
        ("department_id" = i64, Path, description = "Department id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Department updated", body = SuccessDepartmentResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 409, description = "Duplicate department code", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn update_department(
    State(state): State<AppState>,
    user: AuthUser,
    Path(department_id): Path<i64>,
    Json(req): Json<UpdateDepartmentRequest>,
) -> Result<Json<BaseResponse<DepartmentResponse>>, AppError> {
    require_admin(&user)?;
    req.validate()?;

    let result = DepartmentService::update(&state, department_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Delete a department and clean up references to it (admin only).
#[utoipa::path(
    delete,
    path = "/api/v1/departments/{department_id}",
    params(
        ("department_id" = i64, Path, description = "Department id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Department deleted"),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn delete_department(
    State(state): State<AppState>,
    user: AuthUser,
    Path(department_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    require_admin(&user)?;

    DepartmentService::delete(&state, department_id).await?;

    Ok(Json(BaseResponse::success_with_message(
        "Department deleted successfully.",
        (),
    )))
}
