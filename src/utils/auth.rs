use axum::{
    async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::domain::department::entity::department;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_access_token, Claims};

/// Extractor carrying the authenticated caller's claims.
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// User id from the JWT subject.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid user id in token.".to_string()))
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == "admin"
    }

    pub fn is_hod(&self) -> bool {
        self.0.role == "hod"
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Authentication required.".to_string()))?;

        let auth_header_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Malformed Authorization header.".to_string()))?;

        let token = auth_header_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Malformed bearer token.".to_string()))?;

        let claims = decode_access_token(token, &state.config.jwt_secret)?;

        Ok(AuthUser(claims))
    }
}

/// The department a caller is authorized to manage.
///
/// Resolution rules:
/// - `hod` callers manage the department whose `head_id` is their user id.
/// - `admin` callers must name the target via the `departmentId` query
///   parameter.
/// - every other role is rejected before any mutation is attempted.
pub struct DepartmentScope {
    pub department: department::Model,
    pub caller: AuthUser,
}

#[async_trait]
impl FromRequestParts<AppState> for DepartmentScope {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = AuthUser::from_request_parts(parts, state).await?;

        let department = if caller.is_admin() {
            let department_id = query_param(parts, "departmentId").ok_or_else(|| {
                AppError::ValidationError(
                    "departmentId query parameter is required for admin callers.".to_string(),
                )
            })?;
            let department_id: i64 = department_id.parse().map_err(|_| {
                AppError::ValidationError("departmentId must be an integer.".to_string())
            })?;

            department::Entity::find_by_id(department_id)
                .one(&*state.db)
                .await?
                .ok_or_else(|| {
                    AppError::DepartmentNotFound("Department not found.".to_string())
                })?
        } else if caller.is_hod() {
            department::Entity::find()
                .filter(department::Column::HeadId.eq(caller.user_id()?))
                .one(&*state.db)
                .await?
                .ok_or_else(|| {
                    AppError::NotDepartmentHead(
                        "You are not the head of any department.".to_string(),
                    )
                })?
        } else {
            return Err(AppError::Forbidden(
                "Only department heads or admins may manage department teachers.".to_string(),
            ));
        };

        Ok(DepartmentScope { department, caller })
    }
}

/// Pull a single value out of the raw query string.
fn query_param(parts: &Parts, name: &str) -> Option<String> {
    let query = parts.uri.query()?;
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix(&format!("{}=", name)) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
