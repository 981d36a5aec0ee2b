use axum::{extract::State, http::StatusCode, Json};

use super::dto::{HealthState, HealthStatus};
use super::service::HealthService;
use crate::state::AppState;
use crate::utils::BaseResponse;

/// Liveness/readiness endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthStatus),
        (status = 503, description = "A dependency is down", body = HealthStatus)
    ),
    tag = "Health"
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<BaseResponse<HealthStatus>>) {
    let status = HealthService::status(&state).await;

    let http_status = match status.status {
        HealthState::Healthy => StatusCode::OK,
        HealthState::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (http_status, Json(BaseResponse::success(status)))
}
