pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::health::handler::health_check,
        domain::assignment::handler::assign_teachers,
        domain::assignment::handler::remove_teachers,
        domain::assignment::handler::list_department_teachers,
        domain::assignment::handler::list_teacher_departments,
        domain::department::handler::create_department,
        domain::department::handler::list_departments,
        domain::department::handler::get_department,
        domain::department::handler::update_department,
        domain::department::handler::delete_department,
    ),
    components(
        schemas(
            domain::assignment::dto::AssignTeachersRequest,
            domain::assignment::dto::RemoveTeachersRequest,
            domain::assignment::dto::DepartmentMembershipItem,
            domain::assignment::dto::AssignedTeacherItem,
            domain::assignment::dto::BatchAssignResponse,
            domain::assignment::dto::BatchRemoveResponse,
            domain::assignment::dto::DepartmentTeacherItem,
            domain::assignment::dto::SuccessBatchAssignResponse,
            domain::assignment::dto::SuccessBatchRemoveResponse,
            domain::assignment::dto::SuccessDepartmentTeachersResponse,
            domain::assignment::dto::SuccessTeacherDepartmentsResponse,
            domain::department::dto::CreateDepartmentRequest,
            domain::department::dto::UpdateDepartmentRequest,
            domain::department::dto::DepartmentResponse,
            domain::department::dto::SuccessDepartmentResponse,
            domain::department::dto::SuccessDepartmentListResponse,
            domain::health::dto::HealthStatus,
            utils::response::ErrorResponse,
        )
    ),
    tags(
        (name = "Assignment", description = "Teacher↔Department assignment APIs"),
        (name = "Department", description = "Department administration APIs"),
        (name = "Health", description = "Liveness APIs")
    )
)]
pub struct ApiDoc;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(domain::health::health_check))
        // Teacher↔Department registry
        .route(
            "/api/v1/hod/teachers/assign",
            post(domain::assignment::handler::assign_teachers),
        )
        .route(
            "/api/v1/hod/teachers/remove",
            post(domain::assignment::handler::remove_teachers),
        )
        .route(
            "/api/v1/hod/teachers",
            get(domain::assignment::handler::list_department_teachers),
        )
        .route(
            "/api/v1/hod/teachers/:teacher_id/departments",
            get(domain::assignment::handler::list_teacher_departments),
        )
        // Department administration
        .route(
            "/api/v1/departments",
            post(domain::department::handler::create_department)
                .get(domain::department::handler::list_departments),
        )
        .route(
            "/api/v1/departments/:department_id",
            get(domain::department::handler::get_department)
                .put(domain::department::handler::update_department)
                .delete(domain::department::handler::delete_department),
        )
        .layer(middleware::from_fn(global::middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
