use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::domain::assignment::entity::teacher_department;
use crate::domain::department::entity::department;
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;

use super::dto::{CreateDepartmentRequest, DepartmentResponse, UpdateDepartmentRequest};

pub struct DepartmentService;

impl DepartmentService {
    /// Create a department. `code` is unique across departments.
    pub async fn create(
        state: &AppState,
        req: CreateDepartmentRequest,
    ) -> Result<DepartmentResponse, AppError> {
        // 1. Code must not collide.
        let duplicate = department::Entity::find()
            .filter(department::Column::Code.eq(req.code.clone()))
            .one(&*state.db)
            .await?;
        if duplicate.is_some() {
            return Err(AppError::DuplicateDepartmentCode(format!(
                "Department code '{}' already exists.",
                req.code
            )));
        }

        // 2. A named head must be an existing HOD user.
        if let Some(head_id) = req.head_id {
            Self::validate_head(state, head_id).await?;
        }

        let now = Utc::now().naive_utc();
        let model = department::ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            head_id: Set(req.head_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(&*state.db).await?;

        info!(
            department_id = created.department_id,
            code = %created.code,
            "department created"
        );

        Ok(DepartmentResponse::from_model(created, 0))
    }

    /// List all departments with their current teacher counts.
    pub async fn list(state: &AppState) -> Result<Vec<DepartmentResponse>, AppError> {
        let departments = department::Entity::find()
            .order_by_asc(department::Column::DepartmentId)
            .all(&*state.db)
            .await?;

        let mut result = Vec::with_capacity(departments.len());
        for model in departments {
            let teacher_count = Self::teacher_count(state, model.department_id).await?;
            result.push(DepartmentResponse::from_model(model, teacher_count));
        }

        Ok(result)
    }

    pub async fn get(
        state: &AppState,
        department_id: i64,
    ) -> Result<DepartmentResponse, AppError> {
        let model = Self::find_department(state, department_id).await?;
        let teacher_count = Self::teacher_count(state, department_id).await?;

        Ok(DepartmentResponse::from_model(model, teacher_count))
    }

    /// Update name, code or head. Absent fields are left unchanged.
    pub async fn update(
        state: &AppState,
        department_id: i64,
        req: UpdateDepartmentRequest,
    ) -> Result<DepartmentResponse, AppError> {
        let model = Self::find_department(state, department_id).await?;

        if let Some(code) = &req.code {
            let duplicate = department::Entity::find()
                .filter(department::Column::Code.eq(code.clone()))
                .filter(department::Column::DepartmentId.ne(department_id))
                .one(&*state.db)
                .await?;
            if duplicate.is_some() {
                return Err(AppError::DuplicateDepartmentCode(format!(
                    "Department code '{}' already exists.",
                    code
                )));
            }
        }

        if let Some(head_id) = req.head_id {
            Self::validate_head(state, head_id).await?;
        }

        let mut active: department::ActiveModel = model.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(code) = req.code {
            active.code = Set(code);
        }
        if let Some(head_id) = req.head_id {
            active.head_id = Set(Some(head_id));
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&*state.db).await?;
        let teacher_count = Self::teacher_count(state, department_id).await?;

        Ok(DepartmentResponse::from_model(updated, teacher_count))
    }

    /// Delete a department and clean up everything that points at it:
    /// membership rows and legacy primary pointers go in the same
    /// transaction, so no teacher is left referencing a dead department.
    pub async fn delete(state: &AppState, department_id: i64) -> Result<(), AppError> {
        let model = Self::find_department(state, department_id).await?;

        let txn = state.db.begin().await?;

        // 1. Membership rows of this department.
        teacher_department::Entity::delete_many()
            .filter(teacher_department::Column::DepartmentId.eq(department_id))
            .exec(&txn)
            .await?;

        // 2. Legacy primary pointers into this department.
        user::Entity::update_many()
            .col_expr(user::Column::DepartmentId, Expr::value(None::<i64>))
            .filter(user::Column::DepartmentId.eq(department_id))
            .exec(&txn)
            .await?;

        // 3. The department row itself.
        model.delete(&txn).await?;

        txn.commit().await?;

        info!(department_id = department_id, "department deleted");

        Ok(())
    }

    async fn find_department(
        state: &AppState,
        department_id: i64,
    ) -> Result<department::Model, AppError> {
        department::Entity::find_by_id(department_id)
            .one(&*state.db)
            .await?
            .ok_or_else(|| AppError::DepartmentNotFound("Department not found.".to_string()))
    }

    async fn teacher_count(state: &AppState, department_id: i64) -> Result<u64, AppError> {
        let count = teacher_department::Entity::find()
            .filter(teacher_department::Column::DepartmentId.eq(department_id))
            .count(&*state.db)
            .await?;

        Ok(count)
    }

    async fn validate_head(state: &AppState, head_id: i64) -> Result<(), AppError> {
        let head = user::Entity::find_by_id(head_id).one(&*state.db).await?;

        match head {
            Some(u) if u.role == user::UserRole::Hod => Ok(()),
            Some(_) => Err(AppError::ValidationError(
                "Department head must have the hod role.".to_string(),
            )),
            None => Err(AppError::UserNotFound("Head user not found.".to_string())),
        }
    }
}
