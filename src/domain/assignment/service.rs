use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::domain::assignment::entity::teacher_department;
use crate::domain::department::entity::department;
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;

use super::dto::{
    AssignedTeacherItem, BatchAssignResponse, BatchRemoveResponse, DepartmentMembershipItem,
    DepartmentTeacherItem,
};

/// Teacher↔Department registry.
///
/// Owns the membership relation and the primary-department designation.
/// Both sides of every write (membership row and the legacy
/// `users.department_id` pointer) go through one transaction, so the
/// derived views stay mutually consistent: a teacher appears in a
/// department's roster exactly when that department appears in the
/// teacher's membership list.
pub struct AssignmentService;

impl AssignmentService {
    /// Assign a teacher to a department.
    ///
    /// Idempotent on membership: assigning an existing member is not an
    /// error. With `set_primary`, the target department becomes the
    /// teacher's only primary department and the legacy pointer on the
    /// user row is rewritten in the same transaction.
    ///
    /// Returns whether a new membership row was created.
    pub async fn assign(
        state: &AppState,
        department_id: i64,
        teacher_id: i64,
        set_primary: bool,
    ) -> Result<bool, AppError> {
        // 1. Both endpoints must exist before anything is written.
        Self::find_department(state, department_id).await?;
        Self::find_teacher(state, teacher_id).await?;

        let txn = state.db.begin().await?;

        // 2. Membership insert, tolerant of a concurrent insert losing the
        //    race to the unique index.
        let existing = teacher_department::Entity::find()
            .filter(teacher_department::Column::TeacherId.eq(teacher_id))
            .filter(teacher_department::Column::DepartmentId.eq(department_id))
            .one(&txn)
            .await?;

        let newly_added = if existing.is_none() {
            let now = Utc::now().naive_utc();
            let membership = teacher_department::ActiveModel {
                teacher_id: Set(teacher_id),
                department_id: Set(department_id),
                is_primary: Set(set_primary),
                created_at: Set(now),
                ..Default::default()
            };
            match membership.insert(&txn).await {
                Ok(_) => true,
                Err(e) => {
                    let msg = e.to_string().to_lowercase();
                    if msg.contains("duplicate") || msg.contains("unique") {
                        // Another writer inserted the same membership first.
                        false
                    } else {
                        return Err(AppError::InternalError(e.to_string()));
                    }
                }
            }
        } else {
            false
        };

        // 3. Primary designation: exactly one department may win.
        if set_primary {
            Self::set_primary_in_txn(&txn, department_id, teacher_id).await?;
        }

        txn.commit().await?;

        info!(
            teacher_id = teacher_id,
            department_id = department_id,
            set_primary = set_primary,
            newly_added = newly_added,
            "teacher assigned to department"
        );

        Ok(newly_added)
    }

    /// Remove a teacher from a department.
    ///
    /// Returns `false` when the teacher was not a member (no write
    /// occurred). When the removed department was the teacher's primary,
    /// the primary designation is cleared rather than left dangling.
    pub async fn remove(
        state: &AppState,
        department_id: i64,
        teacher_id: i64,
    ) -> Result<bool, AppError> {
        Self::find_department(state, department_id).await?;
        Self::find_teacher(state, teacher_id).await?;

        let txn = state.db.begin().await?;

        let membership = teacher_department::Entity::find()
            .filter(teacher_department::Column::TeacherId.eq(teacher_id))
            .filter(teacher_department::Column::DepartmentId.eq(department_id))
            .one(&txn)
            .await?;

        let Some(membership) = membership else {
            txn.commit().await?;
            return Ok(false);
        };

        let was_primary = membership.is_primary;
        membership.delete(&txn).await?;

        if was_primary {
            // The legacy pointer must not dangle at the removed department.
            user::Entity::update_many()
                .col_expr(user::Column::DepartmentId, Expr::value(None::<i64>))
                .filter(user::Column::UserId.eq(teacher_id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        info!(
            teacher_id = teacher_id,
            department_id = department_id,
            was_primary = was_primary,
            "teacher removed from department"
        );

        Ok(true)
    }

    /// All departments a teacher belongs to, each flagged with whether it
    /// is that teacher's primary department.
    pub async fn list_departments_for_teacher(
        state: &AppState,
        teacher_id: i64,
    ) -> Result<Vec<DepartmentMembershipItem>, AppError> {
        Self::find_teacher(state, teacher_id).await?;

        let memberships = teacher_department::Entity::find()
            .filter(teacher_department::Column::TeacherId.eq(teacher_id))
            .order_by_asc(teacher_department::Column::TeacherDepartmentId)
            .all(&*state.db)
            .await?;

        let departments = Self::load_departments(&*state.db, &memberships).await?;

        Ok(membership_items(&memberships, &departments))
    }

    /// The roster of a department: every member teacher, enriched with
    /// their own membership list, primary department and membership count.
    ///
    /// Issues a fixed number of queries regardless of roster size (the
    /// members, their users, all their memberships, the departments those
    /// memberships point at).
    pub async fn list_teachers_for_department(
        state: &AppState,
        department_id: i64,
    ) -> Result<Vec<DepartmentTeacherItem>, AppError> {
        Self::find_department(state, department_id).await?;

        // 1. Membership rows of this department, in assignment order.
        let roster = teacher_department::Entity::find()
            .filter(teacher_department::Column::DepartmentId.eq(department_id))
            .order_by_asc(teacher_department::Column::TeacherDepartmentId)
            .all(&*state.db)
            .await?;

        if roster.is_empty() {
            return Ok(vec![]);
        }

        let teacher_ids: Vec<i64> = roster.iter().map(|m| m.teacher_id).collect();

        // 2. The teachers themselves.
        let teachers: HashMap<i64, user::Model> = user::Entity::find()
            .filter(user::Column::UserId.is_in(teacher_ids.clone()))
            .all(&*state.db)
            .await?
            .into_iter()
            .map(|u| (u.user_id, u))
            .collect();

        // 3. Every membership of every teacher on the roster, batched.
        let all_memberships = teacher_department::Entity::find()
            .filter(teacher_department::Column::TeacherId.is_in(teacher_ids.clone()))
            .order_by_asc(teacher_department::Column::TeacherDepartmentId)
            .all(&*state.db)
            .await?;

        let departments = Self::load_departments(&*state.db, &all_memberships).await?;

        let mut memberships_by_teacher: HashMap<i64, Vec<teacher_department::Model>> =
            HashMap::new();
        for membership in all_memberships {
            memberships_by_teacher
                .entry(membership.teacher_id)
                .or_default()
                .push(membership);
        }

        let mut result = Vec::with_capacity(roster.len());
        for membership in &roster {
            let Some(teacher) = teachers.get(&membership.teacher_id) else {
                // Orphaned membership row; skip rather than fail the view.
                continue;
            };

            let items = membership_items(
                memberships_by_teacher
                    .get(&teacher.user_id)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]),
                &departments,
            );
            let primary_department = primary_of(&items);
            let total_departments = items.len();

            result.push(DepartmentTeacherItem {
                teacher_id: teacher.user_id,
                first_name: teacher.first_name.clone(),
                last_name: teacher.last_name.clone(),
                email: teacher.email.clone(),
                status: teacher.status.clone(),
                departments: items,
                primary_department,
                total_departments,
            });
        }

        Ok(result)
    }

    /// Batch assignment. One bad id never aborts the batch: invalid
    /// teachers are reported per-item while valid ones are assigned, and
    /// both lists are returned together.
    pub async fn assign_many(
        state: &AppState,
        department_id: i64,
        teacher_ids: &[i64],
        set_primary: bool,
    ) -> Result<BatchAssignResponse, AppError> {
        Self::find_department(state, department_id).await?;

        let mut assigned = Vec::new();
        let mut errors = Vec::new();

        for teacher_id in dedupe_ids(teacher_ids) {
            let teacher = match Self::find_teacher(state, teacher_id).await {
                Ok(teacher) => teacher,
                Err(_) => {
                    errors.push(format!("Invalid teacher ID: {}", teacher_id));
                    continue;
                }
            };

            match Self::assign(state, department_id, teacher_id, set_primary).await {
                Ok(_) => assigned.push(AssignedTeacherItem {
                    teacher_id,
                    first_name: teacher.first_name,
                    last_name: teacher.last_name,
                    is_primary: set_primary,
                }),
                Err(e) => errors.push(e.message()),
            }
        }

        Ok(BatchAssignResponse { assigned, errors })
    }

    /// Batch removal, same continue-on-error contract as `assign_many`.
    /// An id that was never assigned is an error entry, not a silent
    /// success.
    pub async fn remove_many(
        state: &AppState,
        department_id: i64,
        teacher_ids: &[i64],
    ) -> Result<BatchRemoveResponse, AppError> {
        Self::find_department(state, department_id).await?;

        let mut removed = Vec::new();
        let mut errors = Vec::new();

        for teacher_id in dedupe_ids(teacher_ids) {
            if Self::find_teacher(state, teacher_id).await.is_err() {
                errors.push(format!("Invalid teacher ID: {}", teacher_id));
                continue;
            }

            match Self::remove(state, department_id, teacher_id).await {
                Ok(true) => removed.push(teacher_id),
                Ok(false) => errors.push(format!(
                    "Teacher {} was not assigned to this department",
                    teacher_id
                )),
                Err(e) => errors.push(e.message()),
            }
        }

        Ok(BatchRemoveResponse { removed, errors })
    }

    /// Make `department_id` the teacher's one primary department and keep
    /// the legacy pointer on the user row in lockstep. Runs inside the
    /// caller's transaction.
    async fn set_primary_in_txn<C: ConnectionTrait>(
        txn: &C,
        department_id: i64,
        teacher_id: i64,
    ) -> Result<(), AppError> {
        // Demote every other membership of this teacher.
        teacher_department::Entity::update_many()
            .col_expr(teacher_department::Column::IsPrimary, Expr::value(false))
            .filter(teacher_department::Column::TeacherId.eq(teacher_id))
            .filter(teacher_department::Column::DepartmentId.ne(department_id))
            .exec(txn)
            .await?;

        // Promote the target membership.
        teacher_department::Entity::update_many()
            .col_expr(teacher_department::Column::IsPrimary, Expr::value(true))
            .filter(teacher_department::Column::TeacherId.eq(teacher_id))
            .filter(teacher_department::Column::DepartmentId.eq(department_id))
            .exec(txn)
            .await?;

        // Legacy pointer follows the flag.
        user::Entity::update_many()
            .col_expr(user::Column::DepartmentId, Expr::value(Some(department_id)))
            .filter(user::Column::UserId.eq(teacher_id))
            .exec(txn)
            .await?;

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

    /// Look up a user and require the teacher role.
    async fn find_teacher(state: &AppState, teacher_id: i64) -> Result<user::Model, AppError> {
        let found = user::Entity::find_by_id(teacher_id)
            .one(&*state.db)
            .await?;

        match found {
            Some(u) if u.role == user::UserRole::Teacher => Ok(u),
            _ => Err(AppError::TeacherNotFound("Teacher not found.".to_string())),
        }
    }

    async fn load_departments<C: ConnectionTrait>(
        db: &C,
        memberships: &[teacher_department::Model],
    ) -> Result<HashMap<i64, department::Model>, AppError> {
        let department_ids: HashSet<i64> =
            memberships.iter().map(|m| m.department_id).collect();

        if department_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let departments = department::Entity::find()
            .filter(
                department::Column::DepartmentId.is_in(department_ids.into_iter().collect::<Vec<_>>()),
            )
            .all(db)
            .await?
            .into_iter()
            .map(|d| (d.department_id, d))
            .collect();

        Ok(departments)
    }
}

/// Drop duplicate ids while keeping first-seen order.
fn dedupe_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Resolve membership rows against their departments. Rows pointing at a
/// department that no longer exists are dropped from the view.
fn membership_items(
    memberships: &[teacher_department::Model],
    departments: &HashMap<i64, department::Model>,
) -> Vec<DepartmentMembershipItem> {
    memberships
        .iter()
        .filter_map(|m| {
            departments.get(&m.department_id).map(|d| DepartmentMembershipItem {
                department_id: d.department_id,
                name: d.name.clone(),
                code: d.code.clone(),
                is_primary: m.is_primary,
            })
        })
        .collect()
}

/// The single primary membership, if any.
fn primary_of(items: &[DepartmentMembershipItem]) -> Option<DepartmentMembershipItem> {
    items.iter().find(|item| item.is_primary).cloned()
}
