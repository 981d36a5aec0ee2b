use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Teacher↔Department membership row.
///
/// `UNIQUE(teacher_id, department_id)` is created at schema sync; at most
/// one row per teacher carries `is_primary = true`, maintained by the
/// registry's transactional write paths.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teacher_department")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub teacher_department_id: i64,
    pub teacher_id: i64,
    pub department_id: i64,
    pub is_primary: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::TeacherId",
        to = "crate::domain::user::entity::user::Column::UserId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(
        belongs_to = "crate::domain::department::entity::department::Entity",
        from = "Column::DepartmentId",
        to = "crate::domain::department::entity::department::Column::DepartmentId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Department,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::domain::department::entity::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
