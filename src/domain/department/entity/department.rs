use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub department_id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    /// Head of Department; nullable weak reference into `users`.
    pub head_id: Option<i64>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::assignment::entity::teacher_department::Entity")]
    TeacherDepartment,
}

impl Related<crate::domain::assignment::entity::teacher_department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherDepartment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
