//! Enrollment database entity for SeaORM.
//!
//! Purchased classes live in [`super::enrollment_class`], one row per class.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_email: String,
    #[sea_orm(unique)]
    pub transaction_id: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollment_class::Entity")]
    EnrollmentClass,
}

impl Related<super::enrollment_class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnrollmentClass.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
