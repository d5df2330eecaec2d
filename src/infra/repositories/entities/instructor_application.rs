//! Instructor application database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{InstructorApplication, ReviewStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "instructor_applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub experience: Option<String>,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for InstructorApplication {
    fn from(model: Model) -> Self {
        InstructorApplication {
            id: model.id,
            name: model.name,
            email: model.email,
            experience: model.experience,
            status: ReviewStatus::from_stored(&model.status),
            reason: model.reason,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
