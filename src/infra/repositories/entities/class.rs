//! Class database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Class, ReviewStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_email: String,
    pub price: f64,
    pub available_seats: i32,
    pub total_enrolled: i32,
    pub description: Option<String>,
    pub video_link: Option<String>,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Class {
    fn from(model: Model) -> Self {
        Class {
            id: model.id,
            name: model.name,
            image: model.image,
            instructor_name: model.instructor_name,
            instructor_email: model.instructor_email,
            price: model.price,
            available_seats: model.available_seats,
            total_enrolled: model.total_enrolled,
            description: model.description,
            video_link: model.video_link,
            status: ReviewStatus::from_stored(&model.status),
            reason: model.reason,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
