//! Instructor application repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::instructor_application::{self, ActiveModel, Entity as ApplicationEntity};
use crate::domain::{InstructorApplication, NewApplication, ReviewStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Instructor application repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn create(
        &self,
        email: String,
        application: NewApplication,
    ) -> AppResult<InstructorApplication>;

    async fn list(&self) -> AppResult<Vec<InstructorApplication>>;

    /// Most recent application submitted under `email`
    async fn find_by_email(&self, email: &str) -> AppResult<Option<InstructorApplication>>;

    /// Set review status and reason, returning the number of rows changed
    async fn change_status(&self, id: Uuid, status: ReviewStatus, reason: String)
        -> AppResult<u64>;
}

/// Concrete implementation of ApplicationRepository
pub struct ApplicationStore {
    db: DatabaseConnection,
}

impl ApplicationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationStore {
    async fn create(
        &self,
        email: String,
        application: NewApplication,
    ) -> AppResult<InstructorApplication> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(application.name),
            email: Set(email),
            experience: Set(application.experience),
            status: Set(ReviewStatus::Pending.as_str().to_string()),
            reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(InstructorApplication::from(model))
    }

    async fn list(&self) -> AppResult<Vec<InstructorApplication>> {
        let models = ApplicationEntity::find()
            .order_by_desc(instructor_application::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(InstructorApplication::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<InstructorApplication>> {
        let result = ApplicationEntity::find()
            .filter(instructor_application::Column::Email.eq(email))
            .order_by_desc(instructor_application::Column::CreatedAt)
            .one(&self.db)
            .await?;

        Ok(result.map(InstructorApplication::from))
    }

    async fn change_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
        reason: String,
    ) -> AppResult<u64> {
        let result = ApplicationEntity::update_many()
            .col_expr(instructor_application::Column::Status, Expr::value(status.as_str()))
            .col_expr(instructor_application::Column::Reason, Expr::value(reason))
            .col_expr(
                instructor_application::Column::UpdatedAt,
                Expr::value(chrono::Utc::now()),
            )
            .filter(instructor_application::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
