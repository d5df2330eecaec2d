//! Instructor application service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{InstructorApplication, NewApplication, StatusChange};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Instructor application service trait for dependency injection.
#[async_trait]
pub trait ApplicationService: Send + Sync {
    async fn submit(&self, email: &str, application: NewApplication) -> AppResult<InstructorApplication>;

    async fn list(&self) -> AppResult<Vec<InstructorApplication>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<InstructorApplication>>;

    /// Approve or reject an application with a reason
    async fn change_status(&self, id: Uuid, change: StatusChange) -> AppResult<()>;
}

/// Concrete implementation of ApplicationService using Unit of Work.
pub struct ApplicationDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ApplicationDesk<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ApplicationService for ApplicationDesk<U> {
    async fn submit(&self, email: &str, application: NewApplication) -> AppResult<InstructorApplication> {
        let created = self
            .uow
            .applications()
            .create(email.to_string(), application)
            .await?;

        tracing::info!(application_id = %created.id, email, "Instructor application submitted");
        Ok(created)
    }

    async fn list(&self) -> AppResult<Vec<InstructorApplication>> {
        self.uow.applications().list().await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<InstructorApplication>> {
        self.uow.applications().find_by_email(email).await
    }

    async fn change_status(&self, id: Uuid, change: StatusChange) -> AppResult<()> {
        let (status, reason) = change.into_parts()?;

        let changed = self
            .uow
            .applications()
            .change_status(id, status, reason)
            .await?;
        if changed == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!(application_id = %id, %status, "Instructor application reviewed");
        Ok(())
    }
}
