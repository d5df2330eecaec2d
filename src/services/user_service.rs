//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.
//! DDD: Orchestrates domain operations via Unit of Work.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{NewUser, UpdateUser, User, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Sign up a new account with the student role
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Users whose role is exactly `instructor`
    async fn list_instructors(&self) -> AppResult<Vec<User>>;

    /// Admin edit of any profile field, including the role
    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        if self.uow.users().find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        // The unique index still decides when two signups race.
        match self.uow.users().create(new_user).await {
            Err(e) if e.is_unique_violation() => Err(AppError::conflict("User")),
            other => other,
        }
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.uow.users().find_by_email(email).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn list_instructors(&self) -> AppResult<Vec<User>> {
        self.uow.users().list_by_role(UserRole::Instructor).await
    }

    async fn update_user(&self, id: Uuid, mut changes: UpdateUser) -> AppResult<User> {
        if let Some(role) = changes.role.take() {
            let role: UserRole = role.parse()?;
            changes.role = Some(role.as_str().to_string());
        }

        let user = match self.uow.users().update(id, changes).await {
            Err(e) if e.is_unique_violation() => return Err(AppError::conflict("User")),
            other => other?,
        };

        tracing::info!(user_id = %user.id, role = %user.role, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.uow.users().delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
