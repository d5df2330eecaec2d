//! Class catalog service - Listing, authoring and review of classes.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::POPULAR_LIMIT;
use crate::domain::{Class, NewClass, ReviewStatus, StatusChange, UpdateClass, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Class service trait for dependency injection.
#[async_trait]
pub trait ClassService: Send + Sync {
    /// Create a class owned by `instructor`, awaiting review
    async fn create_class(&self, instructor: &User, new_class: NewClass) -> AppResult<Class>;

    /// Classes visible in the public catalog
    async fn list_approved(&self) -> AppResult<Vec<Class>>;

    async fn list_by_instructor(&self, instructor_email: &str) -> AppResult<Vec<Class>>;

    /// Every class regardless of status, for management screens
    async fn list_all(&self) -> AppResult<Vec<Class>>;

    async fn get_class(&self, id: Uuid) -> AppResult<Class>;

    /// Edit a class; the edit sends it back to `pending`
    async fn update_class(&self, editor: &User, id: Uuid, changes: UpdateClass) -> AppResult<Class>;

    /// Approve or reject a class with a reason
    async fn change_status(&self, id: Uuid, change: StatusChange) -> AppResult<()>;

    /// Top classes by enrollment
    async fn popular_classes(&self) -> AppResult<Vec<Class>>;
}

/// Concrete implementation of ClassService using Unit of Work.
pub struct ClassCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ClassCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ClassService for ClassCatalog<U> {
    async fn create_class(&self, instructor: &User, new_class: NewClass) -> AppResult<Class> {
        let seats = new_class.available_seats.parse()?;
        let class = self
            .uow
            .classes()
            .create(instructor.email.clone(), new_class, seats)
            .await?;

        tracing::info!(class_id = %class.id, instructor = %class.instructor_email, "Class submitted for review");
        Ok(class)
    }

    async fn list_approved(&self) -> AppResult<Vec<Class>> {
        self.uow.classes().list_by_status(ReviewStatus::Approved).await
    }

    async fn list_by_instructor(&self, instructor_email: &str) -> AppResult<Vec<Class>> {
        self.uow.classes().list_by_instructor(instructor_email).await
    }

    async fn list_all(&self) -> AppResult<Vec<Class>> {
        self.uow.classes().list_all().await
    }

    async fn get_class(&self, id: Uuid) -> AppResult<Class> {
        self.uow.classes().find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_class(&self, editor: &User, id: Uuid, changes: UpdateClass) -> AppResult<Class> {
        let seats = changes.available_seats.parse()?;
        let existing = self.get_class(id).await?;

        if !editor.is_admin() && existing.instructor_email != editor.email {
            return Err(AppError::Forbidden);
        }

        let class = self.uow.classes().update(id, changes, seats).await?;
        tracing::info!(class_id = %class.id, "Class updated and returned to review");
        Ok(class)
    }

    async fn change_status(&self, id: Uuid, change: StatusChange) -> AppResult<()> {
        let (status, reason) = change.into_parts()?;

        let changed = self
            .uow
            .classes()
            .change_status(id, status, reason)
            .await?;
        if changed == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!(class_id = %id, %status, "Class status changed");
        Ok(())
    }

    async fn popular_classes(&self) -> AppResult<Vec<Class>> {
        self.uow.classes().most_enrolled(POPULAR_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SeatCount, UserRole};
    use crate::infra::MockClassRepository;
    use crate::services::testing::{class_fixture, user_with_role, StubUnitOfWork};

    fn catalog(classes: MockClassRepository) -> ClassCatalog<StubUnitOfWork> {
        ClassCatalog::new(Arc::new(StubUnitOfWork {
            classes: Arc::new(classes),
            ..StubUnitOfWork::default()
        }))
    }

    fn new_class(seats: SeatCount) -> NewClass {
        NewClass {
            name: "Sunrise Vinyasa".into(),
            image: None,
            instructor_name: Some("Teacher".into()),
            price: 30.0,
            available_seats: seats,
            description: None,
            video_link: None,
        }
    }

    fn edit(seats: SeatCount) -> UpdateClass {
        UpdateClass {
            name: "Renamed".into(),
            description: None,
            price: 35.0,
            available_seats: seats,
            video_link: None,
        }
    }

    #[tokio::test]
    async fn test_create_class_parses_string_seats_and_uses_token_email() {
        let mut classes = MockClassRepository::new();
        classes
            .expect_create()
            .withf(|email, _, seats| email == "teach@example.com" && *seats == 12)
            .returning(|email, _, seats| {
                let mut class = class_fixture(&email, seats, 0);
                class.status = ReviewStatus::Pending;
                Ok(class)
            });

        let instructor = user_with_role("teach@example.com", UserRole::Instructor);
        let class = catalog(classes)
            .create_class(&instructor, new_class(SeatCount::Text("12".into())))
            .await
            .unwrap();

        assert_eq!(class.available_seats, 12);
        assert_eq!(class.status, ReviewStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_class_rejects_non_numeric_seats() {
        let mut classes = MockClassRepository::new();
        classes.expect_create().never();

        let instructor = user_with_role("teach@example.com", UserRole::Instructor);
        let result = catalog(classes)
            .create_class(&instructor, new_class(SeatCount::Text("lots".into())))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_class_by_other_instructor_is_forbidden() {
        let mut classes = MockClassRepository::new();
        classes
            .expect_find_by_id()
            .returning(|_| Ok(Some(class_fixture("owner@example.com", 5, 0))));
        classes.expect_update().never();

        let intruder = user_with_role("other@example.com", UserRole::Instructor);
        let result = catalog(classes)
            .update_class(&intruder, Uuid::new_v4(), edit(SeatCount::Number(5)))
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_change_status_unknown_id_is_not_found() {
        let mut classes = MockClassRepository::new();
        classes.expect_change_status().returning(|_, _, _| Ok(0));

        let change = StatusChange {
            status: Some(ReviewStatus::Rejected),
            reason: Some("Video missing".into()),
        };
        let result = catalog(classes).change_status(Uuid::new_v4(), change).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_change_status_requires_reason() {
        let mut classes = MockClassRepository::new();
        classes.expect_change_status().never();

        let change = StatusChange {
            status: Some(ReviewStatus::Approved),
            reason: None,
        };
        let result = catalog(classes).change_status(Uuid::new_v4(), change).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_popular_classes_requests_six() {
        let mut classes = MockClassRepository::new();
        classes
            .expect_most_enrolled()
            .withf(|limit| *limit == 6)
            .returning(|_| Ok(Vec::new()));

        assert!(catalog(classes).popular_classes().await.unwrap().is_empty());
    }
}
