//! Reporting service - Read-only aggregate views.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::POPULAR_LIMIT;
use crate::domain::{
    reporting, AdminStats, EnrolledClass, InstructorRanking, ReviewStatus, UserRole,
};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Reporting service trait for dependency injection.
#[async_trait]
pub trait ReportingService: Send + Sync {
    /// Instructors ranked by enrollment summed over their classes
    async fn popular_instructors(&self) -> AppResult<Vec<InstructorRanking>>;

    /// One row per class the user bought, joined to its instructor
    async fn enrolled_classes(&self, user_email: &str) -> AppResult<Vec<EnrolledClass>>;

    async fn admin_stats(&self) -> AppResult<AdminStats>;
}

/// Concrete implementation of ReportingService using Unit of Work.
pub struct Reporter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Reporter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportingService for Reporter<U> {
    async fn popular_instructors(&self) -> AppResult<Vec<InstructorRanking>> {
        let classes_repo = self.uow.classes();
        let users_repo = self.uow.users();
        let (classes, users) = futures::try_join!(classes_repo.list_all(), users_repo.list())?;

        Ok(reporting::popular_instructors(
            &classes,
            &users,
            POPULAR_LIMIT as usize,
        ))
    }

    async fn enrolled_classes(&self, user_email: &str) -> AppResult<Vec<EnrolledClass>> {
        let enrollments = self.uow.enrollments().list_by_user(user_email).await?;

        let mut class_ids: Vec<_> = enrollments
            .iter()
            .flat_map(|e| e.classes_id.iter().copied())
            .collect();
        class_ids.sort_unstable();
        class_ids.dedup();

        let classes_repo = self.uow.classes();
        let users_repo = self.uow.users();
        let (classes, users) =
            futures::try_join!(classes_repo.find_by_ids(class_ids), users_repo.list())?;

        Ok(reporting::enrolled_classes(
            user_email,
            &enrollments,
            &classes,
            &users,
        ))
    }

    async fn admin_stats(&self) -> AppResult<AdminStats> {
        let classes = self.uow.classes();
        let users = self.uow.users();
        let enrollments = self.uow.enrollments();

        let (approved_classes, pending_classes, instructors, total_classes, total_enrolled) =
            futures::try_join!(
                classes.count_by_status(ReviewStatus::Approved),
                classes.count_by_status(ReviewStatus::Pending),
                users.count_by_role(UserRole::Instructor),
                classes.count_all(),
                enrollments.count_all(),
            )?;

        Ok(AdminStats {
            approved_classes,
            pending_classes,
            instructors,
            total_classes,
            total_enrolled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockClassRepository, MockEnrollmentRepository, MockUserRepository};
    use crate::services::testing::{class_fixture, user_with_role, StubUnitOfWork};

    #[tokio::test]
    async fn test_admin_stats_collects_every_counter() {
        let mut classes = MockClassRepository::new();
        classes
            .expect_count_by_status()
            .returning(|status| Ok(if status == ReviewStatus::Approved { 7 } else { 2 }));
        classes.expect_count_all().returning(|| Ok(10));
        let mut users = MockUserRepository::new();
        users
            .expect_count_by_role()
            .withf(|role| *role == UserRole::Instructor)
            .returning(|_| Ok(4));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_count_all().returning(|| Ok(31));

        let reporter = Reporter::new(Arc::new(StubUnitOfWork {
            classes: Arc::new(classes),
            users: Arc::new(users),
            enrollments: Arc::new(enrollments),
            ..StubUnitOfWork::default()
        }));

        let stats = reporter.admin_stats().await.unwrap();
        assert_eq!(
            stats,
            AdminStats {
                approved_classes: 7,
                pending_classes: 2,
                instructors: 4,
                total_classes: 10,
                total_enrolled: 31,
            }
        );
    }

    #[tokio::test]
    async fn test_popular_instructors_reads_role_at_query_time() {
        let mut classes = MockClassRepository::new();
        classes.expect_list_all().returning(|| {
            Ok(vec![
                class_fixture("demoted@example.com", 5, 90),
                class_fixture("teach@example.com", 5, 3),
            ])
        });
        let mut users = MockUserRepository::new();
        users.expect_list().returning(|| {
            Ok(vec![
                user_with_role("demoted@example.com", UserRole::Student),
                user_with_role("teach@example.com", UserRole::Instructor),
            ])
        });

        let reporter = Reporter::new(Arc::new(StubUnitOfWork {
            classes: Arc::new(classes),
            users: Arc::new(users),
            ..StubUnitOfWork::default()
        }));

        let ranking = reporter.popular_instructors().await.unwrap();
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].instructor.email, "teach@example.com");
    }
}
