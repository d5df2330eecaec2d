//! Shared fixtures for service unit tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Class, ReviewStatus, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    ApplicationRepository, CartRepository, ClassRepository, EnrollmentRepository,
    MockApplicationRepository, MockCartRepository, MockClassRepository,
    MockEnrollmentRepository, MockPaymentRepository, MockUserRepository, PaymentRepository,
    TransactionContext, UnitOfWork, UserRepository,
};

/// Unit of work over mock repositories. Unset repositories panic when called.
pub struct StubUnitOfWork {
    pub users: Arc<dyn UserRepository>,
    pub classes: Arc<dyn ClassRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
}

impl Default for StubUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            classes: Arc::new(MockClassRepository::new()),
            carts: Arc::new(MockCartRepository::new()),
            enrollments: Arc::new(MockEnrollmentRepository::new()),
            payments: Arc::new(MockPaymentRepository::new()),
            applications: Arc::new(MockApplicationRepository::new()),
        }
    }
}

#[async_trait]
impl UnitOfWork for StubUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn classes(&self) -> Arc<dyn ClassRepository> {
        self.classes.clone()
    }

    fn carts(&self) -> Arc<dyn CartRepository> {
        self.carts.clone()
    }

    fn enrollments(&self) -> Arc<dyn EnrollmentRepository> {
        self.enrollments.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payments.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationRepository> {
        self.applications.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test stub"))
    }
}

pub fn test_config() -> Config {
    Config::new(
        "sqlite::memory:".into(),
        "unit-test-secret-key-at-least-32-chars".into(),
        24,
        "127.0.0.1".into(),
        0,
        "sk_test_unit".into(),
        "http://127.0.0.1:9".into(),
        "http://localhost:5173".into(),
    )
    .expect("valid test config")
}

pub fn user_with_role(email: &str, role: UserRole) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: "Test User".into(),
        role,
        photo_url: None,
        gender: None,
        address: None,
        phone: None,
        about: None,
        skills: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn class_fixture(instructor_email: &str, available_seats: i32, total_enrolled: i32) -> Class {
    Class {
        id: Uuid::new_v4(),
        name: "Morning Flow".into(),
        image: None,
        instructor_name: Some("Teacher".into()),
        instructor_email: instructor_email.to_string(),
        price: 25.0,
        available_seats,
        total_enrolled,
        description: None,
        video_link: None,
        status: ReviewStatus::Approved,
        reason: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
