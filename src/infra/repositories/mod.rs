//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Queries that also run inside a transaction are free functions generic
//! over `ConnectionTrait`, shared by the stores and the transaction context.

mod application_repository;
pub(crate) mod cart_repository;
pub(crate) mod class_repository;
pub(crate) mod entities;
pub(crate) mod enrollment_repository;
pub(crate) mod payment_repository;
mod user_repository;

pub use application_repository::{ApplicationRepository, ApplicationStore};
pub use cart_repository::{CartRepository, CartStore};
pub use class_repository::{ClassRepository, ClassStore};
pub use enrollment_repository::{EnrollmentRepository, EnrollmentStore};
pub use payment_repository::{PaymentRepository, PaymentStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use application_repository::MockApplicationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use cart_repository::MockCartRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use class_repository::MockClassRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use enrollment_repository::MockEnrollmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
