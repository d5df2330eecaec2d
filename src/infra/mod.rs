//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - The payment gateway client
//! - Unit of Work for transaction management

pub mod db;
pub mod payment_gateway;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use payment_gateway::{PaymentGateway, StripeGateway};
pub use repositories::{
    ApplicationRepository, ApplicationStore, CartRepository, CartStore, ClassRepository,
    ClassStore, EnrollmentRepository, EnrollmentStore, PaymentRepository, PaymentStore,
    UserRepository, UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxCartRepository, TxClassRepository,
    TxEnrollmentRepository, TxPaymentRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use payment_gateway::MockPaymentGateway;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockApplicationRepository, MockCartRepository, MockClassRepository,
    MockEnrollmentRepository, MockPaymentRepository, MockUserRepository,
};
