//! Unit of Work pattern implementation.
//!
//! SOLID (SRP): Manages transaction lifecycle and repository access.
//! DDD: Coordinates operations across multiple aggregates atomically.
//!
//! The Unit of Work pattern:
//! - Centralizes access to all repositories
//! - Manages database transactions (begin, commit, rollback)
//! - Provides atomic operations for the checkout workflow

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    cart_repository, class_repository, enrollment_repository, payment_repository,
    ApplicationRepository, ApplicationStore, CartRepository, CartStore, ClassRepository,
    ClassStore, EnrollmentRepository, EnrollmentStore, PaymentRepository, PaymentStore,
    UserRepository, UserStore,
};
use crate::domain::{Class, Enrollment, PaymentRecord};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock the repositories it hands out or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn classes(&self) -> Arc<dyn ClassRepository>;

    fn carts(&self) -> Arc<dyn CartRepository>;

    fn enrollments(&self) -> Arc<dyn EnrollmentRepository>;

    fn payments(&self) -> Arc<dyn PaymentRepository>;

    fn applications(&self) -> Arc<dyn ApplicationRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    /// Uses ReadCommitted isolation; seat counters rely on conditional
    /// updates rather than on the isolation level.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn classes(&self) -> TxClassRepository<'_> {
        TxClassRepository { txn: self.txn }
    }

    pub fn enrollments(&self) -> TxEnrollmentRepository<'_> {
        TxEnrollmentRepository { txn: self.txn }
    }

    pub fn carts(&self) -> TxCartRepository<'_> {
        TxCartRepository { txn: self.txn }
    }

    pub fn payments(&self) -> TxPaymentRepository<'_> {
        TxPaymentRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    class_repo: Arc<ClassStore>,
    cart_repo: Arc<CartStore>,
    enrollment_repo: Arc<EnrollmentStore>,
    payment_repo: Arc<PaymentStore>,
    application_repo: Arc<ApplicationStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            class_repo: Arc::new(ClassStore::new(db.clone())),
            cart_repo: Arc::new(CartStore::new(db.clone())),
            enrollment_repo: Arc::new(EnrollmentStore::new(db.clone())),
            payment_repo: Arc::new(PaymentStore::new(db.clone())),
            application_repo: Arc::new(ApplicationStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn classes(&self) -> Arc<dyn ClassRepository> {
        self.class_repo.clone()
    }

    fn carts(&self) -> Arc<dyn CartRepository> {
        self.cart_repo.clone()
    }

    fn enrollments(&self) -> Arc<dyn EnrollmentRepository> {
        self.enrollment_repo.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payment_repo.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationRepository> {
        self.application_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-bound class access for checkout.
pub struct TxClassRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxClassRepository<'a> {
    /// Load every class whose id is in `ids`
    pub async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Class>> {
        class_repository::find_many(self.txn, ids).await
    }

    /// Take one seat in `id`; returns rows changed (0 when sold out)
    pub async fn reserve_seat(&self, id: Uuid) -> AppResult<u64> {
        class_repository::reserve_seat(self.txn, id).await
    }
}

/// Transaction-bound enrollment access for checkout.
pub struct TxEnrollmentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxEnrollmentRepository<'a> {
    pub async fn find_by_transaction(&self, transaction_id: &str) -> AppResult<Option<Enrollment>> {
        enrollment_repository::find_by_transaction(self.txn, transaction_id).await
    }

    pub async fn create(
        &self,
        user_email: &str,
        class_ids: &[Uuid],
        transaction_id: &str,
    ) -> AppResult<Enrollment> {
        enrollment_repository::insert(self.txn, user_email, class_ids, transaction_id).await
    }
}

/// Transaction-bound cart access for checkout.
pub struct TxCartRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCartRepository<'a> {
    /// Delete the user's cart lines for any of `class_ids`
    pub async fn remove_for_classes(&self, user_email: &str, class_ids: &[Uuid]) -> AppResult<u64> {
        cart_repository::remove_for_classes(self.txn, user_email, class_ids).await
    }
}

/// Transaction-bound payment ledger access for checkout.
pub struct TxPaymentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxPaymentRepository<'a> {
    pub async fn find_by_transaction(
        &self,
        transaction_id: &str,
    ) -> AppResult<Option<PaymentRecord>> {
        payment_repository::find_by_transaction(self.txn, transaction_id).await
    }

    pub async fn create(
        &self,
        user_email: &str,
        amount: f64,
        transaction_id: &str,
        date: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<PaymentRecord> {
        payment_repository::insert(self.txn, user_email, amount, transaction_id, date).await
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
