//! Payment ledger repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::payment::{self, ActiveModel, Entity as PaymentEntity};
use crate::domain::PaymentRecord;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Payment repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// List a user's payments, most recent first
    async fn list_by_user(&self, user_email: &str) -> AppResult<Vec<PaymentRecord>>;

    async fn count_by_user(&self, user_email: &str) -> AppResult<u64>;
}

/// Concrete implementation of PaymentRepository
pub struct PaymentStore {
    db: DatabaseConnection,
}

impl PaymentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PaymentStore {
    async fn list_by_user(&self, user_email: &str) -> AppResult<Vec<PaymentRecord>> {
        let models = PaymentEntity::find()
            .filter(payment::Column::UserEmail.eq(user_email))
            .order_by_desc(payment::Column::Date)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(PaymentRecord::from).collect())
    }

    async fn count_by_user(&self, user_email: &str) -> AppResult<u64> {
        let count = PaymentEntity::find()
            .filter(payment::Column::UserEmail.eq(user_email))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}

pub(crate) async fn find_by_transaction<C: ConnectionTrait>(
    conn: &C,
    transaction_id: &str,
) -> AppResult<Option<PaymentRecord>> {
    let result = PaymentEntity::find()
        .filter(payment::Column::TransactionId.eq(transaction_id))
        .one(conn)
        .await?;

    Ok(result.map(PaymentRecord::from))
}

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    user_email: &str,
    amount: f64,
    transaction_id: &str,
    date: chrono::DateTime<chrono::Utc>,
) -> AppResult<PaymentRecord> {
    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_email: Set(user_email.to_string()),
        amount: Set(amount),
        transaction_id: Set(transaction_id.to_string()),
        date: Set(date),
    }
    .insert(conn)
    .await?;

    Ok(PaymentRecord::from(model))
}
