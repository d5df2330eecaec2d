//! Cart repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::cart_item::{self, ActiveModel, Entity as CartItemEntity};
use crate::domain::CartItem;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cart repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn create(&self, class_id: Uuid, user_email: String) -> AppResult<CartItem>;

    /// Find the cart line for one class owned by one user
    async fn find_item(&self, class_id: Uuid, user_email: &str) -> AppResult<Option<CartItem>>;

    /// List a user's cart lines, oldest first
    async fn list_by_user(&self, user_email: &str) -> AppResult<Vec<CartItem>>;

    /// Delete the owner's cart line(s) for a class, returning rows removed
    async fn remove(&self, class_id: Uuid, user_email: &str) -> AppResult<u64>;
}

/// Concrete implementation of CartRepository
pub struct CartStore {
    db: DatabaseConnection,
}

impl CartStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepository for CartStore {
    async fn create(&self, class_id: Uuid, user_email: String) -> AppResult<CartItem> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            class_id: Set(class_id),
            user_email: Set(user_email),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(CartItem::from(model))
    }

    async fn find_item(&self, class_id: Uuid, user_email: &str) -> AppResult<Option<CartItem>> {
        let result = CartItemEntity::find()
            .filter(cart_item::Column::ClassId.eq(class_id))
            .filter(cart_item::Column::UserEmail.eq(user_email))
            .one(&self.db)
            .await?;

        Ok(result.map(CartItem::from))
    }

    async fn list_by_user(&self, user_email: &str) -> AppResult<Vec<CartItem>> {
        let models = CartItemEntity::find()
            .filter(cart_item::Column::UserEmail.eq(user_email))
            .order_by_asc(cart_item::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(CartItem::from).collect())
    }

    async fn remove(&self, class_id: Uuid, user_email: &str) -> AppResult<u64> {
        remove_for_classes(&self.db, user_email, &[class_id]).await
    }
}

/// Delete `user_email`'s cart lines whose class is any of `class_ids`.
pub(crate) async fn remove_for_classes<C: ConnectionTrait>(
    conn: &C,
    user_email: &str,
    class_ids: &[Uuid],
) -> AppResult<u64> {
    if class_ids.is_empty() {
        return Ok(0);
    }

    let result = CartItemEntity::delete_many()
        .filter(cart_item::Column::UserEmail.eq(user_email))
        .filter(cart_item::Column::ClassId.is_in(class_ids.iter().copied()))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}
