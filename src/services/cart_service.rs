//! Cart service - Pending purchases per user.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CartItem, Class};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Cart service trait for dependency injection.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Put a class into the user's cart. Adding a class twice returns the existing line.
    async fn add_item(&self, user_email: &str, class_id: Uuid) -> AppResult<CartItem>;

    async fn find_item(&self, class_id: Uuid, user_email: &str) -> AppResult<Option<CartItem>>;

    /// The user's cart resolved to classes, in the order they were added
    async fn list_cart_classes(&self, user_email: &str) -> AppResult<Vec<Class>>;

    /// Remove the user's line for `class_id`
    async fn remove_item(&self, class_id: Uuid, user_email: &str) -> AppResult<()>;
}

/// Concrete implementation of CartService using Unit of Work.
pub struct CartManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CartManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CartService for CartManager<U> {
    async fn add_item(&self, user_email: &str, class_id: Uuid) -> AppResult<CartItem> {
        if self.uow.classes().find_by_id(class_id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        if let Some(existing) = self.uow.carts().find_item(class_id, user_email).await? {
            return Ok(existing);
        }

        self.uow.carts().create(class_id, user_email.to_string()).await
    }

    async fn find_item(&self, class_id: Uuid, user_email: &str) -> AppResult<Option<CartItem>> {
        self.uow.carts().find_item(class_id, user_email).await
    }

    async fn list_cart_classes(&self, user_email: &str) -> AppResult<Vec<Class>> {
        let items = self.uow.carts().list_by_user(user_email).await?;
        let ids: Vec<Uuid> = items.iter().map(|item| item.class_id).collect();

        let mut by_id: HashMap<Uuid, Class> = self
            .uow
            .classes()
            .find_by_ids(ids.clone())
            .await?
            .into_iter()
            .map(|class| (class.id, class))
            .collect();

        // Lines whose class was deleted are skipped.
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn remove_item(&self, class_id: Uuid, user_email: &str) -> AppResult<()> {
        let removed = self.uow.carts().remove(class_id, user_email).await?;
        if removed == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockCartRepository, MockClassRepository};
    use crate::services::testing::{class_fixture, StubUnitOfWork};
    use chrono::Utc;

    fn manager(classes: MockClassRepository, carts: MockCartRepository) -> CartManager<StubUnitOfWork> {
        CartManager::new(Arc::new(StubUnitOfWork {
            classes: Arc::new(classes),
            carts: Arc::new(carts),
            ..StubUnitOfWork::default()
        }))
    }

    fn line(class_id: Uuid, email: &str) -> CartItem {
        CartItem {
            id: Uuid::new_v4(),
            class_id,
            user_email: email.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_item_for_missing_class_is_not_found() {
        let mut classes = MockClassRepository::new();
        classes.expect_find_by_id().returning(|_| Ok(None));
        let mut carts = MockCartRepository::new();
        carts.expect_create().never();

        let result = manager(classes, carts)
            .add_item("buyer@example.com", Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_add_item_twice_returns_existing_line() {
        let mut classes = MockClassRepository::new();
        classes
            .expect_find_by_id()
            .returning(|_| Ok(Some(class_fixture("teach@example.com", 3, 0))));
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_item()
            .returning(|class_id, email| Ok(Some(line(class_id, email))));
        carts.expect_create().never();

        let class_id = Uuid::new_v4();
        let item = manager(classes, carts)
            .add_item("buyer@example.com", class_id)
            .await
            .unwrap();
        assert_eq!(item.class_id, class_id);
    }

    #[tokio::test]
    async fn test_cart_classes_keep_cart_order_and_skip_deleted() {
        let first = class_fixture("a@example.com", 3, 0);
        let second = class_fixture("b@example.com", 3, 0);
        let gone = Uuid::new_v4();
        let order = vec![second.id, gone, first.id];

        let mut carts = MockCartRepository::new();
        let lines: Vec<CartItem> = order.iter().map(|id| line(*id, "buyer@example.com")).collect();
        carts.expect_list_by_user().returning(move |_| Ok(lines.clone()));

        let mut classes = MockClassRepository::new();
        let stored = vec![first.clone(), second.clone()];
        classes
            .expect_find_by_ids()
            .returning(move |_| Ok(stored.clone()));

        let result = manager(classes, carts)
            .list_cart_classes("buyer@example.com")
            .await
            .unwrap();
        let ids: Vec<Uuid> = result.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_remove_missing_line_is_not_found() {
        let mut carts = MockCartRepository::new();
        carts.expect_remove().returning(|_, _| Ok(0));

        let result = manager(MockClassRepository::new(), carts)
            .remove_item(Uuid::new_v4(), "buyer@example.com")
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
