//! Enrollment repository implementation.
//!
//! An enrollment is one `enrollments` row plus its ordered `enrollment_classes`
//! link rows. Both are written in one call and never updated.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::enrollment::{self, Entity as EnrollmentEntity};
use super::entities::enrollment_class::{self, Entity as EnrollmentClassEntity};
use crate::domain::Enrollment;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Enrollment repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn find_by_transaction(&self, transaction_id: &str) -> AppResult<Option<Enrollment>>;

    /// List a user's enrollments, oldest first
    async fn list_by_user(&self, user_email: &str) -> AppResult<Vec<Enrollment>>;

    async fn count_all(&self) -> AppResult<u64>;
}

/// Concrete implementation of EnrollmentRepository
pub struct EnrollmentStore {
    db: DatabaseConnection,
}

impl EnrollmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EnrollmentRepository for EnrollmentStore {
    async fn find_by_transaction(&self, transaction_id: &str) -> AppResult<Option<Enrollment>> {
        find_by_transaction(&self.db, transaction_id).await
    }

    async fn list_by_user(&self, user_email: &str) -> AppResult<Vec<Enrollment>> {
        let models = EnrollmentEntity::find()
            .filter(enrollment::Column::UserEmail.eq(user_email))
            .order_by_asc(enrollment::Column::CreatedAt)
            .all(&self.db)
            .await?;

        attach_classes(&self.db, models).await
    }

    async fn count_all(&self) -> AppResult<u64> {
        Ok(EnrollmentEntity::find().count(&self.db).await?)
    }
}

pub(crate) async fn find_by_transaction<C: ConnectionTrait>(
    conn: &C,
    transaction_id: &str,
) -> AppResult<Option<Enrollment>> {
    let model = EnrollmentEntity::find()
        .filter(enrollment::Column::TransactionId.eq(transaction_id))
        .one(conn)
        .await?;

    match model {
        Some(model) => Ok(attach_classes(conn, vec![model]).await?.pop()),
        None => Ok(None),
    }
}

/// Insert the enrollment row followed by one link row per class, in order.
pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    user_email: &str,
    class_ids: &[Uuid],
    transaction_id: &str,
) -> AppResult<Enrollment> {
    let now = chrono::Utc::now();
    let model = enrollment::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_email: Set(user_email.to_string()),
        transaction_id: Set(transaction_id.to_string()),
        created_at: Set(now),
    }
    .insert(conn)
    .await?;

    let links: Vec<enrollment_class::ActiveModel> = class_ids
        .iter()
        .zip(0i32..)
        .map(|(class_id, position)| enrollment_class::ActiveModel {
            id: Set(Uuid::new_v4()),
            enrollment_id: Set(model.id),
            class_id: Set(*class_id),
            position: Set(position),
        })
        .collect();

    if !links.is_empty() {
        EnrollmentClassEntity::insert_many(links).exec(conn).await?;
    }

    Ok(Enrollment {
        id: model.id,
        user_email: model.user_email,
        classes_id: class_ids.to_vec(),
        transaction_id: model.transaction_id,
        created_at: model.created_at,
    })
}

/// Load link rows for `models` in one query and rebuild each class list in position order.
async fn attach_classes<C: ConnectionTrait>(
    conn: &C,
    models: Vec<enrollment::Model>,
) -> AppResult<Vec<Enrollment>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let links = EnrollmentClassEntity::find()
        .filter(enrollment_class::Column::EnrollmentId.is_in(models.iter().map(|m| m.id)))
        .order_by_asc(enrollment_class::Column::Position)
        .all(conn)
        .await?;

    let mut by_enrollment: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in links {
        by_enrollment
            .entry(link.enrollment_id)
            .or_default()
            .push(link.class_id);
    }

    Ok(models
        .into_iter()
        .map(|model| Enrollment {
            classes_id: by_enrollment.remove(&model.id).unwrap_or_default(),
            id: model.id,
            user_email: model.user_email,
            transaction_id: model.transaction_id,
            created_at: model.created_at,
        })
        .collect())
}
