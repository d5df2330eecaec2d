//! Class repository implementation.
//!
//! Seat and enrollment counters only move through [`reserve_seat`], a single
//! conditional UPDATE, so concurrent checkouts cannot oversell a class.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::class::{self, ActiveModel, Entity as ClassEntity};
use crate::domain::{Class, NewClass, ReviewStatus, UpdateClass};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Class repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// Insert a new class in `pending` status
    async fn create(
        &self,
        instructor_email: String,
        new_class: NewClass,
        available_seats: i32,
    ) -> AppResult<Class>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Class>>;

    /// Load every class whose id is in `ids`, in no particular order
    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Class>>;

    /// List classes with the given review status, newest first
    async fn list_by_status(&self, status: ReviewStatus) -> AppResult<Vec<Class>>;

    async fn list_by_instructor(&self, instructor_email: &str) -> AppResult<Vec<Class>>;

    async fn list_all(&self) -> AppResult<Vec<Class>>;

    /// Apply instructor edits and send the class back to review
    async fn update(
        &self,
        id: Uuid,
        changes: UpdateClass,
        available_seats: i32,
    ) -> AppResult<Class>;

    /// Set review status and reason, returning the number of rows changed
    async fn change_status(&self, id: Uuid, status: ReviewStatus, reason: String)
        -> AppResult<u64>;

    /// Classes ordered by enrollment, highest first
    async fn most_enrolled(&self, limit: u64) -> AppResult<Vec<Class>>;

    async fn count_by_status(&self, status: ReviewStatus) -> AppResult<u64>;

    async fn count_all(&self) -> AppResult<u64>;
}

/// Concrete implementation of ClassRepository
pub struct ClassStore {
    db: DatabaseConnection,
}

impl ClassStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClassRepository for ClassStore {
    async fn create(
        &self,
        instructor_email: String,
        new_class: NewClass,
        available_seats: i32,
    ) -> AppResult<Class> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_class.name),
            image: Set(new_class.image),
            instructor_name: Set(new_class.instructor_name),
            instructor_email: Set(instructor_email),
            price: Set(new_class.price),
            available_seats: Set(available_seats),
            total_enrolled: Set(0),
            description: Set(new_class.description),
            video_link: Set(new_class.video_link),
            status: Set(ReviewStatus::Pending.as_str().to_string()),
            reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Class::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Class>> {
        let result = ClassEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Class::from))
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Class>> {
        find_many(&self.db, &ids).await
    }

    async fn list_by_status(&self, status: ReviewStatus) -> AppResult<Vec<Class>> {
        let models = ClassEntity::find()
            .filter(class::Column::Status.eq(status.as_str()))
            .order_by_desc(class::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Class::from).collect())
    }

    async fn list_by_instructor(&self, instructor_email: &str) -> AppResult<Vec<Class>> {
        let models = ClassEntity::find()
            .filter(class::Column::InstructorEmail.eq(instructor_email))
            .order_by_desc(class::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Class::from).collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Class>> {
        let models = ClassEntity::find()
            .order_by_desc(class::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Class::from).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: UpdateClass,
        available_seats: i32,
    ) -> AppResult<Class> {
        let existing = ClassEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(changes.name);
        active.description = Set(changes.description);
        active.price = Set(changes.price);
        active.available_seats = Set(available_seats);
        active.video_link = Set(changes.video_link);
        active.status = Set(ReviewStatus::Pending.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Class::from(model))
    }

    async fn change_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
        reason: String,
    ) -> AppResult<u64> {
        let result = ClassEntity::update_many()
            .col_expr(class::Column::Status, Expr::value(status.as_str()))
            .col_expr(class::Column::Reason, Expr::value(reason))
            .col_expr(class::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(class::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn most_enrolled(&self, limit: u64) -> AppResult<Vec<Class>> {
        let models = ClassEntity::find()
            .order_by_desc(class::Column::TotalEnrolled)
            .order_by_asc(class::Column::CreatedAt)
            .order_by_asc(class::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Class::from).collect())
    }

    async fn count_by_status(&self, status: ReviewStatus) -> AppResult<u64> {
        let count = ClassEntity::find()
            .filter(class::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    async fn count_all(&self) -> AppResult<u64> {
        Ok(ClassEntity::find().count(&self.db).await?)
    }
}

pub(crate) async fn find_many<C: ConnectionTrait>(conn: &C, ids: &[Uuid]) -> AppResult<Vec<Class>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let models = ClassEntity::find()
        .filter(class::Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await?;

    Ok(models.into_iter().map(Class::from).collect())
}

/// Take one seat: `total_enrolled + 1`, `available_seats - 1`, only while a seat is left.
///
/// Returns the number of rows changed; zero means the class was sold out or missing.
pub(crate) async fn reserve_seat<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<u64> {
    let result = ClassEntity::update_many()
        .col_expr(
            class::Column::TotalEnrolled,
            Expr::col(class::Column::TotalEnrolled).add(1),
        )
        .col_expr(
            class::Column::AvailableSeats,
            Expr::col(class::Column::AvailableSeats).sub(1),
        )
        .col_expr(class::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(class::Column::Id.eq(id))
        .filter(class::Column::AvailableSeats.gt(0))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}
