//! Enrollment records and the enrolled-classes view.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Class, User};

/// Which classes a user bought in one checkout. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub user_email: String,
    /// Purchased class ids in submission order
    pub classes_id: Vec<Uuid>,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

/// One row of the enrolled-classes view: a purchased class joined to its instructor.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EnrolledClass {
    pub classes: Class,
    pub instructor: Option<User>,
}
