//! Applications to become an instructor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::ReviewStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorApplication {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub experience: Option<String>,
    pub status: ReviewStatus,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewApplication {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub experience: Option<String>,
}
