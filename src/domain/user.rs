//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{ROLE_ADMIN, ROLE_INSTRUCTOR, ROLE_STUDENT};
use crate::errors::AppError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Instructor,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Check if this role satisfies a required role.
    ///
    /// Admin satisfies everything; instructor satisfies instructor and student.
    pub fn can_access(&self, required: &UserRole) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Instructor => !required.is_admin(),
            UserRole::Student => matches!(required, UserRole::Student),
        }
    }

    /// Role column value as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => ROLE_STUDENT,
            UserRole::Instructor => ROLE_INSTRUCTOR,
            UserRole::Admin => ROLE_ADMIN,
        }
    }

    /// Decode a stored role. Unknown values fall back to the least privileged role.
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or(UserRole::Student)
    }
}

impl std::str::FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_STUDENT => Ok(UserRole::Student),
            ROLE_INSTRUCTOR => Ok(UserRole::Instructor),
            ROLE_ADMIN => Ok(UserRole::Admin),
            other => Err(AppError::validation(format!(
                "Invalid role '{}'. Must be 'student', 'instructor' or 'admin'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "student@example.com")]
    pub email: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
    pub role: UserRole,
    pub photo_url: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub about: Option<String>,
    pub skills: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if user is an instructor (exact match, admins excluded)
    pub fn is_instructor(&self) -> bool {
        self.role == UserRole::Instructor
    }
}

/// Signup payload. New accounts always start as students.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "student@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    pub photo_url: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Admin update payload. `option` carries the new role, as the admin UI sends it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(alias = "option")]
    #[schema(example = "instructor")]
    pub role: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub about: Option<String>,
    pub photo_url: Option<String>,
    pub skills: Option<String>,
}
