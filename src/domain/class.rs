//! Class (course listing) domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED};
use crate::errors::{AppError, AppResult};

/// Moderation state shared by classes and instructor applications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => STATUS_PENDING,
            ReviewStatus::Approved => STATUS_APPROVED,
            ReviewStatus::Rejected => STATUS_REJECTED,
        }
    }

    /// Decode a stored status; unknown values are treated as pending.
    pub fn from_stored(s: &str) -> Self {
        match s {
            STATUS_APPROVED => ReviewStatus::Approved,
            STATUS_REJECTED => ReviewStatus::Rejected,
            _ => ReviewStatus::Pending,
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Uuid,
    #[schema(example = "Morning Vinyasa")]
    pub name: String,
    pub image: Option<String>,
    pub instructor_name: Option<String>,
    #[schema(example = "instructor@example.com")]
    pub instructor_email: String,
    #[schema(example = 49.0)]
    pub price: f64,
    pub available_seats: i32,
    pub total_enrolled: i32,
    pub description: Option<String>,
    pub video_link: Option<String>,
    pub status: ReviewStatus,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Class {
    /// True when at least one seat can still be sold.
    pub fn has_open_seat(&self) -> bool {
        self.available_seats > 0
    }
}

/// Seat count as submitted by the dashboard form: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SeatCount {
    Number(i64),
    Text(String),
}

impl SeatCount {
    /// Parse into a non-negative seat count.
    pub fn parse(&self) -> AppResult<i32> {
        let invalid = || AppError::validation("Invalid number of available seats");
        let value = match self {
            SeatCount::Number(n) => *n,
            SeatCount::Text(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
        };
        i32::try_from(value)
            .ok()
            .filter(|seats| *seats >= 0)
            .ok_or_else(invalid)
    }
}

/// Class creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewClass {
    #[validate(length(min = 1, message = "Class name is required"))]
    pub name: String,
    pub image: Option<String>,
    pub instructor_name: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    pub available_seats: SeatCount,
    pub description: Option<String>,
    pub video_link: Option<String>,
}

/// Class update payload; any update sends the class back to review.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClass {
    #[validate(length(min = 1, message = "Class name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    pub available_seats: SeatCount,
    pub video_link: Option<String>,
}

/// Admin moderation decision. Both fields are required.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StatusChange {
    pub status: Option<ReviewStatus>,
    pub reason: Option<String>,
}

impl StatusChange {
    /// Split into `(status, reason)`, rejecting a missing or blank value.
    pub fn into_parts(self) -> AppResult<(ReviewStatus, String)> {
        match (self.status, self.reason) {
            (Some(status), Some(reason)) if !reason.trim().is_empty() => Ok((status, reason)),
            _ => Err(AppError::validation("Status and reason are required.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_count_accepts_number_and_string() {
        let from_number: SeatCount = serde_json::from_str("12").unwrap();
        let from_text: SeatCount = serde_json::from_str("\" 7 \"").unwrap();
        assert_eq!(from_number.parse().unwrap(), 12);
        assert_eq!(from_text.parse().unwrap(), 7);
    }

    #[test]
    fn test_seat_count_rejects_garbage() {
        assert!(SeatCount::Text("ten".into()).parse().is_err());
        assert!(SeatCount::Number(-1).parse().is_err());
        assert!(SeatCount::Number(i64::MAX).parse().is_err());
    }

    #[test]
    fn test_status_change_requires_both_fields() {
        let missing_reason = StatusChange {
            status: Some(ReviewStatus::Rejected),
            reason: None,
        };
        assert!(missing_reason.into_parts().is_err());

        let complete = StatusChange {
            status: Some(ReviewStatus::Approved),
            reason: Some("Looks great".into()),
        };
        assert_eq!(
            complete.into_parts().unwrap(),
            (ReviewStatus::Approved, "Looks great".to_string())
        );
    }

    #[test]
    fn test_review_status_round_trip_through_storage() {
        for status in [ReviewStatus::Pending, ReviewStatus::Approved, ReviewStatus::Rejected] {
            assert_eq!(ReviewStatus::from_stored(status.as_str()), status);
        }
    }
}
