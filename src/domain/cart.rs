//! Cart line items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A class a user intends to buy. Removed on explicit delete or checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub class_id: Uuid,
    #[serde(alias = "userMail")]
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

/// Add-to-cart payload. The owner is always the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub class_id: Uuid,
}
