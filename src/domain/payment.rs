//! Payment ledger entries and checkout value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::MINOR_UNITS_PER_MAJOR;
use crate::errors::{AppError, AppResult};

/// Append-only ledger entry, one per checkout.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: Uuid,
    pub user_email: String,
    pub amount: f64,
    pub transaction_id: String,
    pub date: DateTime<Utc>,
}

/// Payment confirmation submitted by the client after the gateway accepted the charge.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    #[validate(email(message = "Invalid email format"))]
    pub user_email: String,
    #[validate(length(min = 1, message = "At least one class is required"))]
    pub classes_id: Vec<Uuid>,
    #[validate(length(min = 1, message = "Transaction id is required"))]
    pub transaction_id: String,
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub amount: f64,
    pub date: Option<DateTime<Utc>>,
}

/// A validated checkout request, ready for the checkout processor.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOrder {
    pub user_email: String,
    /// Distinct class ids, first occurrence order preserved
    pub class_ids: Vec<Uuid>,
    pub transaction_id: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    /// Restricts cart cleanup to a single class when set
    pub single_class_id: Option<Uuid>,
}

impl CheckoutOrder {
    /// Validate a payment confirmation and normalize its class list.
    ///
    /// # Errors
    /// Returns a validation error for an empty class list, a blank transaction id,
    /// a non-finite or negative amount, or a `single_class_id` outside the purchase.
    pub fn new(info: PaymentInfo, single_class_id: Option<Uuid>) -> AppResult<Self> {
        let mut class_ids: Vec<Uuid> = Vec::with_capacity(info.classes_id.len());
        for id in info.classes_id {
            if !class_ids.contains(&id) {
                class_ids.push(id);
            }
        }

        if class_ids.is_empty() {
            return Err(AppError::validation("At least one class is required"));
        }
        let transaction_id = info.transaction_id.trim().to_string();
        if transaction_id.is_empty() {
            return Err(AppError::validation("Transaction id is required"));
        }
        if !info.amount.is_finite() || info.amount < 0.0 {
            return Err(AppError::validation("Amount must be a non-negative number"));
        }
        if let Some(single) = single_class_id {
            if !class_ids.contains(&single) {
                return Err(AppError::validation(
                    "classId must be one of the purchased classes",
                ));
            }
        }

        Ok(Self {
            user_email: info.user_email,
            class_ids,
            transaction_id,
            amount: info.amount,
            date: info.date.unwrap_or_else(Utc::now),
            single_class_id,
        })
    }

    /// Class ids whose cart items this checkout clears.
    pub fn cart_class_ids(&self) -> Vec<Uuid> {
        match self.single_class_id {
            Some(id) => vec![id],
            None => self.class_ids.clone(),
        }
    }
}

/// Outcome of each checkout sub-operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub transaction_id: String,
    /// True when the transaction id had already been processed and nothing changed
    pub replayed: bool,
    pub classes_updated: u64,
    pub enrollment_id: Uuid,
    pub cart_items_removed: u64,
    pub payment_id: Uuid,
}

/// Request for a client-side payment authorization.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PaymentIntentRequest {
    #[validate(range(min = 0.01, message = "Price must be positive"))]
    #[schema(example = 49.99)]
    pub price: f64,
}

/// Client secret the frontend uses to confirm the card payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
}

/// Convert a major-unit price into integer minor units (cents).
///
/// # Errors
/// Returns a validation error for non-finite, non-positive or out-of-range prices.
pub fn to_minor_units(price: f64) -> AppResult<i64> {
    let cents = (price * MINOR_UNITS_PER_MAJOR).round();
    if !cents.is_finite() || cents < 1.0 || cents > i64::MAX as f64 {
        return Err(AppError::validation("Price must be a positive amount"));
    }
    Ok(cents as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(classes: Vec<Uuid>) -> PaymentInfo {
        PaymentInfo {
            user_email: "buyer@example.com".into(),
            classes_id: classes,
            transaction_id: "pi_123".into(),
            amount: 98.0,
            date: None,
        }
    }

    #[test]
    fn test_order_dedupes_class_ids_in_order() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let order = CheckoutOrder::new(info(vec![a, b, a]), None).unwrap();
        assert_eq!(order.class_ids, vec![a, b]);
        assert_eq!(order.cart_class_ids(), vec![a, b]);
    }

    #[test]
    fn test_order_rejects_empty_classes() {
        assert!(matches!(
            CheckoutOrder::new(info(vec![]), None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_order_rejects_blank_transaction() {
        let mut payload = info(vec![Uuid::new_v4()]);
        payload.transaction_id = "   ".into();
        assert!(CheckoutOrder::new(payload, None).is_err());
    }

    #[test]
    fn test_single_class_must_be_purchased() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(CheckoutOrder::new(info(vec![a]), Some(b)).is_err());

        let order = CheckoutOrder::new(info(vec![a, b]), Some(b)).unwrap();
        assert_eq!(order.cart_class_ids(), vec![b]);
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(to_minor_units(49.0).unwrap(), 4900);
        assert_eq!(to_minor_units(19.99).unwrap(), 1999);
        assert!(to_minor_units(0.0).is_err());
        assert!(to_minor_units(f64::INFINITY).is_err());
    }
}
