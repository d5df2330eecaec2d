//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Validated JSON extractor that automatically validates requests.
///
/// # Example
///
/// ```rust,ignore
/// use yoga_master::api::extractors::ValidatedJson;
/// use yoga_master::domain::NewCartItem;
///
/// async fn add_to_cart(ValidatedJson(payload): ValidatedJson<NewCartItem>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Format validation errors into a user-friendly string, fields in name order
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentIntentRequest;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request as HttpRequest};

    fn json_request(body: &str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_rule_violation_becomes_validation_error() {
        let result =
            ValidatedJson::<PaymentIntentRequest>::from_request(json_request(r#"{"price":0}"#), &())
                .await;

        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Price must be positive"),
            _ => panic!("expected validation error"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_becomes_validation_error() {
        let result =
            ValidatedJson::<PaymentIntentRequest>::from_request(json_request("{not json"), &())
                .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let ValidatedJson(payload) = ValidatedJson::<PaymentIntentRequest>::from_request(
            json_request(r#"{"price":19.5}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(payload.price, 19.5);
    }
}
