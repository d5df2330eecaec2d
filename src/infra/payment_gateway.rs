//! Payment gateway client.
//!
//! Only payment intent creation is needed: the browser confirms the card
//! payment itself with the returned client secret.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::{Config, PAYMENT_METHOD_CARD};
use crate::domain::PaymentIntent;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Third-party charge authorization.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a card-only payment intent for `amount_minor` units of `currency`.
    async fn create_payment_intent(&self, amount_minor: i64, currency: &str)
        -> AppResult<PaymentIntent>;
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    client_secret: Option<String>,
}

/// Stripe `POST /v1/payment_intents` over form-encoded HTTP.
pub struct StripeGateway {
    http_client: Client,
    api_base: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.payment_api_base.clone(), config.payment_secret())
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> AppResult<PaymentIntent> {
        let amount = amount_minor.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", PAYMENT_METHOD_CARD),
        ];

        let response = self
            .http_client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Payment gateway unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "Payment intent creation failed: {}", error_body);
            return Err(AppError::upstream(format!(
                "Payment gateway rejected the request with {status}"
            )));
        }

        let intent: StripePaymentIntent = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid payment gateway response: {e}")))?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| AppError::upstream("Payment intent has no client secret"))?;

        Ok(PaymentIntent { client_secret })
    }
}
