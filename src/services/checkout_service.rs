//! Checkout service - Payment intents and the enrollment transition.
//!
//! `complete_checkout` turns "classes in cart + confirmed payment" into
//! "enrollment recorded, seats taken, cart cleared, payment logged" inside one
//! transaction. The enrollment's unique transaction id makes a repeated
//! submission by the same buyer a no-op that reports the first outcome.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::PAYMENT_CURRENCY;
use crate::domain::{
    to_minor_units, CheckoutOrder, CheckoutSummary, PaymentIntent, PaymentRecord,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{PaymentGateway, TransactionContext, UnitOfWork};
use crate::with_transaction;

/// Number of payments a user has made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaymentCount {
    pub total: u64,
}

/// Checkout service trait for dependency injection.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Ask the gateway for a card payment authorization of `price` dollars
    async fn create_payment_intent(&self, price: f64) -> AppResult<PaymentIntent>;

    /// Record a confirmed payment and enroll the buyer, all or nothing
    async fn complete_checkout(&self, order: CheckoutOrder) -> AppResult<CheckoutSummary>;

    /// A user's payments, most recent first
    async fn payment_history(&self, user_email: &str) -> AppResult<Vec<PaymentRecord>>;

    async fn payment_count(&self, user_email: &str) -> AppResult<PaymentCount>;
}

/// Concrete implementation of CheckoutService using Unit of Work.
pub struct CheckoutProcessor<U: UnitOfWork> {
    uow: Arc<U>,
    gateway: Arc<dyn PaymentGateway>,
}

impl<U: UnitOfWork> CheckoutProcessor<U> {
    pub fn new(uow: Arc<U>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { uow, gateway }
    }

    /// Outcome already stored for `transaction_id`, if any.
    async fn replay(
        &self,
        transaction_id: String,
        user_email: String,
    ) -> AppResult<Option<CheckoutSummary>> {
        with_transaction!(self.uow, |ctx| {
            stored_outcome(&ctx, &transaction_id, &user_email).await
        })
    }
}

/// A transaction id already spent by another buyer is a conflict, never a replay.
async fn stored_outcome(
    ctx: &TransactionContext<'_>,
    transaction_id: &str,
    user_email: &str,
) -> AppResult<Option<CheckoutSummary>> {
    let Some(enrollment) = ctx.enrollments().find_by_transaction(transaction_id).await? else {
        return Ok(None);
    };
    if enrollment.user_email != user_email {
        tracing::warn!(%transaction_id, user_email, "Transaction id reused by another buyer");
        return Err(AppError::conflict("Transaction"));
    }

    let payment = ctx
        .payments()
        .find_by_transaction(transaction_id)
        .await?
        .ok_or_else(|| {
            AppError::internal(format!("Enrollment {} has no payment record", enrollment.id))
        })?;

    Ok(Some(CheckoutSummary {
        transaction_id: enrollment.transaction_id,
        replayed: true,
        classes_updated: 0,
        enrollment_id: enrollment.id,
        cart_items_removed: 0,
        payment_id: payment.id,
    }))
}

/// The checkout steps, run against one transaction.
///
/// The enrollment row is written before any counter moves: its unique
/// transaction id makes a concurrent duplicate fail there, not on a seat.
async fn process(ctx: TransactionContext<'_>, order: &CheckoutOrder) -> AppResult<CheckoutSummary> {
    if let Some(summary) =
        stored_outcome(&ctx, &order.transaction_id, &order.user_email).await?
    {
        return Ok(summary);
    }

    let classes = ctx.classes().find_many(&order.class_ids).await?;
    if classes.len() != order.class_ids.len() {
        return Err(AppError::NotFound);
    }
    if let Some(full) = classes.iter().find(|class| !class.has_open_seat()) {
        return Err(AppError::SeatsExhausted(full.id));
    }

    let enrollment = ctx
        .enrollments()
        .create(&order.user_email, &order.class_ids, &order.transaction_id)
        .await?;

    let mut classes_updated = 0;
    for class_id in &order.class_ids {
        // Zero rows means a concurrent checkout took the last seat.
        let changed = ctx.classes().reserve_seat(*class_id).await?;
        if changed == 0 {
            return Err(AppError::SeatsExhausted(*class_id));
        }
        classes_updated += changed;
    }

    let cart_items_removed = ctx
        .carts()
        .remove_for_classes(&order.user_email, &order.cart_class_ids())
        .await?;

    let payment = ctx
        .payments()
        .create(&order.user_email, order.amount, &order.transaction_id, order.date)
        .await?;

    Ok(CheckoutSummary {
        transaction_id: enrollment.transaction_id,
        replayed: false,
        classes_updated,
        enrollment_id: enrollment.id,
        cart_items_removed,
        payment_id: payment.id,
    })
}

#[async_trait]
impl<U: UnitOfWork> CheckoutService for CheckoutProcessor<U> {
    async fn create_payment_intent(&self, price: f64) -> AppResult<PaymentIntent> {
        let amount = to_minor_units(price)?;
        let intent = self
            .gateway
            .create_payment_intent(amount, PAYMENT_CURRENCY)
            .await?;

        tracing::info!(amount, currency = PAYMENT_CURRENCY, "Payment intent created");
        Ok(intent)
    }

    async fn complete_checkout(&self, order: CheckoutOrder) -> AppResult<CheckoutSummary> {
        let transaction_id = order.transaction_id.clone();
        let user_email = order.user_email.clone();

        let result = with_transaction!(self.uow, |ctx| process(ctx, &order).await);

        match result {
            Ok(summary) => {
                if summary.replayed {
                    tracing::info!(%transaction_id, "Checkout replayed");
                } else {
                    tracing::info!(
                        %transaction_id,
                        %user_email,
                        enrollment_id = %summary.enrollment_id,
                        classes = summary.classes_updated,
                        cart_items_removed = summary.cart_items_removed,
                        "Checkout completed"
                    );
                }
                Ok(summary)
            }
            // A concurrent submission committed the same transaction id first.
            Err(e) if e.is_unique_violation() => {
                tracing::info!(%transaction_id, "Checkout lost a duplicate race, replaying");
                self.replay(transaction_id, user_email)
                    .await?
                    .ok_or_else(|| AppError::internal("Duplicate checkout left no enrollment"))
            }
            Err(e) => {
                tracing::warn!(%transaction_id, %user_email, error = %e, "Checkout rejected");
                Err(e)
            }
        }
    }

    async fn payment_history(&self, user_email: &str) -> AppResult<Vec<PaymentRecord>> {
        self.uow.payments().list_by_user(user_email).await
    }

    async fn payment_count(&self, user_email: &str) -> AppResult<PaymentCount> {
        let total = self.uow.payments().count_by_user(user_email).await?;
        Ok(PaymentCount { total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentIntent;
    use crate::infra::{MockPaymentGateway, MockPaymentRepository};
    use crate::services::testing::StubUnitOfWork;

    fn processor(
        payments: MockPaymentRepository,
        gateway: MockPaymentGateway,
    ) -> CheckoutProcessor<StubUnitOfWork> {
        let uow = StubUnitOfWork {
            payments: Arc::new(payments),
            ..StubUnitOfWork::default()
        };
        CheckoutProcessor::new(Arc::new(uow), Arc::new(gateway))
    }

    #[tokio::test]
    async fn test_payment_intent_sends_cents_in_usd() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_payment_intent()
            .withf(|amount, currency| *amount == 4999 && currency == "usd")
            .returning(|_, _| {
                Ok(PaymentIntent {
                    client_secret: "pi_1_secret_2".into(),
                })
            });

        let intent = processor(MockPaymentRepository::new(), gateway)
            .create_payment_intent(49.99)
            .await
            .unwrap();
        assert_eq!(intent.client_secret, "pi_1_secret_2");
    }

    #[tokio::test]
    async fn test_payment_intent_rejects_zero_price_before_gateway() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_payment_intent().never();

        let result = processor(MockPaymentRepository::new(), gateway)
            .create_payment_intent(0.0)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_payment_count_wraps_total() {
        let mut payments = MockPaymentRepository::new();
        payments
            .expect_count_by_user()
            .withf(|email| email == "buyer@example.com")
            .returning(|_| Ok(3));

        let count = processor(payments, MockPaymentGateway::new())
            .payment_count("buyer@example.com")
            .await
            .unwrap();
        assert_eq!(count, PaymentCount { total: 3 });
    }
}
