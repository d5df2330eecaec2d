//! Payment intent and checkout handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{
    CheckoutOrder, CheckoutSummary, PaymentInfo, PaymentIntent, PaymentIntentRequest,
    PaymentRecord,
};
use crate::errors::AppResult;
use crate::services::PaymentCount;

/// Create payment routes
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payment-info", post(payment_info))
        .route("/payment-history/:email", get(payment_history))
        .route("/payment-history-length/:email", get(payment_history_length))
}

/// Optional cart cleanup restriction for a checkout
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CheckoutQuery {
    /// Only this class's cart line is removed
    pub class_id: Option<Uuid>,
}

/// Authorize a card payment with the payment provider
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret", body = PaymentIntent),
        (status = 400, description = "Invalid price"),
        (status = 500, description = "Payment provider failed")
    )
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PaymentIntentRequest>,
) -> AppResult<Json<PaymentIntent>> {
    let intent = state
        .checkout_service
        .create_payment_intent(payload.price)
        .await?;
    Ok(Json(intent))
}

/// Record a confirmed payment: reserve seats, enroll, clear cart, append ledger
#[utoipa::path(
    post,
    path = "/payment-info",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(CheckoutQuery),
    request_body = PaymentInfo,
    responses(
        (status = 200, description = "Checkout outcome", body = CheckoutSummary),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Paying for another user"),
        (status = 404, description = "Class not found"),
        (status = 409, description = "No seats available")
    )
)]
pub async fn payment_info(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<CheckoutQuery>,
    ValidatedJson(payload): ValidatedJson<PaymentInfo>,
) -> AppResult<Json<CheckoutSummary>> {
    let order = CheckoutOrder::new(payload, query.class_id)?;
    current_user.ensure_owner(&order.user_email)?;

    let summary = state.checkout_service.complete_checkout(order).await?;
    Ok(Json(summary))
}

/// The caller's payments, newest first
#[utoipa::path(
    get,
    path = "/payment-history/{email}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Payer email")),
    responses(
        (status = 200, description = "Payments", body = Vec<PaymentRecord>),
        (status = 403, description = "Not the caller's history")
    )
)]
pub async fn payment_history(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<PaymentRecord>>> {
    current_user.ensure_owner(&email)?;
    Ok(Json(state.checkout_service.payment_history(&email).await?))
}

/// Number of payments the caller has made
#[utoipa::path(
    get,
    path = "/payment-history-length/{email}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Payer email")),
    responses(
        (status = 200, description = "Payment count", body = PaymentCount),
        (status = 403, description = "Not the caller's history")
    )
)]
pub async fn payment_history_length(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<PaymentCount>> {
    current_user.ensure_owner(&email)?;
    Ok(Json(state.checkout_service.payment_count(&email).await?))
}
