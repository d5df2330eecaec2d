//! Token issuance handler.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{TokenRequest, TokenResponse};

/// Create token routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/api/set-token", post(set_token))
}

/// Issue a bearer token for an identity confirmed by the client's sign-in provider
#[utoipa::path(
    post,
    path = "/api/set-token",
    tag = "Authentication",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn set_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.auth_service.issue_token(payload)?;
    Ok(Json(token))
}
