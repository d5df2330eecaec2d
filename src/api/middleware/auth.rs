//! JWT authentication and role-gate middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserRole;
use crate::errors::AppError;

/// Identity extracted from a verified JWT
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub email: String,
    pub name: Option<String>,
}

impl CurrentUser {
    /// Reject access to another user's resource.
    pub fn ensure_owner(&self, email: &str) -> Result<(), AppError> {
        if self.email == email {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
/// A missing header is 401, an expired or forged token is 403.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        email: claims.email,
        name: claims.name,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Instructor gate: instructors and admins pass.
///
/// Must run after [`auth_middleware`]. Inserts the stored [`crate::domain::User`].
pub async fn require_instructor(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(state, request, next, UserRole::Instructor).await
}

/// Admin gate: only admins pass.
///
/// Must run after [`auth_middleware`]. Inserts the stored [`crate::domain::User`].
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(state, request, next, UserRole::Admin).await
}

async fn require_role(
    state: AppState,
    mut request: Request,
    next: Next,
    role: UserRole,
) -> Result<Response, AppError> {
    let email = request
        .extensions()
        .get::<CurrentUser>()
        .map(|user| user.email.clone())
        .ok_or(AppError::Unauthorized)?;

    let user = state.auth_service.require_role(&email, role).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
