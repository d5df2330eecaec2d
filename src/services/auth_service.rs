//! Authentication service - Token issuance, verification and role checks.
//!
//! SOLID (SRP): Handles authentication concerns only.
//! DDD: Uses Unit of Work for repository access.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Identity to encode in a new token
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "student@example.com")]
    pub email: String,
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
}

/// Token response returned by `/api/set-token`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Sign a bearer token for `email`
    fn issue_token(&self, request: TokenRequest) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Load the user behind `email` and check it satisfies `required`.
    ///
    /// The role is read from the store on every call, so a demotion takes
    /// effect before the token expires.
    async fn require_role(&self, email: &str, required: UserRole) -> AppResult<User>;
}

fn generate_token(request: TokenRequest, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: request.email.clone(),
        email: request.email,
        name: request.name,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    fn issue_token(&self, request: TokenRequest) -> AppResult<TokenResponse> {
        generate_token(request, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn require_role(&self, email: &str, required: UserRole) -> AppResult<User> {
        let user = self
            .uow
            .users()
            .find_by_email(email)
            .await?
            .ok_or(AppError::Forbidden)?;

        if !user.role.can_access(&required) {
            tracing::debug!(email, role = %user.role, %required, "Role check failed");
            return Err(AppError::Forbidden);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use crate::services::testing::{test_config, user_with_role, StubUnitOfWork};

    fn authenticator(users: MockUserRepository) -> Authenticator<StubUnitOfWork> {
        let uow = StubUnitOfWork {
            users: Arc::new(users),
            ..StubUnitOfWork::default()
        };
        Authenticator::new(Arc::new(uow), test_config())
    }

    #[test]
    fn test_issued_token_verifies() {
        let auth = authenticator(MockUserRepository::new());
        let response = auth
            .issue_token(TokenRequest {
                email: "student@example.com".into(),
                name: Some("Jane".into()),
            })
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 24 * 3600);

        let claims = auth.verify_token(&response.token).unwrap();
        assert_eq!(claims.email, "student@example.com");
        assert_eq!(claims.sub, "student@example.com");
        assert_eq!(claims.name.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_garbage_token_is_jwt_error() {
        let auth = authenticator(MockUserRepository::new());
        assert!(matches!(auth.verify_token("not-a-token"), Err(AppError::Jwt(_))));
    }

    #[tokio::test]
    async fn test_require_role_rejects_student_for_admin_route() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(user_with_role(email, UserRole::Student))));

        let auth = authenticator(users);
        let result = auth.require_role("learn@example.com", UserRole::Admin).await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_require_role_admin_passes_instructor_gate() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(user_with_role(email, UserRole::Admin))));

        let auth = authenticator(users);
        let user = auth
            .require_role("boss@example.com", UserRole::Instructor)
            .await
            .unwrap();
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_require_role_unknown_user_is_forbidden() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let auth = authenticator(users);
        let result = auth.require_role("ghost@example.com", UserRole::Student).await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }
}
