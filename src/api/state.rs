//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    ApplicationService, AuthService, CartService, CheckoutService, ClassService,
    ReportingService, ServiceContainer, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub class_service: Arc<dyn ClassService>,
    pub cart_service: Arc<dyn CartService>,
    pub checkout_service: Arc<dyn CheckoutService>,
    pub reporting_service: Arc<dyn ReportingService>,
    pub application_service: Arc<dyn ApplicationService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Exact origin allowed by CORS; `None` disables cross-origin access
    pub cors_origin: Option<HeaderValue>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let cors_origin = config.cors_origin.clone();
        let container = Services::from_connection(database.get_connection(), config);
        Self::new(&container, database, &cors_origin)
    }

    /// Create application state from any service container.
    pub fn new(container: &dyn ServiceContainer, database: Arc<Database>, cors_origin: &str) -> Self {
        let cors_origin = match HeaderValue::from_str(cors_origin) {
            Ok(origin) => Some(origin),
            Err(e) => {
                tracing::warn!(origin = cors_origin, error = %e, "Invalid CORS origin, cross-origin requests disabled");
                None
            }
        };

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            class_service: container.classes(),
            cart_service: container.carts(),
            checkout_service: container.checkout(),
            reporting_service: container.reporting(),
            application_service: container.applications(),
            database,
            cors_origin,
        }
    }
}
