//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.
//!
//! Every store handle is built once here and shared through `Arc`.

use std::sync::Arc;

use super::{
    ApplicationService, AuthService, CartService, CheckoutService, ClassService,
    ReportingService, UserService,
};
use crate::config::Config;
use crate::infra::{PaymentGateway, Persistence, StripeGateway};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn classes(&self) -> Arc<dyn ClassService>;

    fn carts(&self) -> Arc<dyn CartService>;

    fn checkout(&self) -> Arc<dyn CheckoutService>;

    fn reporting(&self) -> Arc<dyn ReportingService>;

    fn applications(&self) -> Arc<dyn ApplicationService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    class_service: Arc<dyn ClassService>,
    cart_service: Arc<dyn CartService>,
    checkout_service: Arc<dyn CheckoutService>,
    reporting_service: Arc<dyn ReportingService>,
    application_service: Arc<dyn ApplicationService>,
}

impl Services {
    /// Create service container from database connection and config,
    /// talking to the configured payment provider.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let gateway = Arc::new(StripeGateway::from_config(&config));
        Self::with_gateway(db, config, gateway)
    }

    /// Create service container with an explicit payment gateway.
    pub fn with_gateway(
        db: sea_orm::DatabaseConnection,
        config: Config,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        use super::{
            ApplicationDesk, Authenticator, CartManager, CheckoutProcessor, ClassCatalog,
            Reporter, UserManager,
        };

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            class_service: Arc::new(ClassCatalog::new(uow.clone())),
            cart_service: Arc::new(CartManager::new(uow.clone())),
            checkout_service: Arc::new(CheckoutProcessor::new(uow.clone(), gateway)),
            reporting_service: Arc::new(Reporter::new(uow.clone())),
            application_service: Arc::new(ApplicationDesk::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn classes(&self) -> Arc<dyn ClassService> {
        self.class_service.clone()
    }

    fn carts(&self) -> Arc<dyn CartService> {
        self.cart_service.clone()
    }

    fn checkout(&self) -> Arc<dyn CheckoutService> {
        self.checkout_service.clone()
    }

    fn reporting(&self) -> Arc<dyn ReportingService> {
        self.reporting_service.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationService> {
        self.application_service.clone()
    }
}
