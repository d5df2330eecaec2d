//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod application_service;
mod auth_service;
mod cart_service;
mod checkout_service;
mod class_service;
pub mod container;
mod reporting_service;
mod user_service;

#[cfg(test)]
pub(crate) mod testing;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use application_service::{ApplicationDesk, ApplicationService};
pub use auth_service::{AuthService, Authenticator, Claims, TokenRequest, TokenResponse};
pub use cart_service::{CartManager, CartService};
pub use checkout_service::{CheckoutProcessor, CheckoutService, PaymentCount};
pub use class_service::{ClassCatalog, ClassService};
pub use reporting_service::{Reporter, ReportingService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
