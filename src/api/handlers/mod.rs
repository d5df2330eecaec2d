//! HTTP request handlers.

pub mod application_handler;
pub mod auth_handler;
pub mod cart_handler;
pub mod class_handler;
pub mod payment_handler;
pub mod report_handler;
pub mod user_handler;

pub use application_handler::{admin_application_routes, member_application_routes};
pub use auth_handler::auth_routes;
pub use cart_handler::cart_routes;
pub use class_handler::{admin_class_routes, instructor_class_routes, public_class_routes};
pub use payment_handler::payment_routes;
pub use report_handler::{admin_report_routes, member_report_routes, public_report_routes};
pub use user_handler::{admin_user_routes, member_user_routes, public_user_routes};
