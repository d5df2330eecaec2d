//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    application_handler, auth_handler, cart_handler, class_handler, payment_handler,
    report_handler, user_handler,
};
use crate::domain::{
    AdminStats, CartItem, CheckoutSummary, Class, EnrolledClass, Enrollment, InstructorApplication,
    InstructorRanking, NewApplication, NewCartItem, NewClass, NewUser, PaymentInfo, PaymentIntent,
    PaymentIntentRequest, PaymentRecord, ReviewStatus, SeatCount, StatusChange, UpdateClass,
    UpdateUser, User, UserRole,
};
use crate::services::{PaymentCount, TokenRequest, TokenResponse};

/// OpenAPI documentation for the Yoga Master API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Yoga Master API",
        version = "0.1.0",
        description = "Course marketplace backend: classes, carts, checkout and instructor review",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::set_token,
        user_handler::create_user,
        user_handler::list_instructors,
        user_handler::get_user,
        user_handler::get_user_by_email,
        user_handler::list_users,
        user_handler::update_user,
        user_handler::delete_user,
        class_handler::list_classes,
        class_handler::get_class,
        class_handler::popular_classes,
        class_handler::create_class,
        class_handler::list_instructor_classes,
        class_handler::update_class,
        class_handler::manage_classes,
        class_handler::change_status,
        cart_handler::add_to_cart,
        cart_handler::get_cart_item,
        cart_handler::list_cart,
        cart_handler::delete_cart_item,
        payment_handler::create_payment_intent,
        payment_handler::payment_info,
        payment_handler::payment_history,
        payment_handler::payment_history_length,
        report_handler::popular_instructors,
        report_handler::enrolled_classes,
        report_handler::admin_stats,
        application_handler::apply,
        application_handler::get_application,
        application_handler::list_applications,
        application_handler::change_status,
    ),
    components(
        schemas(
            UserRole,
            User,
            NewUser,
            UpdateUser,
            ReviewStatus,
            SeatCount,
            Class,
            NewClass,
            UpdateClass,
            StatusChange,
            CartItem,
            NewCartItem,
            Enrollment,
            EnrolledClass,
            PaymentRecord,
            PaymentInfo,
            PaymentIntentRequest,
            PaymentIntent,
            CheckoutSummary,
            PaymentCount,
            InstructorRanking,
            AdminStats,
            InstructorApplication,
            NewApplication,
            TokenRequest,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuance"),
        (name = "Users", description = "Accounts and roles"),
        (name = "Classes", description = "Class catalog and moderation"),
        (name = "Cart", description = "Shopping cart"),
        (name = "Payments", description = "Payment intents, checkout and history"),
        (name = "Reports", description = "Rankings and dashboards"),
        (name = "Applications", description = "Instructor applications")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/set-token"))
                        .build(),
                ),
            );
        }
    }
}
