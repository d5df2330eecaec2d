//! Application route configuration.

use axum::{
    extract::State,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    admin_application_routes, admin_class_routes, admin_report_routes, admin_user_routes,
    auth_routes, cart_routes, instructor_class_routes, member_application_routes,
    member_report_routes, member_user_routes, payment_routes, public_class_routes,
    public_report_routes, public_user_routes,
};
use super::middleware::{auth_middleware, require_admin, require_instructor};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .merge(auth_routes())
        .merge(public_user_routes())
        .merge(public_class_routes())
        .merge(public_report_routes());

    let members = Router::new()
        .merge(member_user_routes())
        .merge(cart_routes())
        .merge(payment_routes())
        .merge(member_report_routes())
        .merge(member_application_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Layers run outside-in: the token is verified before the role lookup
    let instructors = instructor_class_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_instructor))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let admins = Router::new()
        .merge(admin_user_routes())
        .merge(admin_class_routes())
        .merge(admin_report_routes())
        .merge(admin_application_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public)
        .merge(members)
        .merge(instructors)
        .merge(admins)
        // Global middleware
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);

    match state.cors_origin.clone() {
        Some(origin) => layer.allow_origin(origin),
        None => layer,
    }
}

/// Root endpoint
async fn root() -> &'static str {
    "Yoga Master Server is running!"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.database.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let healthy = database.status == "healthy";
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database },
    };

    (status_code, Json(response))
}
