//! Read-only reporting handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{AdminStats, EnrolledClass, InstructorRanking};
use crate::errors::AppResult;

/// Routes open to anonymous callers
pub fn public_report_routes() -> Router<AppState> {
    Router::new().route("/popular-instructors", get(popular_instructors))
}

/// Routes for any authenticated caller
pub fn member_report_routes() -> Router<AppState> {
    Router::new().route("/enrolled-classes/:email", get(enrolled_classes))
}

/// Routes for administrators
pub fn admin_report_routes() -> Router<AppState> {
    Router::new().route("/admin-stats", get(admin_stats))
}

/// Instructors ranked by enrollment across their classes
#[utoipa::path(
    get,
    path = "/popular-instructors",
    tag = "Reports",
    responses((status = 200, description = "Top instructors", body = Vec<InstructorRanking>))
)]
pub async fn popular_instructors(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<InstructorRanking>>> {
    Ok(Json(state.reporting_service.popular_instructors().await?))
}

/// Classes the caller bought, one row per class
#[utoipa::path(
    get,
    path = "/enrolled-classes/{email}",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Student email")),
    responses(
        (status = 200, description = "Enrolled classes", body = Vec<EnrolledClass>),
        (status = 403, description = "Not the caller's enrollments")
    )
)]
pub async fn enrolled_classes(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<EnrolledClass>>> {
    current_user.ensure_owner(&email)?;
    Ok(Json(state.reporting_service.enrolled_classes(&email).await?))
}

/// Dashboard counters (admin only)
#[utoipa::path(
    get,
    path = "/admin-stats",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Counters", body = AdminStats),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn admin_stats(State(state): State<AppState>) -> AppResult<Json<AdminStats>> {
    Ok(Json(state.reporting_service.admin_stats().await?))
}
