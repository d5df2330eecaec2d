//! Instructor application handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{InstructorApplication, NewApplication, StatusChange};
use crate::errors::AppResult;

/// Routes for any authenticated caller
pub fn member_application_routes() -> Router<AppState> {
    Router::new()
        .route("/as-instructor", post(apply))
        .route("/applied-instructors/:email", get(get_application))
}

/// Routes for administrators
pub fn admin_application_routes() -> Router<AppState> {
    Router::new()
        .route("/applied-instructors", get(list_applications))
        .route("/change-instructor-status/:id", patch(change_status))
}

/// Apply to become an instructor
#[utoipa::path(
    post,
    path = "/as-instructor",
    tag = "Applications",
    security(("bearer_auth" = [])),
    request_body = NewApplication,
    responses(
        (status = 201, description = "Application submitted", body = InstructorApplication),
        (status = 400, description = "Validation error")
    )
)]
pub async fn apply(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewApplication>,
) -> AppResult<(StatusCode, Json<InstructorApplication>)> {
    let application = state
        .application_service
        .submit(&current_user.email, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// The caller's latest application, if any
#[utoipa::path(
    get,
    path = "/applied-instructors/{email}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Applicant email")),
    responses(
        (status = 200, description = "Application or null", body = InstructorApplication),
        (status = 403, description = "Not the caller's application")
    )
)]
pub async fn get_application(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Option<InstructorApplication>>> {
    current_user.ensure_owner(&email)?;
    Ok(Json(state.application_service.find_by_email(&email).await?))
}

/// All applications, newest first (admin only)
#[utoipa::path(
    get,
    path = "/applied-instructors",
    tag = "Applications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Applications", body = Vec<InstructorApplication>),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_applications(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<InstructorApplication>>> {
    Ok(Json(state.application_service.list().await?))
}

/// Approve or reject an application (admin only)
#[utoipa::path(
    patch,
    path = "/change-instructor-status/{id}",
    operation_id = "change_instructor_status",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = StatusChange,
    responses(
        (status = 204, description = "Status changed"),
        (status = 400, description = "Status and reason are required"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<StatusChange>,
) -> AppResult<StatusCode> {
    state.application_service.change_status(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}
