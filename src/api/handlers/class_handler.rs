//! Class catalog handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post, put},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Class, NewClass, StatusChange, UpdateClass, User};
use crate::errors::{AppError, AppResult};

/// Routes open to anonymous callers
pub fn public_class_routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(list_classes))
        .route("/class/:id", get(get_class))
        .route("/popular_classes", get(popular_classes))
}

/// Routes for instructors and admins
pub fn instructor_class_routes() -> Router<AppState> {
    Router::new()
        .route("/new-class", post(create_class))
        .route("/classes/:email", get(list_instructor_classes))
        .route("/update-class/:id", put(update_class))
}

/// Routes for administrators
pub fn admin_class_routes() -> Router<AppState> {
    Router::new()
        .route("/classes-manage", get(manage_classes))
        .route("/change-status/:id", patch(change_status))
}

/// List approved classes
#[utoipa::path(
    get,
    path = "/classes",
    tag = "Classes",
    responses((status = 200, description = "Approved classes", body = Vec<Class>))
)]
pub async fn list_classes(State(state): State<AppState>) -> AppResult<Json<Vec<Class>>> {
    Ok(Json(state.class_service.list_approved().await?))
}

/// Get class by ID
#[utoipa::path(
    get,
    path = "/class/{id}",
    tag = "Classes",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class", body = Class),
        (status = 404, description = "Class not found")
    )
)]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Class>> {
    Ok(Json(state.class_service.get_class(id).await?))
}

/// Up to six classes with the most enrollments
#[utoipa::path(
    get,
    path = "/popular_classes",
    tag = "Classes",
    responses((status = 200, description = "Popular classes", body = Vec<Class>))
)]
pub async fn popular_classes(State(state): State<AppState>) -> AppResult<Json<Vec<Class>>> {
    Ok(Json(state.class_service.popular_classes().await?))
}

/// Submit a new class for review
#[utoipa::path(
    post,
    path = "/new-class",
    tag = "Classes",
    security(("bearer_auth" = [])),
    request_body = NewClass,
    responses(
        (status = 201, description = "Class created in pending status", body = Class),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Instructor only")
    )
)]
pub async fn create_class(
    Extension(instructor): Extension<User>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewClass>,
) -> AppResult<(StatusCode, Json<Class>)> {
    let class = state.class_service.create_class(&instructor, payload).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// Classes taught by one instructor (own classes unless admin)
#[utoipa::path(
    get,
    path = "/classes/{email}",
    tag = "Classes",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Instructor email")),
    responses(
        (status = 200, description = "Instructor's classes", body = Vec<Class>),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_instructor_classes(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<Class>>> {
    if !user.is_admin() && user.email != email {
        return Err(AppError::Forbidden);
    }
    Ok(Json(state.class_service.list_by_instructor(&email).await?))
}

/// Edit a class; it returns to pending review
#[utoipa::path(
    put,
    path = "/update-class/{id}",
    tag = "Classes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Class ID")),
    request_body = UpdateClass,
    responses(
        (status = 200, description = "Class updated", body = Class),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class not found")
    )
)]
pub async fn update_class(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateClass>,
) -> AppResult<Json<Class>> {
    Ok(Json(state.class_service.update_class(&user, id, payload).await?))
}

/// Every class in any status (admin only)
#[utoipa::path(
    get,
    path = "/classes-manage",
    tag = "Classes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All classes", body = Vec<Class>),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn manage_classes(State(state): State<AppState>) -> AppResult<Json<Vec<Class>>> {
    Ok(Json(state.class_service.list_all().await?))
}

/// Approve or reject a class (admin only)
#[utoipa::path(
    patch,
    path = "/change-status/{id}",
    tag = "Classes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Class ID")),
    request_body = StatusChange,
    responses(
        (status = 204, description = "Status changed"),
        (status = 400, description = "Status and reason are required"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Class not found")
    )
)]
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<StatusChange>,
) -> AppResult<StatusCode> {
    state.class_service.change_status(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}
