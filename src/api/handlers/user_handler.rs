//! User handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{NewUser, UpdateUser, User};
use crate::errors::AppResult;

/// Routes open to anonymous callers
pub fn public_user_routes() -> Router<AppState> {
    Router::new()
        .route("/new-user", post(create_user))
        .route("/instructors", get(list_instructors))
}

/// Routes for any authenticated caller
pub fn member_user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id", get(get_user))
        .route("/user/:email", get(get_user_by_email))
}

/// Routes for administrators
pub fn admin_user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/delete-user/:id", delete(delete_user))
        .route("/update-user/:id", put(update_user))
}

/// Sign up a new student account
#[utoipa::path(
    post,
    path = "/new-user",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.user_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List users whose role is instructor
#[utoipa::path(
    get,
    path = "/instructors",
    tag = "Users",
    responses((status = 200, description = "Instructors", body = Vec<User>))
)]
pub async fn list_instructors(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.user_service.list_instructors().await?))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<User>> {
    Ok(Json(state.user_service.get_user(id).await?))
}

/// Get the caller's own profile by email
#[utoipa::path(
    get,
    path = "/user/{email}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the caller's email"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_email(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<User>> {
    current_user.ensure_owner(&email)?;
    Ok(Json(state.user_service.get_user_by_email(&email).await?))
}

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all users", body = Vec<User>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.user_service.list_users().await?))
}

/// Delete user (admin only)
#[utoipa::path(
    delete,
    path = "/delete-user/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Update any user field including the role (admin only)
#[utoipa::path(
    put,
    path = "/update-user/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> AppResult<Json<User>> {
    Ok(Json(state.user_service.update_user(id, payload).await?))
}
