//! Cart handlers. Every cart is scoped to the authenticated caller.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CartItem, Class, NewCartItem};
use crate::errors::AppResult;

/// Create cart routes
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add-to-cart", post(add_to_cart))
        .route("/cart-item/:id/:email", get(get_cart_item))
        .route("/cart/:email", get(list_cart))
        .route("/delete-cart-item/:id", delete(delete_cart_item))
}

/// Put a class in the caller's cart
#[utoipa::path(
    post,
    path = "/add-to-cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = NewCartItem,
    responses(
        (status = 201, description = "Cart line", body = CartItem),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Class not found")
    )
)]
pub async fn add_to_cart(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewCartItem>,
) -> AppResult<(StatusCode, Json<CartItem>)> {
    let item = state
        .cart_service
        .add_item(&current_user.email, payload.class_id)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Look up the caller's cart line for one class
#[utoipa::path(
    get,
    path = "/cart-item/{id}/{email}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Class ID"),
        ("email" = String, Path, description = "Cart owner email")
    ),
    responses(
        (status = 200, description = "Cart line or null", body = CartItem),
        (status = 403, description = "Not the caller's cart")
    )
)]
pub async fn get_cart_item(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path((id, email)): Path<(Uuid, String)>,
) -> AppResult<Json<Option<CartItem>>> {
    current_user.ensure_owner(&email)?;
    Ok(Json(state.cart_service.find_item(id, &email).await?))
}

/// Classes in the caller's cart, in the order they were added
#[utoipa::path(
    get,
    path = "/cart/{email}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Cart owner email")),
    responses(
        (status = 200, description = "Classes in the cart", body = Vec<Class>),
        (status = 403, description = "Not the caller's cart")
    )
)]
pub async fn list_cart(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<Class>>> {
    current_user.ensure_owner(&email)?;
    Ok(Json(state.cart_service.list_cart_classes(&email).await?))
}

/// Remove a class from the caller's cart
#[utoipa::path(
    delete,
    path = "/delete-cart-item/{id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Class not in the cart")
    )
)]
pub async fn delete_cart_item(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.cart_service.remove_item(id, &current_user.email).await?;
    Ok(StatusCode::NO_CONTENT)
}
