use crate::{
    abstract_trait::DynCartService,
    domain::{
        requests::{AddCartItemRequest, UpdateCartItemRequest},
        response::{ApiResponse, CartItemResponse, CartLineResponse},
    },
    middleware::{SimpleValidatedJson, auth_middleware, session_middleware},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch},
};
use shared::{cache::Session, errors::HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart lines with product details", body = ApiResponse<Vec<CartLineResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartService>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_cart(session.user_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Cart item added or incremented", body = ApiResponse<CartItemResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(session): Extension<Session>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_item(session.user_id, &body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Cart item ID")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated", body = ApiResponse<CartItemResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Cart item not found")
    )
)]
pub async fn update_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_item(session.user_id, id, &body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Cart item ID")),
    responses(
        (status = 204, description = "Cart item removed"),
        (status = 404, description = "Cart item not found")
    )
)]
pub async fn remove_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    service.remove_item(session.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cart", get(get_cart).post(add_cart_item))
        .route(
            "/api/cart/{id}",
            patch(update_cart_item).delete(remove_cart_item),
        )
        .route_layer(middleware::from_fn(session_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.cart.clone()))
        .layer(Extension(app_state.di_container.user_query.clone()))
        .layer(Extension(app_state.session.clone()))
        .layer(Extension(app_state.session_ttl))
        .layer(Extension(app_state.jwt_config.clone()))
}
