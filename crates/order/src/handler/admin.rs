use crate::{
    abstract_trait::{DynOrderCommandService, DynOrderQueryService},
    domain::{
        requests::{FindAllOrders, UpdateOrderStatusRequest},
        response::{AdminOrderResponse, ApiResponse, OrderResponse},
    },
    middleware::{SimpleValidatedJson, auth_middleware, require_admin, session_middleware},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "Orders with their buyer", body = ApiResponse<Vec<AdminOrderResponse>>),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_all_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/status",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Illegal transition"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Concurrent modification")
    )
)]
pub async fn update_order_status(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_status(id, &body).await?;
    Ok(Json(response))
}

pub fn admin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/admin/orders", get(get_all_orders))
        .route("/api/admin/orders/{id}/status", put(update_order_status))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(session_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.order_command.clone()))
        .layer(Extension(app_state.di_container.user_query.clone()))
        .layer(Extension(app_state.session.clone()))
        .layer(Extension(app_state.session_ttl))
        .layer(Extension(app_state.jwt_config.clone()))
}
