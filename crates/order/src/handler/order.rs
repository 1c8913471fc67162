use crate::{
    abstract_trait::{DynOrderCommandService, DynOrderQueryService, DynPaymentService},
    domain::{
        requests::{CreateOrderRequest, VerifyPaymentRequest},
        response::{
            ApiResponse, CreateOrderResponse, OrderDetailResponse, OrderResponse,
            PaymentIntentResponse, VerifyPaymentResponse,
        },
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
    routing::{get, post},
};
use shared::{cache::Session, errors::HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Orders of the caller", body = ApiResponse<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_user(session.user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with its items", body = ApiResponse<OrderDetailResponse>),
        (status = 404, description = "Order not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_owned(session.user_id, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created from the cart", body = ApiResponse<CreateOrderResponse>),
        (status = 400, description = "Empty cart, stock, COD or validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Payment gateway unavailable, order left pending")
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(session): Extension<Session>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_order(session.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/payment-intent",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Gateway order for a pending order", body = ApiResponse<PaymentIntentResponse>),
        (status = 400, description = "Order is not a pending gateway order"),
        (status = 404, description = "Order not found"),
        (status = 503, description = "Payment gateway unavailable")
    )
)]
pub async fn create_payment_intent(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_payment_intent(session.user_id, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/verify-payment",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified", body = ApiResponse<VerifyPaymentResponse>),
        (status = 400, description = "Invalid signature or illegal transition"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Concurrent modification"),
        (status = 503, description = "Verification not configured")
    )
)]
pub async fn verify_payment(
    Extension(service): Extension<DynPaymentService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.verify_payment(session.user_id, id, &body).await?;
    Ok(Json(response))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders", get(get_orders).post(create_order))
        .route("/api/orders/{id}", get(get_order))
        .route(
            "/api/orders/{id}/payment-intent",
            post(create_payment_intent),
        )
        .route("/api/orders/{id}/verify-payment", post(verify_payment))
        .route_layer(middleware::from_fn(session_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.order_command.clone()))
        .layer(Extension(app_state.di_container.payment.clone()))
        .layer(Extension(app_state.di_container.user_query.clone()))
        .layer(Extension(app_state.session.clone()))
        .layer(Extension(app_state.session_ttl))
        .layer(Extension(app_state.jwt_config.clone()))
}
