use crate::{
    abstract_trait::{CartServiceTrait, DynCartRepository},
    domain::{
        requests::{AddCartItemRequest, UpdateCartItemRequest},
        response::{ApiResponse, CartItemResponse, CartLineResponse},
    },
    model::CartLine,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Current cart joined with product rows. Never returns an empty snapshot.
pub async fn read_cart_snapshot(
    cart: &DynCartRepository,
    user_id: i32,
) -> Result<Vec<CartLine>, ServiceError> {
    let lines = cart.list_with_products(user_id).await?;

    if lines.is_empty() {
        info!("🛒 Cart of user {user_id} is empty");
        return Err(ServiceError::EmptyCart);
    }

    Ok(lines)
}

pub struct CartServiceDeps {
    pub cart: DynCartRepository,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

#[derive(Clone)]
pub struct CartService {
    cart: DynCartRepository,
    tracer: OperationTracer,
}

impl CartService {
    pub async fn new(deps: CartServiceDeps) -> Self {
        let CartServiceDeps {
            cart,
            metrics,
            registry,
        } = deps;

        metrics
            .lock()
            .await
            .register("cart_service", &mut *registry.lock().await);

        Self {
            cart,
            tracer: OperationTracer::new("cart-service", metrics),
        }
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn get_cart(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<CartLineResponse>>, ServiceError> {
        let ctx = self.tracer.start(
            "get_cart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("user_id", user_id.to_string()),
            ],
        );

        let lines = match self.cart.list_with_products(user_id).await {
            Ok(lines) => lines,
            Err(err) => {
                self.tracer
                    .complete_error(&ctx, Method::Get, "Failed to read cart")
                    .await;
                return Err(err.into());
            }
        };

        self.tracer
            .complete_success(&ctx, Method::Get, "Cart retrieved")
            .await;

        Ok(ApiResponse::success(
            "Cart retrieved successfully",
            lines.into_iter().map(CartLineResponse::from).collect(),
        ))
    }

    async fn add_item(
        &self,
        user_id: i32,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<CartItemResponse>, ServiceError> {
        let ctx = self.tracer.start(
            "add_cart_item",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("user_id", user_id.to_string()),
                KeyValue::new("product_id", req.product_id.to_string()),
            ],
        );

        let result = match self
            .cart
            .add_item(user_id, req.product_id, req.quantity)
            .await
        {
            Ok(Some(item)) => Ok(item),
            Ok(None) => Err(ServiceError::NotFound("Product".into())),
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(item) => {
                self.tracer
                    .complete_success(&ctx, Method::Post, "Cart item added")
                    .await;
                Ok(ApiResponse::success("Item added to cart", item.into()))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&ctx, Method::Post, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }

    async fn update_item(
        &self,
        user_id: i32,
        id: i32,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartItemResponse>, ServiceError> {
        let ctx = self.tracer.start(
            "update_cart_item",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("cart_item_id", id.to_string()),
            ],
        );

        let result = match self.cart.update_quantity(user_id, id, req.quantity).await {
            Ok(Some(item)) => Ok(item),
            Ok(None) => Err(ServiceError::NotFound("Cart item".into())),
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(item) => {
                self.tracer
                    .complete_success(&ctx, Method::Patch, "Cart item updated")
                    .await;
                Ok(ApiResponse::success("Cart item updated", item.into()))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&ctx, Method::Patch, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }

    async fn remove_item(&self, user_id: i32, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let ctx = self.tracer.start(
            "remove_cart_item",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("cart_item_id", id.to_string()),
            ],
        );

        let result = match self.cart.remove_item(user_id, id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ServiceError::NotFound("Cart item".into())),
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(()) => {
                self.tracer
                    .complete_success(&ctx, Method::Delete, "Cart item removed")
                    .await;
                Ok(ApiResponse::success("Cart item removed", ()))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&ctx, Method::Delete, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }
}
