use crate::domain::{
    requests::{CreateOrderRequest, UpdateOrderStatusRequest},
    response::{ApiResponse, CreateOrderResponse, OrderResponse, PaymentIntentResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<CreateOrderResponse>, ServiceError>;
    async fn create_payment_intent(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<ApiResponse<PaymentIntentResponse>, ServiceError>;
    async fn update_status(
        &self,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
