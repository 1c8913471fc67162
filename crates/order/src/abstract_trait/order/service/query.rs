use crate::domain::{
    requests::FindAllOrders,
    response::{AdminOrderResponse, ApiResponse, OrderDetailResponse, OrderResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn find_owned(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponse<Vec<AdminOrderResponse>>, ServiceError>;
}
