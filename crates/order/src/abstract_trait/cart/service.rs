use crate::domain::{
    requests::{AddCartItemRequest, UpdateCartItemRequest},
    response::{ApiResponse, CartItemResponse, CartLineResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartServiceTrait {
    async fn get_cart(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<CartLineResponse>>, ServiceError>;
    async fn add_item(
        &self,
        user_id: i32,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<CartItemResponse>, ServiceError>;
    async fn update_item(
        &self,
        user_id: i32,
        id: i32,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartItemResponse>, ServiceError>;
    async fn remove_item(&self, user_id: i32, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
