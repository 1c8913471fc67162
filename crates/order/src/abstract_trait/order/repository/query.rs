use crate::{
    domain::status::OrderStatus,
    model::{Order as OrderModel, OrderItem as OrderItemModel, OrderWithUser},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError>;
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<OrderModel>, RepositoryError>;
    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItemModel>, RepositoryError>;
    async fn find_all_with_user(
        &self,
        user_id: Option<i32>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderWithUser>, RepositoryError>;
}
