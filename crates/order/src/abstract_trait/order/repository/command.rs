use crate::{
    domain::{requests::CreateOrderRecordRequest, status::OrderStatus},
    model::{Order as OrderModel, OrderItem as OrderItemModel},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Inserts the order and its items, deletes the consumed cart rows and
    /// applies `confirm_status` in a single transaction.
    async fn create_from_cart(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError>;

    /// Stores the gateway reference only while none is set. `None` when the
    /// order is missing or already carries a reference.
    async fn set_payment_id(
        &self,
        order_id: i32,
        payment_id: &str,
    ) -> Result<Option<OrderModel>, RepositoryError>;

    /// Conditional status write. `None` when the row is not in `from`.
    async fn transition_status(
        &self,
        order_id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<OrderModel>, RepositoryError>;
}
