use crate::model::{CartItem, CartLine};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCartRepository = Arc<dyn CartRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CartRepositoryTrait {
    /// The user's cart joined with current product rows, ordered by cart item id.
    async fn list_with_products(&self, user_id: i32) -> Result<Vec<CartLine>, RepositoryError>;

    /// Adds `quantity` of a product, incrementing an existing row for the same
    /// product. `None` when the product does not exist.
    async fn add_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError>;

    async fn update_quantity(
        &self,
        user_id: i32,
        id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError>;

    async fn remove_item(&self, user_id: i32, id: i32) -> Result<bool, RepositoryError>;
}
