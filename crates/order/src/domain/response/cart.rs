use crate::model::{CartItem, CartLine, Product};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

impl From<CartItem> for CartItemResponse {
    fn from(value: CartItem) -> Self {
        CartItemResponse {
            id: value.id,
            user_id: value.user_id,
            product_id: value.product_id,
            quantity: value.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummaryResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    #[schema(value_type = String, example = "500.00")]
    pub price: Decimal,
    pub stock: i32,
    pub is_cod_available: bool,
}

impl From<Product> for ProductSummaryResponse {
    fn from(value: Product) -> Self {
        ProductSummaryResponse {
            id: value.id,
            name: value.name,
            slug: value.slug,
            price: value.price,
            stock: value.stock,
            is_cod_available: value.is_cod_available,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct CartLineResponse {
    #[serde(flatten)]
    pub item: CartItemResponse,
    pub product: ProductSummaryResponse,
}

impl From<CartLine> for CartLineResponse {
    fn from(value: CartLine) -> Self {
        CartLineResponse {
            item: value.item.into(),
            product: value.product.into(),
        }
    }
}
