use crate::domain::status::{OrderStatus, PaymentMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Shipping address copied verbatim into the order at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(length(min = 7, max = 20))]
    pub phone: String,

    #[validate(length(min = 1, max = 200))]
    pub line1: String,

    #[validate(length(max = 200))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    #[validate(length(min = 1, max = 100))]
    pub state: String,

    #[validate(length(min = 4, max = 10))]
    pub pincode: String,

    #[validate(length(min = 1, max = 100))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Display hint only; the persisted total is always computed server-side.
    #[serde(default)]
    pub total_amount: Option<Decimal>,

    pub payment_mode: PaymentMode,

    #[validate(nested)]
    pub address: ShippingAddress,
}

#[derive(Debug, Clone)]
pub struct CreateOrderItemRecordRequest {
    pub cart_item_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
}

/// Everything the checkout transaction writes. `confirm_status`, when set,
/// is applied to the freshly inserted `pending` row inside the same
/// transaction.
#[derive(Debug, Clone)]
pub struct CreateOrderRecordRequest {
    pub user_id: i32,
    pub total_amount: Decimal,
    pub payment_mode: PaymentMode,
    pub address: serde_json::Value,
    pub items: Vec<CreateOrderItemRecordRequest>,
    pub confirm_status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FindAllOrders {
    #[validate(range(min = 1))]
    pub user_id: Option<i32>,

    pub status: Option<String>,
}
