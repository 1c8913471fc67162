use crate::model::{Order as OrderModel, OrderItem as OrderItemModel, OrderWithUser, User};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub status: String,
    #[schema(value_type = String, example = "2000.00")]
    pub total_amount: Decimal,
    pub payment_mode: String,
    pub payment_id: Option<String>,
    #[schema(value_type = Object)]
    pub address: serde_json::Value,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<OrderModel> for OrderResponse {
    fn from(value: OrderModel) -> Self {
        OrderResponse {
            id: value.id,
            user_id: value.user_id,
            status: value.status,
            total_amount: value.total_amount,
            payment_mode: value.payment_mode,
            payment_id: value.payment_id,
            address: value.address,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    #[schema(value_type = String, example = "500.00")]
    pub price: Decimal,
}

impl From<OrderItemModel> for OrderItemResponse {
    fn from(value: OrderItemModel) -> Self {
        OrderItemResponse {
            id: value.id,
            order_id: value.order_id,
            product_id: value.product_id,
            quantity: value.quantity,
            price: value.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
}

impl OrderDetailResponse {
    pub fn new(order: OrderModel, items: Vec<OrderItemModel>) -> Self {
        Self {
            order: order.into(),
            items: items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    pub id: i32,
    pub username: String,
    pub is_admin: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl From<User> for UserSummaryResponse {
    fn from(value: User) -> Self {
        UserSummaryResponse {
            id: value.id,
            username: value.username,
            is_admin: value.is_admin,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct AdminOrderResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub user: Option<UserSummaryResponse>,
}

impl From<OrderWithUser> for AdminOrderResponse {
    fn from(value: OrderWithUser) -> Self {
        AdminOrderResponse {
            order: value.order.into(),
            user: value.user.map(UserSummaryResponse::from),
        }
    }
}
