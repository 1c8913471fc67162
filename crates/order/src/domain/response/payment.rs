use crate::domain::response::order::OrderDetailResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What the client needs to open the hosted checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub order_id: i32,
    pub razorpay_order_id: String,
    /// Minor currency units (paise for INR).
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    #[serde(flatten)]
    pub order: OrderDetailResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentIntentResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub order_id: i32,
    pub status: String,
    pub already_verified: bool,
}
