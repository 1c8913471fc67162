use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, max = 100))]
    pub razorpay_payment_id: String,

    #[validate(length(min = 1, max = 256))]
    pub razorpay_signature: String,
}

/// Remote payment order to open on the gateway, amount in minor units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIntentRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}
