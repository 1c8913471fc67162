use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Upper bound for a single cart line, also applied when repeated adds merge.
pub const MAX_LINE_QUANTITY: i32 = 100;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    #[validate(range(min = 1))]
    pub product_id: i32,

    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1, max = 100))]
    pub quantity: i32,
}
