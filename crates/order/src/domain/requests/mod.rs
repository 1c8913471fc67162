mod cart;
mod order;
mod payment;

pub use self::cart::{AddCartItemRequest, MAX_LINE_QUANTITY, UpdateCartItemRequest};
pub use self::order::{
    CreateOrderItemRecordRequest, CreateOrderRecordRequest, CreateOrderRequest, FindAllOrders,
    ShippingAddress, UpdateOrderStatusRequest,
};
pub use self::payment::{CreateIntentRequest, VerifyPaymentRequest};
