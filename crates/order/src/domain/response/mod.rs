mod api;
mod cart;
mod order;
mod payment;

pub use self::api::ApiResponse;
pub use self::cart::{CartItemResponse, CartLineResponse, ProductSummaryResponse};
pub use self::order::{
    AdminOrderResponse, OrderDetailResponse, OrderItemResponse, OrderResponse,
    UserSummaryResponse,
};
pub use self::payment::{CreateOrderResponse, PaymentIntentResponse, VerifyPaymentResponse};
