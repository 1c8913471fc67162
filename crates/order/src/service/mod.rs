mod cart;
mod order;
mod payment;

pub use self::cart::{CartService, CartServiceDeps, read_cart_snapshot};
pub use self::order::{
    OrderCommandService, OrderCommandServiceDeps, OrderQueryService, OrderQueryServiceDeps,
};
pub use self::payment::{PaymentService, PaymentServiceDeps};
