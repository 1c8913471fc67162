mod cart;
mod order;
mod payment;
mod user;

pub use self::cart::{
    CartRepositoryTrait, CartServiceTrait, DynCartRepository, DynCartService,
};
pub use self::order::{
    DynOrderCommandRepository, DynOrderCommandService, DynOrderQueryRepository,
    DynOrderQueryService, OrderCommandRepositoryTrait, OrderCommandServiceTrait,
    OrderQueryRepositoryTrait, OrderQueryServiceTrait,
};
pub use self::payment::{
    DynPaymentGateway, DynPaymentService, PaymentGatewayTrait, PaymentServiceTrait,
};
pub use self::user::{DynUserQueryRepository, UserQueryRepositoryTrait};
