mod gateway;
mod service;

pub use self::gateway::{DynPaymentGateway, PaymentGatewayTrait};
pub use self::service::{DynPaymentService, PaymentServiceTrait};
