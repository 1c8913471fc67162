pub mod money;
pub mod requests;
pub mod response;
pub mod status;

pub use self::status::{OrderStatus, PaymentMode};
