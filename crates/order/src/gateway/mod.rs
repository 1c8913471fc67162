mod razorpay;
mod signature;

pub use self::razorpay::{RazorpayConfig, RazorpayCredentials, RazorpayGateway};
pub use self::signature::PaymentSignature;
