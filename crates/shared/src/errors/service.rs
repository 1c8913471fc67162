use crate::errors::repository::RepositoryError;
use jsonwebtoken::errors::Error as JwtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Order not found")]
    OrderNotFound,

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid payment signature")]
    InvalidSignature,

    #[error("Illegal status transition from '{from}' to '{to}'")]
    IllegalTransition { from: String, to: String },

    #[error(
        "Insufficient stock for product {product_id}: requested={requested}, available={available}"
    )]
    InsufficientStock {
        product_id: i32,
        requested: i32,
        available: i32,
    },

    #[error("Cash on delivery is not available for product {0}")]
    CodUnavailable(String),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Order was modified concurrently, please retry")]
    ConcurrentUpdate,

    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid Token")]
    InvalidTokenType,

    #[error("Internal error: {0}")]
    Internal(String),
}
