use crate::domain::{
    requests::VerifyPaymentRequest,
    response::{ApiResponse, VerifyPaymentResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynPaymentService = Arc<dyn PaymentServiceTrait + Send + Sync>;

#[async_trait]
pub trait PaymentServiceTrait {
    async fn verify_payment(
        &self,
        user_id: i32,
        order_id: i32,
        req: &VerifyPaymentRequest,
    ) -> Result<ApiResponse<VerifyPaymentResponse>, ServiceError>;
}
