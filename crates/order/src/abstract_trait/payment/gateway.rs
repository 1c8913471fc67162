use crate::{domain::requests::CreateIntentRequest, model::PaymentIntent};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynPaymentGateway = Arc<dyn PaymentGatewayTrait + Send + Sync>;

#[async_trait]
pub trait PaymentGatewayTrait {
    /// Public key handed to the client checkout widget.
    fn key_id(&self) -> Option<String>;

    fn currency(&self) -> String;

    async fn create_intent(&self, req: &CreateIntentRequest)
    -> Result<PaymentIntent, ServiceError>;

    /// `Ok(false)` on mismatch, `Err` only when verification cannot run.
    fn verify_signature(
        &self,
        gateway_order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, ServiceError>;
}
