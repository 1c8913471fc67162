use crate::{
    abstract_trait::{
        DynOrderCommandRepository, DynOrderQueryRepository, DynPaymentGateway,
        PaymentServiceTrait,
    },
    domain::{
        requests::VerifyPaymentRequest,
        response::{ApiResponse, VerifyPaymentResponse},
        status::OrderStatus,
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct PaymentServiceDeps {
    pub command: DynOrderCommandRepository,
    pub query: DynOrderQueryRepository,
    pub gateway: DynPaymentGateway,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

/// Signature gate in front of `pending -> paid`; the only writer of `paid`.
#[derive(Clone)]
pub struct PaymentService {
    command: DynOrderCommandRepository,
    query: DynOrderQueryRepository,
    gateway: DynPaymentGateway,
    tracer: OperationTracer,
}

impl PaymentService {
    pub async fn new(deps: PaymentServiceDeps) -> Self {
        let PaymentServiceDeps {
            command,
            query,
            gateway,
            metrics,
            registry,
        } = deps;

        metrics
            .lock()
            .await
            .register("payment_service", &mut *registry.lock().await);

        Self {
            command,
            query,
            gateway,
            tracer: OperationTracer::new("payment-service", metrics),
        }
    }

    fn verified(order_id: i32, already_verified: bool) -> VerifyPaymentResponse {
        VerifyPaymentResponse {
            order_id,
            status: OrderStatus::Paid.to_string(),
            already_verified,
        }
    }

    async fn verify(
        &self,
        user_id: i32,
        order_id: i32,
        req: &VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, ServiceError> {
        let order = self
            .query
            .find_by_id(order_id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or(ServiceError::OrderNotFound)?;

        let reference = order
            .payment_id
            .as_deref()
            .ok_or(ServiceError::OrderNotFound)?;

        let valid = self.gateway.verify_signature(
            reference,
            &req.razorpay_payment_id,
            &req.razorpay_signature,
        )?;
        if !valid {
            warn!("⚠️ Signature mismatch for order {order_id}");
            return Err(ServiceError::InvalidSignature);
        }

        let current: OrderStatus = order.status.parse()?;
        if current == OrderStatus::Paid {
            info!("💳 Order {order_id} was already verified");
            return Ok(Self::verified(order_id, true));
        }

        current.transition_to(OrderStatus::Paid)?;

        if self
            .command
            .transition_status(order_id, current, OrderStatus::Paid)
            .await?
            .is_some()
        {
            info!(
                "✅ Payment {} verified for order {order_id}",
                req.razorpay_payment_id
            );
            return Ok(Self::verified(order_id, false));
        }

        let latest = self
            .query
            .find_by_id(order_id)
            .await?
            .ok_or(ServiceError::OrderNotFound)?;

        if latest.status.parse::<OrderStatus>()? == OrderStatus::Paid {
            info!("💳 Order {order_id} was verified by a concurrent request");
            Ok(Self::verified(order_id, true))
        } else {
            Err(ServiceError::ConcurrentUpdate)
        }
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    async fn verify_payment(
        &self,
        user_id: i32,
        order_id: i32,
        req: &VerifyPaymentRequest,
    ) -> Result<ApiResponse<VerifyPaymentResponse>, ServiceError> {
        let ctx = self.tracer.start(
            "verify_payment",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new("order.id", order_id.to_string()),
            ],
        );

        match self.verify(user_id, order_id, req).await {
            Ok(response) => {
                self.tracer
                    .complete_success(&ctx, Method::Post, "Payment verified")
                    .await;
                let message = if response.already_verified {
                    "Payment already verified"
                } else {
                    "Payment verified successfully"
                };
                Ok(ApiResponse::success(message, response))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&ctx, Method::Post, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }
}
