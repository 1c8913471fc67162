use crate::{
    abstract_trait::{
        DynCartRepository, DynOrderCommandRepository, DynOrderQueryRepository, DynPaymentGateway,
        OrderCommandServiceTrait,
    },
    domain::{
        money::{order_total, to_minor_units},
        requests::{
            CreateIntentRequest, CreateOrderItemRecordRequest, CreateOrderRecordRequest,
            CreateOrderRequest, UpdateOrderStatusRequest,
        },
        response::{
            ApiResponse, CreateOrderResponse, OrderDetailResponse, OrderResponse,
            PaymentIntentResponse,
        },
        status::{OrderStatus, PaymentMode},
    },
    model::{CartLine, Order as OrderModel},
    service::cart::read_cart_snapshot,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

const DEFAULT_COUNTRY: &str = "India";

pub struct OrderCommandServiceDeps {
    pub cart: DynCartRepository,
    pub command: DynOrderCommandRepository,
    pub query: DynOrderQueryRepository,
    pub gateway: DynPaymentGateway,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

#[derive(Clone)]
pub struct OrderCommandService {
    cart: DynCartRepository,
    command: DynOrderCommandRepository,
    query: DynOrderQueryRepository,
    gateway: DynPaymentGateway,
    tracer: OperationTracer,
}

impl OrderCommandService {
    pub async fn new(deps: OrderCommandServiceDeps) -> Self {
        let OrderCommandServiceDeps {
            cart,
            command,
            query,
            gateway,
            metrics,
            registry,
        } = deps;

        metrics
            .lock()
            .await
            .register("order_command_service", &mut *registry.lock().await);

        Self {
            cart,
            command,
            query,
            gateway,
            tracer: OperationTracer::new("order-command-service", metrics),
        }
    }

    fn check_lines(lines: &[CartLine], mode: PaymentMode) -> Result<(), ServiceError> {
        for line in lines {
            if line.item.quantity > line.product.stock {
                return Err(ServiceError::InsufficientStock {
                    product_id: line.product.id,
                    requested: line.item.quantity,
                    available: line.product.stock,
                });
            }

            if mode == PaymentMode::Cod && !line.product.is_cod_available {
                return Err(ServiceError::CodUnavailable(line.product.name.clone()));
            }
        }

        Ok(())
    }

    async fn find_owned(&self, user_id: i32, order_id: i32) -> Result<OrderModel, ServiceError> {
        self.query
            .find_by_id(order_id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or(ServiceError::OrderNotFound)
    }

    fn intent_response(
        &self,
        order_id: i32,
        reference: String,
        amount: i64,
    ) -> PaymentIntentResponse {
        PaymentIntentResponse {
            order_id,
            razorpay_order_id: reference,
            amount,
            currency: self.gateway.currency(),
            key_id: self.gateway.key_id().unwrap_or_default(),
        }
    }

    /// Opens a gateway order for `order` and records its reference. When a
    /// concurrent caller stored a reference first, that one wins.
    async fn attach_payment_intent(
        &self,
        order: &OrderModel,
    ) -> Result<(OrderModel, PaymentIntentResponse), ServiceError> {
        let amount = to_minor_units(order.total_amount)?;

        let intent = self
            .gateway
            .create_intent(&CreateIntentRequest {
                amount,
                currency: self.gateway.currency(),
                receipt: format!("order_rcptid_{}", order.id),
            })
            .await?;

        let stored = match self.command.set_payment_id(order.id, &intent.id).await? {
            Some(updated) => updated,
            None => {
                warn!(
                    "⚠️ Order {} already had a payment reference, discarding {}",
                    order.id, intent.id
                );
                self.query
                    .find_by_id(order.id)
                    .await?
                    .ok_or(ServiceError::OrderNotFound)?
            }
        };

        let reference = stored.payment_id.clone().ok_or_else(|| {
            ServiceError::Internal(format!("Order {} has no payment reference", stored.id))
        })?;

        let response = self.intent_response(stored.id, reference, amount);
        Ok((stored, response))
    }

    async fn place_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, ServiceError> {
        let lines = read_cart_snapshot(&self.cart, user_id).await?;
        Self::check_lines(&lines, req.payment_mode)?;

        let total = order_total(
            lines
                .iter()
                .map(|line| (line.product.price, line.item.quantity)),
        );

        if total <= Decimal::ZERO {
            return Err(ServiceError::Validation(vec![format!(
                "Order total must be greater than zero, got {total}"
            )]));
        }

        if let Some(client_total) = req.total_amount {
            if client_total != total {
                warn!(
                    "⚠️ Client total {client_total} for user {user_id} differs from computed {total}, ignoring it"
                );
            }
        }

        let mut address = req.address.clone();
        if address.country.is_none() {
            address.country = Some(DEFAULT_COUNTRY.to_string());
        }
        let address = serde_json::to_value(&address)
            .map_err(|e| ServiceError::Internal(format!("Failed to encode address: {e}")))?;

        let confirm_status = match req.payment_mode {
            PaymentMode::Cod => Some(OrderStatus::Pending.transition_to(OrderStatus::CodConfirmed)?),
            PaymentMode::Gateway => None,
        };

        let record = CreateOrderRecordRequest {
            user_id,
            total_amount: total,
            payment_mode: req.payment_mode,
            address,
            items: lines
                .iter()
                .map(|line| CreateOrderItemRecordRequest {
                    cart_item_id: line.item.id,
                    product_id: line.product.id,
                    quantity: line.item.quantity,
                    price: line.product.price,
                })
                .collect(),
            confirm_status,
        };

        let (order, items) = self.command.create_from_cart(&record).await?;

        info!(
            "🧾 Order {} placed by user {} for {} ({})",
            order.id, user_id, order.total_amount, order.payment_mode
        );

        let (order, payment) = match req.payment_mode {
            PaymentMode::Cod => (order, None),
            PaymentMode::Gateway => {
                let order_id = order.id;
                let (order, intent) =
                    self.attach_payment_intent(&order)
                        .await
                        .map_err(|err| match err {
                            ServiceError::GatewayUnavailable(msg) => {
                                ServiceError::GatewayUnavailable(format!(
                                    "{msg}; order {order_id} is pending, retry payment for it"
                                ))
                            }
                            other => other,
                        })?;
                (order, Some(intent))
            }
        };

        Ok(CreateOrderResponse {
            order: OrderDetailResponse::new(order, items),
            payment,
        })
    }

    async fn retry_intent(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<PaymentIntentResponse, ServiceError> {
        let order = self.find_owned(user_id, order_id).await?;

        let mode: PaymentMode = order.payment_mode.parse()?;
        if mode != PaymentMode::Gateway {
            return Err(ServiceError::Validation(vec![format!(
                "Order {order_id} is not paid through the gateway"
            )]));
        }

        let status: OrderStatus = order.status.parse()?;
        if status != OrderStatus::Pending {
            return Err(ServiceError::IllegalTransition {
                from: status.to_string(),
                to: OrderStatus::Paid.to_string(),
            });
        }

        if let Some(reference) = order.payment_id.clone() {
            info!("💳 Order {order_id} already has payment reference {reference}");
            let amount = to_minor_units(order.total_amount)?;
            return Ok(self.intent_response(order.id, reference, amount));
        }

        let (_, intent) = self.attach_payment_intent(&order).await?;
        Ok(intent)
    }

    async fn change_status(
        &self,
        order_id: i32,
        next: OrderStatus,
    ) -> Result<OrderModel, ServiceError> {
        let order = self
            .query
            .find_by_id(order_id)
            .await?
            .ok_or(ServiceError::OrderNotFound)?;

        let current: OrderStatus = order.status.parse()?;
        let mode: PaymentMode = order.payment_mode.parse()?;

        let refused = match next {
            OrderStatus::Paid => true,
            OrderStatus::CodConfirmed => mode != PaymentMode::Cod,
            _ => false,
        };
        if refused {
            warn!("⚠️ Admin attempted {current} -> {next} on order {order_id} ({mode})");
            return Err(ServiceError::IllegalTransition {
                from: current.to_string(),
                to: next.to_string(),
            });
        }

        current.transition_to(next)?;

        if let Some(updated) = self
            .command
            .transition_status(order_id, current, next)
            .await?
        {
            return Ok(updated);
        }

        match self.query.find_by_id(order_id).await? {
            None => Err(ServiceError::OrderNotFound),
            Some(_) => Err(ServiceError::ConcurrentUpdate),
        }
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<CreateOrderResponse>, ServiceError> {
        info!("🏗️ Creating new order for user_id={user_id}");

        let ctx = self.tracer.start(
            "create_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "create"),
                KeyValue::new("order.user_id", user_id.to_string()),
                KeyValue::new("order.payment_mode", req.payment_mode.as_str()),
            ],
        );

        match self.place_order(user_id, req).await {
            Ok(response) => {
                self.tracer
                    .complete_success(&ctx, Method::Post, "Order created")
                    .await;
                Ok(ApiResponse::success("Order created successfully", response))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&ctx, Method::Post, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }

    async fn create_payment_intent(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<ApiResponse<PaymentIntentResponse>, ServiceError> {
        let ctx = self.tracer.start(
            "create_payment_intent",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "payment_intent"),
                KeyValue::new("order.id", order_id.to_string()),
            ],
        );

        match self.retry_intent(user_id, order_id).await {
            Ok(intent) => {
                self.tracer
                    .complete_success(&ctx, Method::Post, "Payment intent ready")
                    .await;
                Ok(ApiResponse::success("Payment intent created", intent))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&ctx, Method::Post, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }

    async fn update_status(
        &self,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("✏️ Updating status of order {order_id} to {}", req.status);

        let ctx = self.tracer.start(
            "update_order_status",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "update_status"),
                KeyValue::new("order.id", order_id.to_string()),
                KeyValue::new("order.status", req.status.as_str()),
            ],
        );

        match self.change_status(order_id, req.status).await {
            Ok(order) => {
                self.tracer
                    .complete_success(&ctx, Method::Put, "Order status updated")
                    .await;
                Ok(ApiResponse::success(
                    "Order status updated successfully",
                    order.into(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&ctx, Method::Put, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }
}
