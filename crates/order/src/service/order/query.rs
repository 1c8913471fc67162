use crate::{
    abstract_trait::{DynOrderQueryRepository, OrderQueryServiceTrait},
    domain::{
        requests::FindAllOrders,
        response::{AdminOrderResponse, ApiResponse, OrderDetailResponse, OrderResponse},
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
use validator::Validate;

pub struct OrderQueryServiceDeps {
    pub query: DynOrderQueryRepository,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    tracer: OperationTracer,
}

impl OrderQueryService {
    pub async fn new(deps: OrderQueryServiceDeps) -> Self {
        let OrderQueryServiceDeps {
            query,
            metrics,
            registry,
        } = deps;

        metrics
            .lock()
            .await
            .register("order_query_service", &mut *registry.lock().await);

        Self {
            query,
            tracer: OperationTracer::new("order-query-service", metrics),
        }
    }

    async fn load_owned(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<OrderDetailResponse, ServiceError> {
        let order = self
            .query
            .find_by_id(order_id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or(ServiceError::OrderNotFound)?;

        let items = self.query.find_items(order.id).await?;
        Ok(OrderDetailResponse::new(order, items))
    }

    async fn load_all(&self, req: &FindAllOrders) -> Result<Vec<AdminOrderResponse>, ServiceError> {
        req.validate()
            .map_err(|errors| ServiceError::Validation(vec![errors.to_string()]))?;

        let status = req
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<OrderStatus>)
            .transpose()?;

        let rows = self.query.find_all_with_user(req.user_id, status).await?;
        Ok(rows.into_iter().map(AdminOrderResponse::from).collect())
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        let ctx = self.tracer.start(
            "find_orders_by_user",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.user_id", user_id.to_string()),
            ],
        );

        match self.query.find_by_user(user_id).await {
            Ok(orders) => {
                self.tracer
                    .complete_success(&ctx, Method::Get, "Orders retrieved")
                    .await;
                Ok(ApiResponse::success(
                    "Orders retrieved successfully",
                    orders.into_iter().map(OrderResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&ctx, Method::Get, "Failed to list orders")
                    .await;
                Err(err.into())
            }
        }
    }

    async fn find_owned(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let ctx = self.tracer.start(
            "find_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", order_id.to_string()),
            ],
        );

        match self.load_owned(user_id, order_id).await {
            Ok(detail) => {
                self.tracer
                    .complete_success(&ctx, Method::Get, "Order retrieved")
                    .await;
                Ok(ApiResponse::success("Order retrieved successfully", detail))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&ctx, Method::Get, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }

    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponse<Vec<AdminOrderResponse>>, ServiceError> {
        let ctx = self.tracer.start(
            "find_all_orders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("filter.status", req.status.clone().unwrap_or_default()),
            ],
        );

        match self.load_all(req).await {
            Ok(orders) => {
                self.tracer
                    .complete_success(&ctx, Method::Get, "Orders retrieved")
                    .await;
                Ok(ApiResponse::success("Orders retrieved successfully", orders))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&ctx, Method::Get, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }
}
