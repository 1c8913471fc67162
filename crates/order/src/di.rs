use crate::{
    abstract_trait::{
        DynCartRepository, DynCartService, DynOrderCommandRepository, DynOrderCommandService,
        DynOrderQueryRepository, DynOrderQueryService, DynPaymentGateway, DynPaymentService,
        DynUserQueryRepository,
    },
    repository::{CartRepository, OrderCommandRepository, OrderQueryRepository, UserQueryRepository},
    service::{
        CartService, CartServiceDeps, OrderCommandService, OrderCommandServiceDeps,
        OrderQueryService, OrderQueryServiceDeps, PaymentService, PaymentServiceDeps,
    },
};
use prometheus_client::registry::Registry;
use shared::{config::ConnectionPool, utils::Metrics};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub cart: DynCartService,
    pub order_command: DynOrderCommandService,
    pub order_query: DynOrderQueryService,
    pub payment: DynPaymentService,
    pub user_query: DynUserQueryRepository,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("cart", &"CartService")
            .field("order_command", &"OrderCommandService")
            .field("order_query", &"OrderQueryService")
            .field("payment", &"PaymentService")
            .field("user_query", &"UserQueryRepository")
            .finish()
    }
}

/// Storage and gateway seams the services are built on.
#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub cart: DynCartRepository,
    pub order_command: DynOrderCommandRepository,
    pub order_query: DynOrderQueryRepository,
    pub user_query: DynUserQueryRepository,
    pub gateway: DynPaymentGateway,
}

impl DependenciesInjectDeps {
    pub fn from_pool(pool: ConnectionPool, gateway: DynPaymentGateway) -> Self {
        Self {
            cart: Arc::new(CartRepository::new(pool.clone())),
            order_command: Arc::new(OrderCommandRepository::new(pool.clone())),
            order_query: Arc::new(OrderQueryRepository::new(pool.clone())),
            user_query: Arc::new(UserQueryRepository::new(pool)),
            gateway,
        }
    }
}

fn service_metrics() -> Arc<Mutex<Metrics>> {
    Arc::new(Mutex::new(Metrics::new()))
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps, registry: Arc<Mutex<Registry>>) -> Self {
        let DependenciesInjectDeps {
            cart,
            order_command,
            order_query,
            user_query,
            gateway,
        } = deps;

        let cart_service: DynCartService = Arc::new(
            CartService::new(CartServiceDeps {
                cart: cart.clone(),
                metrics: service_metrics(),
                registry: registry.clone(),
            })
            .await,
        );

        let order_command_service: DynOrderCommandService = Arc::new(
            OrderCommandService::new(OrderCommandServiceDeps {
                cart,
                command: order_command.clone(),
                query: order_query.clone(),
                gateway: gateway.clone(),
                metrics: service_metrics(),
                registry: registry.clone(),
            })
            .await,
        );

        let order_query_service: DynOrderQueryService = Arc::new(
            OrderQueryService::new(OrderQueryServiceDeps {
                query: order_query.clone(),
                metrics: service_metrics(),
                registry: registry.clone(),
            })
            .await,
        );

        let payment_service: DynPaymentService = Arc::new(
            PaymentService::new(PaymentServiceDeps {
                command: order_command,
                query: order_query,
                gateway,
                metrics: service_metrics(),
                registry,
            })
            .await,
        );

        Self {
            cart: cart_service,
            order_command: order_command_service,
            order_query: order_query_service,
            payment: payment_service,
            user_query,
        }
    }
}
