use crate::{
    abstract_trait::DynPaymentGateway,
    config::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
    gateway::RazorpayGateway,
    middleware::SessionTtl,
};
use anyhow::{Context, Result};
use chrono::Duration;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynJwtService, DynSessionStore},
    cache::SessionStore,
    config::{ConnectionPool, JwtConfig, RedisClient},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub session: DynSessionStore,
    pub session_ttl: SessionTtl,
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

pub struct AppStateParts {
    pub jwt_config: DynJwtService,
    pub session: DynSessionStore,
    pub session_ttl: SessionTtl,
    pub deps: DependenciesInjectDeps,
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        info!("Initializing Redis connection for sessions");
        let redis = RedisClient::new(&config.redis).context("Failed to connect to Redis")?;
        redis
            .ping()
            .await
            .context("Failed to ping Redis server")?;

        let gateway = Arc::new(
            RazorpayGateway::new(config.razorpay.clone())
                .context("Failed to initialize payment gateway")?,
        ) as DynPaymentGateway;

        let state = Self::from_parts(AppStateParts {
            jwt_config: Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService,
            session: Arc::new(SessionStore::new(redis.pool.clone())) as DynSessionStore,
            session_ttl: SessionTtl(Duration::minutes(config.session_ttl_minutes)),
            deps: DependenciesInjectDeps::from_pool(pool, gateway),
        })
        .await;

        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

        Ok(state)
    }

    /// Wires services around already-built storage, gateway and session seams.
    pub async fn from_parts(parts: AppStateParts) -> Self {
        let AppStateParts {
            jwt_config,
            session,
            session_ttl,
            deps,
        } = parts;

        let registry = Arc::new(Mutex::new(Registry::default()));
        let system_metrics = Arc::new(SystemMetrics::new());

        let di_container = DependenciesInject::new(deps, registry.clone()).await;

        system_metrics.register(&mut *registry.lock().await);

        Self {
            jwt_config,
            session,
            session_ttl,
            di_container,
            registry,
            system_metrics,
        }
    }
}
