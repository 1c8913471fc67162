use anyhow::{Context, Result};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use storefront_order::{config::Config, handler::AppRouter, state::AppState};
use tracing::{error, info};

const SERVICE_NAME: &str = "storefront-order";

#[tokio::main]
async fn main() -> Result<()> {
    let (config, state, telemetry) = setup().await.context("Failed to setup application")?;

    let result = AppRouter::serve(config.port, state).await;

    if let Err(e) = &result {
        error!("❌ Server stopped with error: {e:?}");
    }

    info!("🛑 Shutting down {SERVICE_NAME}...");

    if let Err(e) = telemetry.shutdown() {
        eprintln!("Failed to shutdown telemetry: {e}");
    }

    result
}

async fn setup() -> Result<(Config, AppState, Telemetry)> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::init(SERVICE_NAME, &config.otel_endpoint)
        .context("Failed to initialize telemetry")?;

    init_logger(
        telemetry.logger_provider(),
        SERVICE_NAME,
        config.dev_mode,
        config.enable_file_log,
    );

    let db_pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to migrate database")?;
    } else {
        info!("⏭️ Skipping migrations (RUN_MIGRATIONS=false)");
    }

    let state = AppState::new(db_pool, &config)
        .await
        .context("Failed to create AppState")?;

    info!("✅ Application setup completed successfully.");
    Ok((config, state, telemetry))
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    info!("📦 Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
