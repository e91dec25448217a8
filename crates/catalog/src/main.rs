use anyhow::{Context, Result};
use catalog::{
    config::myconfig::Config, di::DependenciesInjectDeps, handler::AppRouter, state::AppState,
};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::init("catalog-service", &config.otel_endpoint)
        .context("Failed to initialize telemetry")?;

    init_logger(
        telemetry.logger_provider(),
        "catalog-service",
        config.is_dev,
        config.enable_file_log,
    );

    info!("🚀 Starting Catalog Service initialization...");

    let result = run(&config).await;

    if let Err(e) = &result {
        error!("💀 Catalog Service failed: {e:?}");
    }

    if let Err(e) = telemetry.shutdown() {
        error!("Failed to shutdown telemetry: {e}");
    }

    info!("✅ Catalog Service shutdown complete.");
    result
}

async fn run(config: &Config) -> Result<()> {
    let db_pool =
        ConnectionManager::new_pool(&config.database_url, config.db_min_conn, config.db_max_conn)
            .await
            .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        info!("✅ Database migrations applied");
    }

    let state = AppState::new(DependenciesInjectDeps::postgres(
        db_pool,
        config.service.clone(),
    ))
    .await;
    state.spawn_metrics_collector();

    info!(
        verify_warehouse = config.service.verify_warehouse,
        sales_window_days = config.service.sales_window_days,
        "✅ Application setup completed successfully."
    );

    AppRouter::serve(config.port, state).await
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
