use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use carrito::app;
use carrito::cart::{CartService, MySqlCartStore, MySqlProductCatalog};
use carrito::config::{Config, DatabaseConfig};
use carrito::middleware::RequestId;
use carrito::telemetry;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    telemetry::init(&config.app.log_level, config.app.log_format);

    tracing::info!("Starting carrito cart service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());
    tracing::info!("Cart upsert strategy: {}", config.app.upsert_strategy);

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({}..{} connections)",
        config.database.pool_size,
        config.database.max_connections
    );

    if config.database.run_migrations {
        DatabaseConfig::migrate(&db_pool)
            .await
            .context("Failed to apply database migrations")?;
        tracing::info!("Database migrations applied");
    }

    let cart_service = Arc::new(CartService::with_strategy(
        Arc::new(MySqlProductCatalog::new(db_pool.clone())),
        Arc::new(MySqlCartStore::new(db_pool.clone())),
        config.app.upsert_strategy,
    ));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let cors_config = config.cors.clone();
    let server_pool = db_pool.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(app::cors(&cors_config))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(server_pool.clone()))
            .app_data(web::Data::new(cart_service.clone()))
            .configure(app::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;

    db_pool.close().await;
    tracing::info!("Database pool closed");

    Ok(())
}
