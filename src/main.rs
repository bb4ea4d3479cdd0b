// src/main.rs

use product_catalog::infra::{config::Config, database, logging};
use product_catalog::transport;
use product_catalog::{PgProductRepository, ProductService};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            return Err(e);
        }
    };

    // --- Database Initialization ---
    info!(max_connections = config.max_connections, "Connecting to PostgreSQL...");
    let pool = database::connect(&config.database_url, config.max_connections).await?;
    database::ensure_schema(&pool).await?;
    match database::probe(&pool).await {
        Ok(conn) => info!(
            server_version = %conn.server_version,
            user = %conn.user,
            database = %conn.database,
            "Database ready"
        ),
        Err(e) => error!("Failed to probe PostgreSQL connection: {:#}", e),
    }

    // --- Service Initialization ---
    let repo = PgProductRepository::new(pool.clone());
    let app_state = transport::http::AppState::new(ProductService::new(Arc::new(repo)));

    // --- API Server Initialization ---
    let app = transport::http::create_app(app_state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("API server listening on http://{}", config.bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui", config.bind_addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received (Ctrl+C)...");
        }
    }

    pool.close().await;
    info!("Graceful shutdown complete.");
    Ok(())
}
