//! Connection pool setup and schema bootstrap.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

pub const CREATE_PRODUCTS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS products (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    price DOUBLE PRECISION NOT NULL,
    quantity INTEGER NOT NULL,
    category TEXT NOT NULL
)";

/// Builds the shared pool handed to the storage accessor.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Creates the `products` table if it is missing.
pub async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(CREATE_PRODUCTS_TABLE_SQL).execute(pool).await?;
    Ok(())
}

/// What the connected server reports about itself.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub server_version: String,
    pub user: String,
    pub database: String,
}

/// Checks out a connection and asks the server who we are.
pub async fn probe(pool: &PgPool) -> anyhow::Result<ConnectionInfo> {
    let mut conn = pool.acquire().await?;
    let (server_version, user, database): (String, String, String) =
        sqlx::query_as("SELECT version(), current_user::text, current_database()::text")
            .fetch_one(&mut *conn)
            .await?;
    info!(%user, %database, "Connection to PostgreSQL established");
    Ok(ConnectionInfo {
        server_version,
        user,
        database,
    })
}

/// True when `products` is visible on the connection's search path.
pub async fn products_table_exists(pool: &PgPool) -> anyhow::Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT to_regclass('products') IS NOT NULL")
        .fetch_one(pool)
        .await?;
    Ok(exists)
}
