//! Product store implementation using PostgreSQL.

use crate::domain::error::{StorageCause, StorageError};
use crate::domain::product::Product;
use crate::domain::repository::ProductRepository;
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row};
use tracing::error;

const SELECT_COLUMNS: &str = "SELECT id, name, description, price, quantity, category FROM products";

/// A product store that checks out one pooled connection per call.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The returned guard gives the connection back to the pool when dropped.
    async fn acquire(&self, message: &str) -> Result<PoolConnection<Postgres>, StorageError> {
        self.pool.acquire().await.map_err(|e| fail(message, e))
    }

    async fn insert(&self, mut product: Product) -> Result<Product, StorageError> {
        let message = "Failed to insert a product";
        let mut conn = self.acquire(message).await?;

        let row = sqlx::query(
            "INSERT INTO products (name, description, price, quantity, category)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.category)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| fail(message, e))?;

        let Some(row) = row else {
            return Err(fail(message, StorageCause::NoGeneratedKey));
        };
        let id: i64 = row.try_get("id").map_err(|e| fail(message, e))?;
        product.id = Some(id);
        Ok(product)
    }

    async fn update(&self, id: i64, product: Product) -> Result<Product, StorageError> {
        let message = "Failed to update a product";
        let mut conn = self.acquire(message).await?;

        let result = sqlx::query(
            "UPDATE products
             SET name = $1, description = $2, price = $3, quantity = $4, category = $5
             WHERE id = $6",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.category)
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| fail(message, e))?;

        if result.rows_affected() == 0 {
            error!(id, "{}: {}", message, StorageCause::NoRowsAffected);
            return Err(StorageError::new(message, StorageCause::NoRowsAffected));
        }
        Ok(product)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, StorageError> {
        let message = "Failed to fetch all products";
        let mut conn = self.acquire(message).await?;

        let rows = sqlx::query(SELECT_COLUMNS)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| fail(message, e))?;
        map_rows(rows).map_err(|e| fail(message, e))
    }

    async fn find_by_page(&self, offset: i64, limit: i64) -> Result<Vec<Product>, StorageError> {
        let message = "Failed to fetch products by page";
        let mut conn = self.acquire(message).await?;

        let sql = format!("{} ORDER BY id LIMIT $1 OFFSET $2", SELECT_COLUMNS);
        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| fail(message, e))?;
        map_rows(rows).map_err(|e| fail(message, e))
    }

    async fn count_all(&self) -> Result<i64, StorageError> {
        let message = "Failed to count products";
        let mut conn = self.acquire(message).await?;

        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| fail(message, e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StorageError> {
        let message = "Failed to fetch a product";
        let mut conn = self.acquire(message).await?;

        let sql = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| fail(message, e))?;
        row.as_ref()
            .map(product_from_row)
            .transpose()
            .map_err(|e| fail(message, e))
    }

    async fn save(&self, product: Product) -> Result<Product, StorageError> {
        match product.id {
            None => self.insert(product).await,
            Some(id) => self.update(id, product).await,
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError> {
        let message = "Failed to delete a product";
        let mut conn = self.acquire(message).await?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| fail(message, e))?;

        if result.rows_affected() == 0 {
            error!(id, "{}: {}", message, StorageCause::NoRowsAffected);
            return Err(StorageError::new(message, StorageCause::NoRowsAffected));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let message = "Failed to reach the database";
        let mut conn = self.acquire(message).await?;

        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(|e| fail(message, e))?;
        Ok(())
    }
}

/// Column order lives here and in `SELECT_COLUMNS` only.
pub fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: Some(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
        category: row.try_get("category")?,
    })
}

fn map_rows(rows: Vec<PgRow>) -> Result<Vec<Product>, sqlx::Error> {
    rows.iter().map(product_from_row).collect()
}

fn fail(message: &str, cause: impl Into<StorageCause>) -> StorageError {
    let err = StorageError::new(message, cause);
    error!("{}: {}", message, err.cause());
    err
}
