use crate::domain::error::StorageError;
use crate::domain::product::Product;
use async_trait::async_trait;

/// Contract for durable product storage.
///
/// Implementations hold their own shared connection handle; each call is independent
/// and no state is carried between calls.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, in no particular order. Empty when the table is empty.
    async fn find_all(&self) -> Result<Vec<Product>, StorageError>;

    /// Up to `limit` products ordered by id ascending, skipping the first `offset`.
    async fn find_by_page(&self, offset: i64, limit: i64) -> Result<Vec<Product>, StorageError>;

    async fn count_all(&self) -> Result<i64, StorageError>;

    /// `Ok(None)` when no row has this id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StorageError>;

    /// Inserts when `product.id` is `None` and returns it with the generated id.
    /// Otherwise updates the matching row; an unknown id is an error, never an insert.
    async fn save(&self, product: Product) -> Result<Product, StorageError>;

    /// Fails when no row has this id.
    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError>;

    /// Round-trips the backing store.
    async fn ping(&self) -> Result<(), StorageError>;
}
