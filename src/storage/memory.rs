//! In-process product store with the same contract as the PostgreSQL one.
//!
//! Used by the test suites and for running the API without a database.

use crate::domain::error::{StorageCause, StorageError};
use crate::domain::product::Product;
use crate::domain::repository::ProductRepository;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    table: Mutex<Table>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, StorageError> {
        let table = self.table.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_page(&self, offset: i64, limit: i64) -> Result<Vec<Product>, StorageError> {
        let table = self.table.lock().await;
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(table.rows.values().skip(offset).take(limit).cloned().collect())
    }

    async fn count_all(&self) -> Result<i64, StorageError> {
        let table = self.table.lock().await;
        Ok(table.rows.len() as i64)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StorageError> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, mut product: Product) -> Result<Product, StorageError> {
        let mut table = self.table.lock().await;
        match product.id {
            None => {
                table.last_id += 1;
                let id = table.last_id;
                product.id = Some(id);
                table.rows.insert(id, product.clone());
                Ok(product)
            }
            Some(id) => match table.rows.get_mut(&id) {
                Some(row) => {
                    *row = product.clone();
                    Ok(product)
                }
                None => Err(StorageError::new(
                    "Failed to update a product",
                    StorageCause::NoRowsAffected,
                )),
            },
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError> {
        let mut table = self.table.lock().await;
        match table.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StorageError::new(
                "Failed to delete a product",
                StorageCause::NoRowsAffected,
            )),
        }
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> Product {
        Product::new("Phone", Some("Old"), 500.0, 5, "Smartphone")
    }

    #[tokio::test]
    async fn ids_are_issued_monotonically_and_never_reused() {
        let repo = InMemoryProductRepository::new();
        let a = repo.save(phone()).await.unwrap();
        let b = repo.save(phone()).await.unwrap();
        assert_eq!((a.id, b.id), (Some(1), Some(2)));

        repo.delete_by_id(2).await.unwrap();
        let c = repo.save(phone()).await.unwrap();
        assert_eq!(c.id, Some(3));
    }

    #[tokio::test]
    async fn update_of_unknown_id_does_not_insert() {
        let repo = InMemoryProductRepository::new();
        let err = repo.save(phone().with_id(42)).await.unwrap_err();
        assert!(err.is_no_rows_affected());
        assert_eq!(repo.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn pages_are_ordered_by_id() {
        let repo = InMemoryProductRepository::new();
        for _ in 0..5 {
            repo.save(phone()).await.unwrap();
        }
        let ids: Vec<_> = repo
            .find_by_page(3, 10)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![4, 5]);
        assert!(repo.find_by_page(10, 2).await.unwrap().is_empty());
    }
}
