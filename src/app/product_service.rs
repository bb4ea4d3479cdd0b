//! The product service.
//!
//! Sits between the HTTP handlers and the storage accessor. It:
//! 1.  Validates payloads before they reach storage.
//! 2.  Turns a `(page, size)` request into a `PageResponse`.
//! 3.  Passes every other CRUD call straight through.
//!
//! A page is built from two independent storage calls (slice, then count). A write landing
//! between them can make `total_items` disagree with the slice for that one response; no
//! snapshot is taken across the two.

use crate::domain::error::{ServiceError, StorageError};
use crate::domain::page::PageResponse;
use crate::domain::product::{Product, ValidationErrors};
use crate::domain::repository::ProductRepository;
use std::sync::Arc;
use tracing::{debug, warn};

/// Largest page size accepted by `page`.
pub const MAX_PAGE_SIZE: i64 = 1000;

pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<dyn ProductRepository> {
        &self.repo
    }

    pub async fn list(&self) -> Result<Vec<Product>, StorageError> {
        debug!("Fetching all products");
        self.repo.find_all().await
    }

    pub async fn page(&self, page: i64, size: i64) -> Result<PageResponse<Product>, ServiceError> {
        debug!(page, size, "Fetching products page");
        let offset = page_offset(page, size).map_err(|errors| {
            warn!(page, size, "Rejected pagination request: {}", errors);
            errors
        })?;

        let content = self.repo.find_by_page(offset, size).await?;
        let total_items = self.repo.count_all().await?;

        Ok(PageResponse::new(content, page, total_items, size))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Product>, StorageError> {
        debug!(id, "Fetching product");
        self.repo.find_by_id(id).await
    }

    /// Rejects a payload that already carries an id; use `update` for existing rows.
    pub async fn create(&self, product: Product) -> Result<Product, ServiceError> {
        debug!(?product, "Creating new product");
        let mut errors = match product.validate() {
            Ok(()) => ValidationErrors::default(),
            Err(errors) => errors,
        };
        if product.id.is_some() {
            errors.add("id", "Id must not be set when creating a product");
        }
        errors.into_result()?;

        Ok(self.repo.save(product).await?)
    }

    /// The path id wins over whatever id the payload carries.
    pub async fn update(&self, id: i64, mut product: Product) -> Result<Product, ServiceError> {
        debug!(id, ?product, "Updating product");
        product.validate()?;
        product.id = Some(id);

        Ok(self.repo.save(product).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), StorageError> {
        debug!(id, "Deleting product");
        self.repo.delete_by_id(id).await
    }
}

/// `page * size`, once both are known to describe a real slice.
pub fn page_offset(page: i64, size: i64) -> Result<i64, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if page < 0 {
        errors.add("page", "Page index cannot be negative");
    }
    if size < 1 {
        errors.add("size", "Page size must be positive");
    } else if size > MAX_PAGE_SIZE {
        errors.add("size", format!("Page size must be at most {}", MAX_PAGE_SIZE));
    }
    errors.into_result()?;

    page.checked_mul(size)
        .ok_or_else(|| ValidationErrors::single("page", "Page index is too large"))
}
