//! Domain types: the product record, page descriptor, errors and the storage contract.

pub mod error;
pub mod page;
pub mod product;
pub mod repository;

pub use error::{ServiceError, StorageCause, StorageError};
pub use page::{PageResponse, ProductPage};
pub use product::{Product, ValidationErrors};
pub use repository::ProductRepository;
