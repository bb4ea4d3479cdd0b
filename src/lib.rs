pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::ProductService;
pub use domain::{PageResponse, Product, ProductRepository, ServiceError, StorageError};
pub use storage::{InMemoryProductRepository, PgProductRepository};
