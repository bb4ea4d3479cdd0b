pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductRepository;
pub use postgres::{product_from_row, PgProductRepository};
