pub mod product_service;

pub use product_service::{ProductService, MAX_PAGE_SIZE};
