use crate::domain::product::Product;
use serde::Serialize;
use utoipa::ToSchema;

/// One slice of a listing plus the numbers needed to walk the rest of it.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[aliases(ProductPage = PageResponse<Product>)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    /// Zero-based page index that was requested.
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub page_size: i64,
}

impl<T> PageResponse<T> {
    /// `page_size` must be positive; callers validate it before building a page.
    pub fn new(content: Vec<T>, current_page: i64, total_items: i64, page_size: i64) -> Self {
        Self {
            content,
            current_page,
            total_pages: total_pages(total_items, page_size),
            total_items,
            page_size,
        }
    }
}

/// `ceil(total_items / page_size)` in integer arithmetic. Zero for a non-positive page size.
pub fn total_pages(total_items: i64, page_size: i64) -> i64 {
    if page_size <= 0 || total_items <= 0 {
        return 0;
    }
    (total_items - 1) / page_size + 1
}
