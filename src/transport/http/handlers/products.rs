use crate::domain::page::ProductPage;
use crate::domain::product::Product;
use crate::transport::http::handlers::common::{
    not_found, service_error_response, storage_error_response,
};
use crate::transport::http::types::{json_422, ApiResponse, AppState, PageQuery};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

const PRODUCT_BODY: &str =
    r#"{"name": "...", "description": "...", "price": 1.0, "quantity": 0, "category": "..."}"#;

#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "products",
    responses(
        (status = 200, description = "Successfully retrieved the list of products", body = Vec<Product>),
        (status = 500, description = "Internal server error occurred while processing the request", body = ApiResponse)
    )
)]
pub async fn list_products_handler(State(state): State<AppState>) -> impl IntoResponse {
    info!("Served a request to get all products");
    match state.product_service.list().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => storage_error_response(&e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/products/page",
    tag = "products",
    params(PageQuery),
    responses(
        (status = 200, description = "Successfully retrieved the paginated list of products", body = ProductPage),
        (status = 400, description = "Invalid pagination parameters provided", body = ApiResponse),
        (status = 500, description = "Internal server error occurred while processing the request", body = ApiResponse)
    )
)]
pub async fn page_products_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    info!(page = query.page, size = query.size, "Served a request to get a products page");
    match state.product_service.page(query.page, query.size).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => service_error_response(&e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "products",
    params(
        ("id" = i64, Path, description = "Unique identifier of the product", example = 1)
    ),
    responses(
        (status = 200, description = "Product found and returned successfully", body = Product),
        (status = 404, description = "Product with the specified ID was not found", body = ApiResponse),
        (status = 500, description = "Internal server error occurred while processing the request", body = ApiResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!(id, "Served a request to get a product");
    match state.product_service.get(id).await {
        Ok(Some(product)) => (StatusCode::OK, Json(product)).into_response(),
        Ok(None) => not_found(format!("Product {} not found", id)),
        Err(e) => storage_error_response(&e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "products",
    request_body = Product,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, description = "Invalid product data provided", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error occurred while processing the request", body = ApiResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    request: Result<Json<Product>, JsonRejection>,
) -> impl IntoResponse {
    let Json(product) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, PRODUCT_BODY).into_response(),
    };
    info!(?product, "Served a request to create a product");

    match state.product_service.create(product).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => service_error_response(&e).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "products",
    params(
        ("id" = i64, Path, description = "Unique identifier of the product to be updated", example = 1)
    ),
    request_body = Product,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, description = "Invalid product data provided", body = ApiResponse),
        (status = 404, description = "Product with the specified ID was not found", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error occurred while processing the request", body = ApiResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request: Result<Json<Product>, JsonRejection>,
) -> impl IntoResponse {
    let Json(product) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, PRODUCT_BODY).into_response(),
    };
    info!(id, ?product, "Served a request to update a product");

    match state.product_service.update(id, product).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(e) => service_error_response(&e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "products",
    params(
        ("id" = i64, Path, description = "Unique identifier of the product to be deleted", example = 1)
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 404, description = "Product with the specified ID was not found", body = ApiResponse),
        (status = 500, description = "Internal server error occurred while processing the request", body = ApiResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!(id, "Served a request to delete a product");
    match state.product_service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => storage_error_response(&e).into_response(),
    }
}
