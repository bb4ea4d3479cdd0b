use crate::domain::error::{ServiceError, StorageError};
use crate::domain::product::ValidationErrors;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

pub type ErrorResponse = (StatusCode, Json<ApiResponse>);

/// Zero-rows-affected means the caller named an id that does not exist.
pub fn storage_error_response(err: &StorageError) -> ErrorResponse {
    if err.is_no_rows_affected() {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::failure(format!("{}: {}", err, err.cause()))),
        );
    }
    error!("Database error occurred: {}: {}", err, err.cause());
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::failure(format!("Database error: {}", err))),
    )
}

pub fn validation_error_response(errors: &ValidationErrors) -> ErrorResponse {
    warn!("Validation errors: {}", errors);
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse {
            success: false,
            data: serde_json::to_value(errors).ok(),
            error: Some("Validation failed".to_string()),
        }),
    )
}

pub fn service_error_response(err: &ServiceError) -> ErrorResponse {
    match err {
        ServiceError::Validation(errors) => validation_error_response(errors),
        ServiceError::Storage(e) => storage_error_response(e),
    }
}

pub fn not_found(what: String) -> Response {
    (StatusCode::NOT_FOUND, Json(ApiResponse::failure(what))).into_response()
}
