use axum::http::{StatusCode, Uri};

use crate::error::AppError;

/// Liveness check
pub async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn not_found(uri: Uri) -> AppError {
    tracing::info!(path = %uri.path(), "Route not found");
    AppError::NotFound("Route Not Found".to_string())
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
