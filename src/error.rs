use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::services::PeopleError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The text shown to API callers. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::GatewayTimeout(msg) => {
                msg.clone()
            }
            AppError::MethodNotAllowed => "Method Not Allowed".to_string(),
            AppError::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(detail) => tracing::error!(error = %detail, "Internal server error"),
            AppError::GatewayTimeout(detail) => tracing::warn!(error = %detail, "Gateway timeout"),
            _ => {}
        }

        let body = ErrorResponse {
            timestamp: Utc::now(),
            status: status.as_u16(),
            message: self.public_message(),
        };

        let mut response = (status, Json(body)).into_response();
        if matches!(self, AppError::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET"));
        }
        response
    }
}

impl From<PeopleError> for AppError {
    fn from(err: PeopleError) -> Self {
        match err {
            PeopleError::CityNotConfigured(_) => AppError::NotFound("City Not Found".to_string()),
            PeopleError::Cancelled => AppError::GatewayTimeout("Upstream request timed out".to_string()),
            err @ PeopleError::Upstream { .. } => AppError::Internal(err.to_string()),
        }
    }
}
