//! Error types for the Namgail Tours server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid payment signature")]
    SignatureMismatch,

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Failure response body.
///
/// The public API contract (kept from the original service) reports
/// business-logic failures as HTTP 200 with `success: false`; only the
/// authentication layer uses 401/403.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            // A failed login is a business failure, not a rejected credential
            // on a protected route.
            AppError::InvalidCredentials(msg) => (StatusCode::OK, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::OK, msg.clone()),
            AppError::Validation(msg) => (StatusCode::OK, msg.clone()),
            AppError::SignatureMismatch => {
                (StatusCode::OK, "Invalid payment signature".to_string())
            }
            AppError::Gateway(msg) => (StatusCode::OK, msg.clone()),
            AppError::Configuration(msg) => (StatusCode::OK, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::OK, "Database error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::OK, "Internal server error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
