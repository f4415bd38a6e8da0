/// Error types for blog-service
///
/// Errors are converted to the HTTP responses the route contracts
/// expect: 404 for missing entities, a login redirect for missing
/// authentication, field errors for rejected form input.
use actix_web::{error::ResponseError, http::header, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for blog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Cache operation failed
    #[error("Cache error: {0}")]
    Cache(String),

    /// Form input rejected; field name plus message
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// No authenticated session on a route that requires one.
    /// Rendered as a redirect to the login flow with a return path,
    /// matching the soft authorization contract.
    #[error("Authentication required for {next}")]
    Unauthenticated { next: String },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: &str, message: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn login_redirect_target(next: &str) -> String {
        format!("/auth/login?next={}", urlencoding::encode(next))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Cache(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            // Rejected forms re-render with field errors rather than failing.
            AppError::Validation { .. } => StatusCode::OK,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthenticated { .. } => StatusCode::FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated { next } => HttpResponse::Found()
                .insert_header((header::LOCATION, Self::login_redirect_target(next)))
                .finish(),
            AppError::Validation { field, message } => {
                let mut errors = serde_json::Map::new();
                errors.insert(field.clone(), serde_json::json!([message]));
                HttpResponse::Ok().json(serde_json::json!({ "form_errors": errors }))
            }
            _ => {
                let status = self.status_code();
                HttpResponse::build(status).json(serde_json::json!({
                    "error": self.to_string(),
                    "status": status.as_u16(),
                }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Cache(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
