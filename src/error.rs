//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! the closed set of error conditions the services can produce, from authorization
//! denials to token failures and database issues.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly convert
//! application errors into appropriate HTTP responses with JSON bodies.
//! It also provides `From` trait implementations for common error types like `sqlx::Error`,
//! `validator::ValidationErrors` and `bcrypt::BcryptError`, allowing for easy conversion
//! using the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
///
/// The first group is the domain taxonomy returned by the auth and resource
/// services; the remainder covers infrastructure failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A requested resource was not found, or does not belong to the project
    /// referenced by the request (HTTP 404).
    NotFound(String),
    /// The operation conflicts with existing state, e.g. duplicate email,
    /// duplicate project membership, or an already-verified account (HTTP 409).
    Conflict(String),
    /// Authentication failed: bad credentials or a refresh token that is no
    /// longer owned by the user (HTTP 401).
    Unauthorized(String),
    /// The requester is authenticated but lacks the required project role (HTTP 403).
    Forbidden(String),
    /// A malformed identifier or otherwise invalid request value (HTTP 400).
    InvalidInput(String),
    /// An opaque token whose stored expiry has passed (HTTP 401).
    TokenExpired,
    /// A token that is malformed, carries a bad signature or wrong algorithm,
    /// or is unknown to the store (HTTP 401).
    TokenInvalid,
    /// Login attempted before the account's email was verified (HTTP 403).
    EmailNotVerified,
    /// Represents an error due to failed input validation (HTTP 422 Unprocessable Entity).
    /// Wraps errors from the `validator` crate.
    ValidationError(String),
    /// Represents an error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate.
    DatabaseError(String),
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            AppError::TokenExpired => write!(f, "Token expired"),
            AppError::TokenInvalid => write!(f, "Token invalid"),
            AppError::EmailNotVerified => write!(f, "Email not verified"),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON error responses.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "error": msg
            })),
            AppError::InvalidInput(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::TokenExpired => HttpResponse::Unauthorized().json(json!({
                "error": "token expired"
            })),
            AppError::TokenInvalid => HttpResponse::Unauthorized().json(json!({
                "error": "token invalid"
            })),
            AppError::EmailNotVerified => HttpResponse::Forbidden().json(json!({
                "error": "email not verified"
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
            // Database errors are presented as generic internal server errors to the client.
            AppError::DatabaseError(_) => HttpResponse::InternalServerError().json(json!({
                "error": "internal server error"
            })),
            AppError::InternalServerError(_) => HttpResponse::InternalServerError().json(json!({
                "error": "internal server error"
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` is mapped to `AppError::NotFound`,
/// while other database errors become `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
///
/// This handles errors during password hashing or verification.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::NotFound("Resource not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::Conflict("Email already registered".into());
        assert_eq!(error.error_response().status(), 409);

        let error = AppError::Unauthorized("Invalid credentials".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::Forbidden("Insufficient role".into());
        assert_eq!(error.error_response().status(), 403);

        let error = AppError::InvalidInput("Malformed id".into());
        assert_eq!(error.error_response().status(), 400);

        assert_eq!(AppError::TokenExpired.error_response().status(), 401);
        assert_eq!(AppError::TokenInvalid.error_response().status(), 401);
        assert_eq!(AppError::EmailNotVerified.error_response().status(), 403);

        let error = AppError::InternalServerError("Server error".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(error, AppError::NotFound("record not found".into()));
    }
}
