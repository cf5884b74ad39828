//! Domain-specific error types and error handling.

mod types;

// Re-export all error types and utilities
pub use types::{BookingError, SideEffectError};

use sn_shared::types::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Booking(#[from] BookingError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
            }
            DomainError::NotFound { resource } => ErrorResponse::new(
                error_codes::NOT_FOUND,
                format!("Resource not found: {resource}"),
            ),
            DomainError::Internal { .. } => ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ),
            DomainError::Booking(err) => err.to_error_response(),
        }
    }
}
