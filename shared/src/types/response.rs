//! Error response structures shared across service boundaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (offending booking, status pair, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an error response with details
    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
    pub const MISSING_DATA: &str = "MISSING_DATA";
    pub const BOOKING_NOT_FOUND: &str = "BOOKING_NOT_FOUND";
    pub const PAYOUT_ERROR: &str = "PAYOUT_ERROR";
    pub const WALLET_ERROR: &str = "WALLET_ERROR";
    pub const NOTIFICATION_ERROR: &str = "NOTIFICATION_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}

/// Result type with ErrorResponse as error
pub type ApiResult<T> = Result<T, ErrorResponse>;
