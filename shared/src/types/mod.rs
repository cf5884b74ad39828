//! Type definitions module with domain-specific sub-modules
//!
//! This module organizes types into logical categories:
//! - `response` - Error response envelope shared with the presentation layer

pub mod response;

// Re-export commonly used types at module level
pub use response::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
