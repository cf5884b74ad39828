//! Shared utilities and common types for StayNest server
//!
//! This crate provides common functionality used across all server modules:
//! - Environment and logging configuration
//! - The operator-tunable refund policy source
//! - Error response structures shared with the presentation layer

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LoggingConfig, RefundPolicyConfig, TierThresholds,
};
pub use types::{error_codes, ErrorResponse, IntoErrorResponse};
