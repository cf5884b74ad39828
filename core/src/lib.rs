//! # StayNest Core
//!
//! Core business logic and domain layer for the StayNest backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the booking lifecycle: the
//! booking state machine, the auto-confirmation policy, and the refund
//! calculator.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
