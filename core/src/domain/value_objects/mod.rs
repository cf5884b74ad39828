//! Value objects representing immutable domain concepts.

pub mod refund;

// Re-export commonly used types
pub use refund::RefundBreakdown;
