//! Refund calculation
//!
//! Pure tier-based refund math. The booking state machine consumes the
//! calculator when planning cancellations; nothing here performs I/O.

mod calculator;

pub use calculator::calculate_refund;
