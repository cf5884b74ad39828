//! Booking state machine module
//!
//! This module owns the reservation lifecycle:
//! - Pure transition planning against the status table (`transition.rs`)
//! - The orchestrating `BookingService` that persists transitions via
//!   compare-and-set and executes the planned side effects (`service.rs`)
//! - The completion sweep that closes out stays whose departure date has
//!   passed (`completion.rs`)

mod completion;
mod config;
mod service;
mod transition;
mod types;

#[cfg(test)]
mod tests;

pub use completion::CompletionSweepService;
pub use config::CompletionSweepConfig;
pub use service::BookingService;
pub use transition::plan_transition;
pub use types::{
    BookingTransition, CompletionSweepResult, NewBookingRequest, SideEffect, TransitionOutcome,
    TransitionPlan,
};
