//! Auto-confirm policy module
//!
//! This module decides when pending bookings confirm themselves:
//! - The pure eligibility check over a booking and the current time
//!   (`policy.rs`)
//! - The periodic sweep driving eligible bookings through the state
//!   machine (`sweep.rs`)

mod config;
mod policy;
mod sweep;

#[cfg(test)]
mod tests;

pub use config::AutoConfirmConfig;
pub use policy::{check_eligibility, AutoConfirmEligibility, IneligibilityReason};
pub use sweep::{AutoConfirmSweep, SweepResult};
