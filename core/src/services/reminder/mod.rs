//! Reminder sweep module
//!
//! This module sends the at-most-once lifecycle reminders:
//! - Check-in reminders for confirmed bookings (one day before arrival
//!   and on the arrival day)
//! - The post-stay review prompt for completed bookings

mod service;

#[cfg(test)]
mod tests;

pub use service::{ReminderConfig, ReminderService, ReminderSweepResult};
