//! Notification dispatch module
//!
//! This module defines the boundary to the external notification channel:
//! - The `NotificationDispatcher` trait the platform implements
//! - The `Notification` payload (recipient, template, structured details)
//! - No-op and recording mock dispatchers for tools and tests

mod mock;
mod noop;
mod traits;
mod types;

pub use mock::MockNotificationDispatcher;
pub use noop::NoOpNotificationDispatcher;
pub use traits::NotificationDispatcher;
pub use types::{Notification, NotificationTemplate};
