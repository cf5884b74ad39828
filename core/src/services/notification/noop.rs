//! No-op implementation of NotificationDispatcher for when no channel is wired

use async_trait::async_trait;

use super::traits::NotificationDispatcher;
use super::types::Notification;

/// No-op implementation of NotificationDispatcher
///
/// This implementation silently accepts every message and is used in tools
/// and tests that exercise the lifecycle without a notification channel.
pub struct NoOpNotificationDispatcher;

impl NoOpNotificationDispatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpNotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationDispatcher for NoOpNotificationDispatcher {
    async fn dispatch(&self, _notification: &Notification) -> Result<String, String> {
        // No-op implementation - just return success
        Ok("noop".to_string())
    }
}
