//! Trait for notification dispatch integration

use async_trait::async_trait;

use super::types::Notification;

/// Trait for the external notification channel (email, push, in-app)
///
/// Dispatch is fire-and-forget from the core's perspective: a failure is
/// reported to the caller as a provider-shaped error string, logged, and
/// never propagated into the booking transition itself.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Send a notification
    ///
    /// # Arguments
    /// * `notification` - Recipient, template, and structured details
    ///
    /// # Returns
    /// * `Ok(message_id)` from the provider on success
    /// * `Err(reason)` on dispatch failure
    async fn dispatch(&self, notification: &Notification) -> Result<String, String>;
}
