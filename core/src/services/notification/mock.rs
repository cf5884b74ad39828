//! Mock implementation of NotificationDispatcher for testing

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::traits::NotificationDispatcher;
use super::types::Notification;

/// Mock implementation of NotificationDispatcher
///
/// Records every dispatched notification so tests can assert on recipients,
/// templates, and payloads. Can be configured to fail for testing the
/// best-effort dispatch paths.
pub struct MockNotificationDispatcher {
    sent: Arc<RwLock<Vec<Notification>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockNotificationDispatcher {
    /// Create a new mock dispatcher
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Configure the mock to fail on dispatch
    pub fn set_should_fail(&self, should_fail: bool) {
        if let Ok(mut flag) = self.should_fail.lock() {
            *flag = should_fail;
        }
    }

    /// All notifications dispatched so far, in order
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }

    /// Number of notifications dispatched so far
    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }

    fn check_failure(&self) -> bool {
        self.should_fail.lock().map(|flag| *flag).unwrap_or(false)
    }
}

impl Default for MockNotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationDispatcher for MockNotificationDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<String, String> {
        if self.check_failure() {
            return Err("notification channel unavailable".to_string());
        }

        let mut sent = self.sent.write().await;
        sent.push(notification.clone());
        Ok(format!("mock-message-{}", sent.len()))
    }
}
