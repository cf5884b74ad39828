//! Mock implementation of PayoutRepository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::payout::{Payout, PayoutStatus};
use crate::errors::DomainError;

use super::PayoutRepository;

/// Mock payout repository backed by an in-memory map keyed by booking ID
pub struct MockPayoutRepository {
    payouts: Arc<RwLock<HashMap<Uuid, Payout>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockPayoutRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            payouts: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::Internal {
                message: "Mock repository error".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockPayoutRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PayoutRepository for MockPayoutRepository {
    async fn create(&self, payout: Payout) -> Result<Payout, DomainError> {
        self.check_failure()?;
        let mut payouts = self.payouts.write().await;

        if payouts.contains_key(&payout.booking_id) {
            return Err(DomainError::Validation {
                message: "Payout already exists for booking".to_string(),
            });
        }

        payouts.insert(payout.booking_id, payout.clone());
        Ok(payout)
    }

    async fn find_by_booking_id(&self, booking_id: Uuid) -> Result<Option<Payout>, DomainError> {
        self.check_failure()?;
        let payouts = self.payouts.read().await;
        Ok(payouts.get(&booking_id).cloned())
    }

    async fn update_status(
        &self,
        booking_id: Uuid,
        status: PayoutStatus,
        now: DateTime<Utc>,
    ) -> Result<Payout, DomainError> {
        self.check_failure()?;
        let mut payouts = self.payouts.write().await;

        let payout = payouts.get_mut(&booking_id).ok_or(DomainError::NotFound {
            resource: "Payout".to_string(),
        })?;

        payout.status = status;
        payout.updated_at = now;
        Ok(payout.clone())
    }
}
