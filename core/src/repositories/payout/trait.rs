//! Payout repository trait defining the interface for payout persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::payout::{Payout, PayoutStatus};
use crate::errors::DomainError;

/// Repository trait for Payout entity persistence operations
///
/// Payouts are addressed by the booking they settle: one payout is created
/// per booking at reservation time, and the state machine updates it through
/// that key.
#[async_trait]
pub trait PayoutRepository: Send + Sync {
    /// Persist a new payout
    ///
    /// # Arguments
    /// * `payout` - The payout to persist
    ///
    /// # Returns
    /// * The persisted payout
    async fn create(&self, payout: Payout) -> Result<Payout, DomainError>;

    /// Find the payout for a booking
    ///
    /// # Arguments
    /// * `booking_id` - The booking whose payout to fetch
    ///
    /// # Returns
    /// * `Ok(Some(payout))` if found, `Ok(None)` otherwise
    async fn find_by_booking_id(&self, booking_id: Uuid) -> Result<Option<Payout>, DomainError>;

    /// Update the status of the payout for a booking
    ///
    /// # Arguments
    /// * `booking_id` - The booking whose payout to update
    /// * `status` - The new settlement status
    /// * `now` - Timestamp recorded on the payout
    ///
    /// # Returns
    /// * The updated payout, or `DomainError::NotFound` if the booking has
    ///   no payout
    async fn update_status(
        &self,
        booking_id: Uuid,
        status: PayoutStatus,
        now: DateTime<Utc>,
    ) -> Result<Payout, DomainError>;
}
