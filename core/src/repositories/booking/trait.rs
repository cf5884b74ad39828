//! Booking repository trait defining the interface for booking persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus, ReminderKind};
use crate::errors::DomainError;

/// Repository trait for Booking entity persistence operations
///
/// This trait defines the contract for booking data access. Status writes go
/// through a compare-and-set so two callers racing on the same booking cannot
/// both apply a transition.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find a booking by its ID
    ///
    /// # Arguments
    /// * `id` - The booking ID to search for
    ///
    /// # Returns
    /// * `Ok(Some(booking))` if found, `Ok(None)` otherwise
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError>;

    /// Persist a new booking
    ///
    /// # Arguments
    /// * `booking` - The booking to persist
    ///
    /// # Returns
    /// * The persisted booking
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError>;

    /// Persist a transitioned booking only if its stored status is unchanged
    ///
    /// The precondition check and the write are a single logical operation.
    /// When the stored status no longer equals `expected_status`, the write
    /// is rejected with `BookingError::InvalidTransition` carrying the
    /// actual stored status as `from` and the attempted target as `to`.
    ///
    /// # Arguments
    /// * `booking` - The mutated booking to persist
    /// * `expected_status` - Status the stored document must still have
    ///
    /// # Returns
    /// * The persisted booking on success
    async fn update_if_status(
        &self,
        booking: Booking,
        expected_status: BookingStatus,
    ) -> Result<Booking, DomainError>;

    /// Query all bookings with the given status
    ///
    /// Used by the auto-confirm, completion, and reminder sweeps.
    ///
    /// # Arguments
    /// * `status` - The status to filter by
    ///
    /// # Returns
    /// * All bookings currently in that status
    async fn find_by_status(&self, status: BookingStatus) -> Result<Vec<Booking>, DomainError>;

    /// Set a reminder flag on a booking
    ///
    /// Flags are set-once: the write happens only when the flag is still
    /// unset, so a repeated sweep observing `false` knows another run
    /// already claimed the reminder.
    ///
    /// # Arguments
    /// * `booking_id` - The booking to flag
    /// * `kind` - Which reminder was sent
    /// * `now` - Timestamp recorded on the booking
    ///
    /// # Returns
    /// * `Ok(true)` if this call set the flag, `Ok(false)` if it was
    ///   already set
    async fn mark_reminder_sent(
        &self,
        booking_id: Uuid,
        kind: ReminderKind,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}
