//! Mock implementation of BookingRepository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus, ReminderKind};
use crate::errors::{BookingError, DomainError};

use super::BookingRepository;

/// Mock booking repository backed by an in-memory map
pub struct MockBookingRepository {
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockBookingRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            bookings: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether write operations should fail
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

    /// Insert a booking directly, bypassing the compare-and-set
    pub async fn insert(&self, booking: Booking) {
        self.bookings.write().await.insert(booking.id, booking);
    }
}

impl Default for MockBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        self.check_failure()?;
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        self.check_failure()?;
        let mut bookings = self.bookings.write().await;

        if bookings.contains_key(&booking.id) {
            return Err(DomainError::Validation {
                message: "Booking already exists".to_string(),
            });
        }

        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update_if_status(
        &self,
        booking: Booking,
        expected_status: BookingStatus,
    ) -> Result<Booking, DomainError> {
        self.check_failure()?;
        let mut bookings = self.bookings.write().await;

        let stored = bookings.get(&booking.id).ok_or(DomainError::NotFound {
            resource: "Booking".to_string(),
        })?;

        if stored.status != expected_status {
            return Err(BookingError::InvalidTransition {
                booking_id: booking.id,
                from: stored.status.as_str().to_string(),
                to: booking.status.as_str().to_string(),
            }
            .into());
        }

        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_status(&self, status: BookingStatus) -> Result<Vec<Booking>, DomainError> {
        self.check_failure()?;
        let bookings = self.bookings.read().await;
        let mut result: Vec<Booking> = bookings
            .values()
            .filter(|b| b.status == status)
            .cloned()
            .collect();

        result.sort_by_key(|b| b.created_at);
        Ok(result)
    }

    async fn mark_reminder_sent(
        &self,
        booking_id: Uuid,
        kind: ReminderKind,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut bookings = self.bookings.write().await;

        let booking = bookings.get_mut(&booking_id).ok_or(DomainError::NotFound {
            resource: "Booking".to_string(),
        })?;

        if booking.reminder_sent(kind) {
            return Ok(false);
        }

        booking.mark_reminder_sent(kind, now);
        Ok(true)
    }
}
