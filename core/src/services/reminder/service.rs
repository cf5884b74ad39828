//! Reminder sweep for upcoming check-ins and post-stay reviews
//!
//! Confirmed bookings get a check-in reminder the day before arrival and
//! another on the day itself; completed bookings get a single review
//! prompt. Each reminder is sent at most once: the flag on the booking is
//! claimed via a set-once write before dispatch, so overlapping or
//! repeated sweeps cannot double-send.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::domain::entities::booking::{Booking, BookingStatus, ReminderKind};
use crate::errors::DomainError;
use crate::repositories::BookingRepository;
use crate::services::notification::{Notification, NotificationDispatcher, NotificationTemplate};

/// Configuration for the reminder sweep
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether the background sweep is enabled
    pub enabled: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service sending check-in and review reminders
pub struct ReminderService<B, N>
where
    B: BookingRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    booking_repository: Arc<B>,
    notification_dispatcher: Arc<N>,
    config: ReminderConfig,
}

impl<B, N> ReminderService<B, N>
where
    B: BookingRepository,
    N: NotificationDispatcher,
{
    /// Create a new reminder service
    pub fn new(
        booking_repository: Arc<B>,
        notification_dispatcher: Arc<N>,
        config: ReminderConfig,
    ) -> Self {
        Self {
            booking_repository,
            notification_dispatcher,
            config,
        }
    }

    /// Run a single reminder sweep cycle
    ///
    /// Examines confirmed bookings for due check-in reminders and
    /// completed bookings for the review prompt. The one-day reminder is
    /// due when check-in falls on tomorrow's calendar date, the day-of
    /// reminder when it falls on today's; the two never fire together in
    /// one cycle. A failure on one booking is recorded and does not abort
    /// the rest of the sweep.
    ///
    /// # Arguments
    ///
    /// * `now` - Instant the sweep runs at
    ///
    /// # Returns
    /// * `Ok(ReminderSweepResult)` - Counts per reminder kind and errors
    /// * `Err(DomainError)` - If a booking set cannot be loaded
    pub async fn run_reminder_sweep(
        &self,
        now: DateTime<Utc>,
    ) -> Result<ReminderSweepResult, DomainError> {
        if !self.config.enabled {
            return Ok(ReminderSweepResult::default());
        }

        let mut result = ReminderSweepResult::default();

        let confirmed = self
            .booking_repository
            .find_by_status(BookingStatus::Confirmed)
            .await?;
        result.checked += confirmed.len();

        for booking in &confirmed {
            if let Some(kind) = due_check_in_reminder(booking, now) {
                match self.send_reminder(booking, kind, now).await {
                    Ok(true) => match kind {
                        ReminderKind::OneDayBefore => result.one_day_sent += 1,
                        ReminderKind::DayOf => result.day_of_sent += 1,
                        ReminderKind::Review => {}
                    },
                    Ok(false) => {}
                    Err(message) => result.errors.push(message),
                }
            }
        }

        let completed = self
            .booking_repository
            .find_by_status(BookingStatus::Completed)
            .await?;
        result.checked += completed.len();

        for booking in &completed {
            if booking.reminder_sent(ReminderKind::Review) {
                continue;
            }
            match self.send_reminder(booking, ReminderKind::Review, now).await {
                Ok(true) => result.review_sent += 1,
                Ok(false) => {}
                Err(message) => result.errors.push(message),
            }
        }

        info!(
            checked = result.checked,
            one_day = result.one_day_sent,
            day_of = result.day_of_sent,
            review = result.review_sent,
            errors = result.errors.len(),
            "Reminder sweep finished"
        );

        Ok(result)
    }

    /// Claim the reminder flag and dispatch the message
    ///
    /// Returns `Ok(true)` when this call sent the reminder, `Ok(false)`
    /// when another run already claimed it. A dispatch failure after the
    /// flag was claimed is reported as an error; the flag stays set, so
    /// the reminder is dropped rather than retried.
    async fn send_reminder(
        &self,
        booking: &Booking,
        kind: ReminderKind,
        now: DateTime<Utc>,
    ) -> Result<bool, String> {
        let claimed = self
            .booking_repository
            .mark_reminder_sent(booking.id, kind, now)
            .await
            .map_err(|e| format!("Booking {}: {}", booking.id, e))?;
        if !claimed {
            return Ok(false);
        }

        let template = match kind {
            ReminderKind::OneDayBefore => NotificationTemplate::CheckInReminderOneDay,
            ReminderKind::DayOf => NotificationTemplate::CheckInReminderDayOf,
            ReminderKind::Review => NotificationTemplate::ReviewReminder,
        };
        let notification = Notification::new(
            booking.guest_id,
            template,
            serde_json::json!({
                "booking_id": booking.id,
                "listing_id": booking.listing_id,
                "check_in": booking.check_in,
            }),
        );

        if let Err(reason) = self.notification_dispatcher.dispatch(&notification).await {
            warn!(
                booking_id = %booking.id,
                kind = kind.as_str(),
                reason = reason,
                "Reminder dispatch failed after the flag was claimed"
            );
            return Err(format!("Booking {}: dispatch failed: {}", booking.id, reason));
        }

        Ok(true)
    }

    /// Start the reminder sweep as a background task
    ///
    /// This spawns a tokio task that runs the sweep at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Reminder sweep is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Reminder sweep started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_reminder_sweep(Utc::now()).await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!("Reminder sweep finished with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        warn!("Reminder sweep cycle failed: {}", e);
                    }
                }
            }
        });
    }
}

/// Which check-in reminder, if any, is due for a confirmed booking
///
/// Calendar-date comparison keeps the two reminders disjoint: arrival
/// tomorrow is the one-day reminder, arrival today the day-of reminder.
fn due_check_in_reminder(booking: &Booking, now: DateTime<Utc>) -> Option<ReminderKind> {
    let check_in_date = booking.check_in.date_naive();
    let today = now.date_naive();
    let tomorrow = (now + Duration::days(1)).date_naive();

    if check_in_date == today && !booking.reminder_sent(ReminderKind::DayOf) {
        Some(ReminderKind::DayOf)
    } else if check_in_date == tomorrow && !booking.reminder_sent(ReminderKind::OneDayBefore) {
        Some(ReminderKind::OneDayBefore)
    } else {
        None
    }
}

/// Result of a reminder sweep cycle
#[derive(Debug, Default)]
pub struct ReminderSweepResult {
    /// Number of bookings examined across both status sets
    pub checked: usize,
    /// One-day-before check-in reminders sent
    pub one_day_sent: usize,
    /// Day-of check-in reminders sent
    pub day_of_sent: usize,
    /// Post-stay review reminders sent
    pub review_sent: usize,
    /// Any errors encountered while sending individual reminders
    pub errors: Vec<String>,
}

impl ReminderSweepResult {
    /// Check if the sweep ran without errors
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total reminders sent in this cycle
    pub fn total_sent(&self) -> usize {
        self.one_day_sent + self.day_of_sent + self.review_sent
    }
}
