//! Completion sweep for confirmed bookings whose stay has ended
//!
//! Periodic batch job that moves `confirmed` bookings to `completed` once
//! their departure date has passed, driving the completion notifications
//! to guest and host through the booking service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::entities::booking::BookingStatus;
use crate::errors::DomainError;
use crate::repositories::{BookingRepository, PayoutRepository, WalletRepository};
use crate::services::notification::NotificationDispatcher;

use super::config::CompletionSweepConfig;
use super::service::BookingService;
use super::types::CompletionSweepResult;

/// Service completing bookings whose departure date has passed
pub struct CompletionSweepService<B, P, W, N>
where
    B: BookingRepository + 'static,
    P: PayoutRepository + 'static,
    W: WalletRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    booking_service: Arc<BookingService<B, P, W, N>>,
    booking_repository: Arc<B>,
    config: CompletionSweepConfig,
}

impl<B, P, W, N> CompletionSweepService<B, P, W, N>
where
    B: BookingRepository,
    P: PayoutRepository,
    W: WalletRepository,
    N: NotificationDispatcher,
{
    /// Create a new completion sweep service
    pub fn new(
        booking_service: Arc<BookingService<B, P, W, N>>,
        booking_repository: Arc<B>,
        config: CompletionSweepConfig,
    ) -> Self {
        Self {
            booking_service,
            booking_repository,
            config,
        }
    }

    /// Run a single completion sweep cycle
    ///
    /// Examines every confirmed booking and completes those whose
    /// departure date (check-out, or check-in for single-day stays) is at
    /// or before `now`. A failure on one booking is recorded and does not
    /// abort the rest of the sweep.
    ///
    /// # Arguments
    ///
    /// * `now` - Instant the sweep runs at
    ///
    /// # Returns
    /// * `Ok(CompletionSweepResult)` - Counts and per-booking errors
    /// * `Err(DomainError)` - If the confirmed set cannot be loaded
    pub async fn run_completion_sweep(
        &self,
        now: DateTime<Utc>,
    ) -> Result<CompletionSweepResult, DomainError> {
        if !self.config.enabled {
            return Ok(CompletionSweepResult::default());
        }

        let confirmed = self
            .booking_repository
            .find_by_status(BookingStatus::Confirmed)
            .await?;

        let mut result = CompletionSweepResult {
            checked: confirmed.len(),
            ..Default::default()
        };

        for booking in confirmed {
            if booking.departure_date() > now {
                continue;
            }

            match self.booking_service.complete_booking(booking.id, now).await {
                Ok(_) => result.completed += 1,
                Err(e) => {
                    warn!(
                        booking_id = %booking.id,
                        error = %e,
                        "Failed to complete booking during sweep"
                    );
                    result.errors.push(format!("Booking {}: {}", booking.id, e));
                }
            }
        }

        info!(
            checked = result.checked,
            completed = result.completed,
            errors = result.errors.len(),
            "Completion sweep finished"
        );

        Ok(result)
    }

    /// Start the completion sweep as a background task
    ///
    /// This spawns a tokio task that runs the sweep at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Completion sweep is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Completion sweep started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_completion_sweep(Utc::now()).await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!("Completion sweep finished with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        warn!("Completion sweep cycle failed: {}", e);
                    }
                }
            }
        });
    }
}
