//! Auto-confirm sweep over the pending booking set
//!
//! Periodic batch job that finds pending bookings past the confirmation
//! timeout and drives each through the `pending → confirmed` transition
//! with `ConfirmationKind::Auto`, so guests get the auto-confirmation
//! message rather than the host-approval one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::entities::booking::{BookingStatus, ConfirmationKind};
use crate::errors::DomainError;
use crate::repositories::{BookingRepository, PayoutRepository, WalletRepository};
use crate::services::booking::BookingService;
use crate::services::notification::NotificationDispatcher;

use super::config::AutoConfirmConfig;
use super::policy::check_eligibility;

/// Service auto-confirming pending bookings past the timeout
pub struct AutoConfirmSweep<B, P, W, N>
where
    B: BookingRepository + 'static,
    P: PayoutRepository + 'static,
    W: WalletRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    booking_service: Arc<BookingService<B, P, W, N>>,
    booking_repository: Arc<B>,
    config: AutoConfirmConfig,
}

impl<B, P, W, N> AutoConfirmSweep<B, P, W, N>
where
    B: BookingRepository,
    P: PayoutRepository,
    W: WalletRepository,
    N: NotificationDispatcher,
{
    /// Create a new auto-confirm sweep service
    pub fn new(
        booking_service: Arc<BookingService<B, P, W, N>>,
        booking_repository: Arc<B>,
        config: AutoConfirmConfig,
    ) -> Self {
        Self {
            booking_service,
            booking_repository,
            config,
        }
    }

    /// Run a single auto-confirm sweep cycle
    ///
    /// Examines every pending booking, confirms those the eligibility
    /// policy accepts, sequentially and one at a time. A failure on one
    /// booking is recorded and does not abort the rest of the sweep; a
    /// booking another caller confirmed in the meantime surfaces here as
    /// an invalid-transition conflict rather than a double confirmation.
    ///
    /// # Arguments
    ///
    /// * `now` - Instant the sweep runs at, also used as the eligibility
    ///   reference time
    ///
    /// # Returns
    /// * `Ok(SweepResult)` - Counts and per-booking errors
    /// * `Err(DomainError)` - If the pending set cannot be loaded
    pub async fn run_sweep(&self, now: DateTime<Utc>) -> Result<SweepResult, DomainError> {
        if !self.config.enabled {
            return Ok(SweepResult::default());
        }

        let pending = self
            .booking_repository
            .find_by_status(BookingStatus::Pending)
            .await?;

        let mut result = SweepResult {
            checked: pending.len(),
            ..Default::default()
        };

        for booking in pending {
            let eligibility = check_eligibility(&booking, now, self.config.delay_hours);
            if !eligibility.eligible {
                continue;
            }

            match self
                .booking_service
                .confirm_booking(booking.id, ConfirmationKind::Auto, now)
                .await
            {
                Ok(_) => result.confirmed += 1,
                Err(e) => {
                    warn!(
                        booking_id = %booking.id,
                        error = %e,
                        "Failed to auto-confirm booking during sweep"
                    );
                    result.errors.push(format!("Booking {}: {}", booking.id, e));
                }
            }
        }

        info!(
            checked = result.checked,
            confirmed = result.confirmed,
            errors = result.errors.len(),
            "Auto-confirm sweep finished"
        );

        Ok(result)
    }

    /// Start the auto-confirm sweep as a background task
    ///
    /// This spawns a tokio task that runs the sweep at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Auto-confirm sweep is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.sweep_interval_seconds);

        tokio::spawn(async move {
            info!(
                "Auto-confirm sweep started - will run every {} seconds",
                self.config.sweep_interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_sweep(Utc::now()).await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!(
                                "Auto-confirm sweep finished with errors: {:?}",
                                result.errors
                            );
                        }
                    }
                    Err(e) => {
                        warn!("Auto-confirm sweep cycle failed: {}", e);
                    }
                }
            }
        });
    }
}

/// Result of an auto-confirm sweep cycle
#[derive(Debug, Default)]
pub struct SweepResult {
    /// Number of pending bookings examined
    pub checked: usize,
    /// Number of bookings auto-confirmed
    pub confirmed: usize,
    /// Any errors encountered while confirming individual bookings
    pub errors: Vec<String>,
}

impl SweepResult {
    /// Check if the sweep ran without errors
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
