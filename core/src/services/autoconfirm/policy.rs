//! Auto-confirm eligibility policy
//!
//! Pure decision logic for the 24-hour confirmation timeout. A pending
//! booking the host has not acted on becomes eligible for automatic
//! confirmation once the configured delay has elapsed since creation.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::entities::booking::{Booking, BookingStatus};

/// Seconds in an hour, for remaining-time rounding
const SECONDS_PER_HOUR: i64 = 3_600;

/// Why a booking is not eligible for auto-confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibilityReason {
    /// The booking is no longer awaiting host action
    NotPending,
    /// The creation timestamp cannot be determined
    MissingCreatedAt,
}

impl IneligibilityReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotPending => "not pending",
            Self::MissingCreatedAt => "invalid creation date",
        }
    }
}

/// Outcome of an eligibility check, with the timing figures the host and
/// guest screens display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoConfirmEligibility {
    /// Whether the booking should be auto-confirmed now
    pub eligible: bool,

    /// Why not, when ineligible
    pub reason: Option<IneligibilityReason>,

    /// Whole hours until the booking becomes eligible, rounded up;
    /// zero when already eligible or indeterminate
    pub remaining_hours: i64,

    /// Exact instant auto-confirmation becomes possible; absent when the
    /// creation timestamp is unknown or the booking is not pending
    pub eligible_at: Option<DateTime<Utc>>,
}

impl AutoConfirmEligibility {
    fn ineligible(reason: IneligibilityReason) -> Self {
        Self {
            eligible: false,
            reason: Some(reason),
            remaining_hours: 0,
            eligible_at: None,
        }
    }
}

/// Decide whether a booking should be auto-confirmed
///
/// A booking qualifies when it is still pending and at least `delay_hours`
/// have elapsed since its creation. For a fixed booking the result is
/// monotonic in `now`: once eligible, later instants stay eligible.
///
/// # Arguments
///
/// * `booking` - The booking to examine
/// * `now` - The current time
/// * `delay_hours` - Hours of host inaction before confirmation fires
///
/// # Returns
///
/// The decision plus the remaining wait and the instant eligibility
/// begins, for display purposes
pub fn check_eligibility(
    booking: &Booking,
    now: DateTime<Utc>,
    delay_hours: i64,
) -> AutoConfirmEligibility {
    if booking.status != BookingStatus::Pending {
        return AutoConfirmEligibility::ineligible(IneligibilityReason::NotPending);
    }

    let created_at = match booking.created_at {
        Some(created_at) => created_at,
        None => {
            return AutoConfirmEligibility::ineligible(IneligibilityReason::MissingCreatedAt);
        }
    };

    let eligible_at = created_at + Duration::hours(delay_hours);
    if now >= eligible_at {
        return AutoConfirmEligibility {
            eligible: true,
            reason: None,
            remaining_hours: 0,
            eligible_at: Some(eligible_at),
        };
    }

    // Ceiling division (`i64::div_ceil` is not yet stable)
    let remaining_seconds = (eligible_at - now).num_seconds();
    let remaining_hours =
        remaining_seconds / SECONDS_PER_HOUR + (remaining_seconds % SECONDS_PER_HOUR > 0) as i64;

    AutoConfirmEligibility {
        eligible: false,
        reason: None,
        remaining_hours,
        eligible_at: Some(eligible_at),
    }
}
