//! Types for booking state machine operations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::booking::{
    Booking, BookingStatus, CancelActor, CancellationPolicy, ConfirmationKind, PaymentMethod,
};
use crate::domain::entities::payout::PayoutStatus;
use crate::domain::value_objects::refund::RefundBreakdown;
use crate::errors::SideEffectError;
use crate::services::notification::NotificationTemplate;

/// Input for creating a new reservation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBookingRequest {
    /// Guest requesting the reservation
    pub guest_id: Uuid,
    /// Host who owns the listing
    pub host_id: Uuid,
    /// Listing being reserved
    pub listing_id: Uuid,
    /// Arrival date
    pub check_in: DateTime<Utc>,
    /// Departure date, if the stay spans multiple days
    pub check_out: Option<DateTime<Utc>>,
    /// Price before fees
    pub base_price: Decimal,
    /// Platform fee added on top
    pub service_fee: Decimal,
    /// How the guest pays
    pub payment_method: PaymentMethod,
    /// Policy tier copied from the listing at request time
    pub cancellation_policy: Option<CancellationPolicy>,
}

/// A requested status transition, carrying the trigger-specific inputs
#[derive(Debug, Clone, PartialEq)]
pub enum BookingTransition {
    /// Host approval or auto-confirm timeout
    Confirm { kind: ConfirmationKind },
    /// Host declines the request
    Reject { reason: Option<String> },
    /// Guest or host cancels
    Cancel { initiated_by: CancelActor },
    /// The stay has ended
    Complete,
}

impl BookingTransition {
    /// Status this transition moves the booking into
    pub fn target_status(&self) -> BookingStatus {
        match self {
            Self::Confirm { .. } => BookingStatus::Confirmed,
            Self::Reject { .. } => BookingStatus::Rejected,
            Self::Cancel { .. } => BookingStatus::Cancelled,
            Self::Complete => BookingStatus::Completed,
        }
    }
}

/// A side effect owed to the outside world after a transition commits
///
/// Planned by the pure transition logic and executed by the service, so
/// tests can assert on what a transition will do without any I/O running.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    /// Dispatch a notification
    Notify {
        recipient: Uuid,
        template: NotificationTemplate,
        details: serde_json::Value,
    },
    /// Move the booking's payout to a new status
    UpdatePayout { status: PayoutStatus },
    /// Credit a user's wallet and append an audit transaction
    CreditWallet {
        user_id: Uuid,
        amount: Decimal,
        description: String,
    },
}

/// The full, not-yet-executed result of planning a transition
#[derive(Debug, Clone)]
pub struct TransitionPlan {
    /// Status the booking held when the plan was made
    pub from: BookingStatus,
    /// Status the booking moves into
    pub to: BookingStatus,
    /// Copy of the booking with the transition's field updates applied
    pub booking: Booking,
    /// Refund computation, present only for cancellations
    pub refund: Option<RefundBreakdown>,
    /// Side effects to execute once the status change persists
    pub effects: Vec<SideEffect>,
}

/// Result of an executed transition
///
/// Side-effect failures are reported here rather than as errors: once the
/// status change has persisted it is never reverted, and a lost
/// notification or a failed payout update degrades the outcome without
/// invalidating it.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    /// The booking as persisted
    pub booking: Booking,
    /// Refund computation, present only for cancellations
    pub refund: Option<RefundBreakdown>,
    /// Number of notifications successfully dispatched
    pub notifications_sent: usize,
    /// Side effects that failed after the transition committed
    pub side_effect_failures: Vec<SideEffectError>,
}

impl TransitionOutcome {
    /// Check whether every planned side effect succeeded
    pub fn is_clean(&self) -> bool {
        self.side_effect_failures.is_empty()
    }
}

/// Result of a completion sweep cycle
#[derive(Debug, Default)]
pub struct CompletionSweepResult {
    /// Number of confirmed bookings examined
    pub checked: usize,
    /// Number of bookings moved to completed
    pub completed: usize,
    /// Any errors encountered while completing individual bookings
    pub errors: Vec<String>,
}

impl CompletionSweepResult {
    /// Check if the sweep ran without errors
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
