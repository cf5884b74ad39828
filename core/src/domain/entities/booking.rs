//! Booking entity representing a guest reservation in the StayNest marketplace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingError;

/// Hours a booking may remain pending before it becomes eligible for
/// auto-confirmation
pub const AUTO_CONFIRM_DELAY_HOURS: i64 = 24;

/// Represents the lifecycle status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting host approval (initial status)
    Pending,
    /// Approved by the host or auto-confirmed after the grace period
    Confirmed,
    /// Declined by the host (terminal)
    Rejected,
    /// Cancelled by the guest or the host (terminal)
    Cancelled,
    /// Stay finished (terminal)
    Completed,
}

impl BookingStatus {
    /// Convert to string representation for storage and error reporting
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Parse from string representation
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "rejected" => Some(Self::Rejected),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Checks whether this status admits no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Completed)
    }

    /// Checks whether the state machine permits moving from this status
    /// to `target`
    ///
    /// Permitted paths: pending may move to confirmed, rejected, or
    /// cancelled; confirmed may move to completed or cancelled. Terminal
    /// statuses permit nothing.
    pub fn can_transition_to(&self, target: BookingStatus) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Rejected)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }
}

/// Cancellation policy tier attached to the listing at booking time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancellationPolicy {
    /// Full refund up to the day before check-in
    Flexible,
    /// Full refund with five days notice, half with one day
    #[default]
    Moderate,
    /// Half refund with two weeks notice, quarter with one week
    Strict,
}

impl CancellationPolicy {
    /// Convert to string representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flexible => "flexible",
            Self::Moderate => "moderate",
            Self::Strict => "strict",
        }
    }

    /// Parse from a stored string, falling back to `Moderate` for missing
    /// or unrecognized values
    pub fn parse_or_default(s: Option<&str>) -> Self {
        match s {
            Some("flexible") => Self::Flexible,
            Some("moderate") => Self::Moderate,
            Some("strict") => Self::Strict,
            _ => Self::Moderate,
        }
    }
}

/// How the guest paid for the booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Paid from the guest's platform wallet; refunds credit it back
    Wallet,
    /// Paid through an external payment provider
    ExternalPayment,
}

impl PaymentMethod {
    /// Convert to string representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::ExternalPayment => "external-payment",
        }
    }
}

/// Payment state of a booking, managed by the payment layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

/// Which party initiated a cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelActor {
    Guest,
    Host,
}

impl CancelActor {
    /// Convert to string representation for storage and notifications
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Host => "host",
        }
    }
}

/// Whether a confirmation came from the host or the timeout policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationKind {
    /// Host approved the request explicitly
    Manual,
    /// Grace period elapsed without host action
    Auto,
}

/// The reminder messages tracked per booking, each sent at most once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    /// Check-in reminder sent one day before arrival
    OneDayBefore,
    /// Check-in reminder sent on the arrival day
    DayOf,
    /// Review request sent after checkout
    Review,
}

impl ReminderKind {
    /// Convert to string representation for storage and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneDayBefore => "one_day_before",
            Self::DayOf => "day_of",
            Self::Review => "review",
        }
    }
}

/// Refund figures recorded on a booking after cancellation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundRecord {
    /// Amount paid back to the guest after the platform deduction
    pub refund_amount: Decimal,

    /// Platform's cut taken from the refundable portion
    pub admin_deduction: Decimal,

    /// Portion of the total the guest forfeits under the policy tier
    pub cancellation_fee: Decimal,

    /// Human-readable summary of the applied policy threshold
    pub policy_description: String,
}

/// Booking entity representing a guest reservation against a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking
    pub id: Uuid,

    /// Guest who requested the reservation
    pub guest_id: Uuid,

    /// Host who owns the listing
    pub host_id: Uuid,

    /// Listing being reserved
    pub listing_id: Uuid,

    /// Arrival date
    pub check_in: DateTime<Utc>,

    /// Departure date; absent for single-day stays and experiences
    pub check_out: Option<DateTime<Utc>>,

    /// Timestamp when the reservation request was made; documents written
    /// by earlier application versions may lack it
    pub created_at: Option<DateTime<Utc>>,

    /// Timestamp when the booking was last updated
    pub updated_at: DateTime<Utc>,

    /// Nightly price times nights, before fees
    pub base_price: Decimal,

    /// Platform service fee
    pub service_fee: Decimal,

    /// Total charged to the guest
    pub total_amount: Decimal,

    /// How the guest paid
    pub payment_method: PaymentMethod,

    /// Payment state, managed by the payment layer
    pub payment_status: PaymentStatus,

    /// Cancellation policy tier copied from the listing; missing values
    /// resolve to `Moderate`
    pub cancellation_policy: Option<CancellationPolicy>,

    /// Current lifecycle status
    pub status: BookingStatus,

    /// Whether the confirmation came from the timeout policy
    #[serde(default)]
    pub auto_confirmed: bool,

    /// Timestamp when the booking was confirmed
    pub confirmed_at: Option<DateTime<Utc>>,

    /// Timestamp when the booking was cancelled or rejected
    pub cancelled_at: Option<DateTime<Utc>>,

    /// Timestamp when the stay was completed
    pub completed_at: Option<DateTime<Utc>>,

    /// Host's reason for declining, when given
    pub rejection_reason: Option<String>,

    /// Which party cancelled
    pub cancelled_by: Option<CancelActor>,

    /// Refund figures, populated only after cancellation
    pub refund: Option<RefundRecord>,

    /// Whether the 1-day-before check-in reminder has been sent
    #[serde(default)]
    pub reminder_one_day_sent: bool,

    /// Whether the day-of check-in reminder has been sent
    #[serde(default)]
    pub reminder_day_of_sent: bool,

    /// Whether the post-checkout review reminder has been sent
    #[serde(default)]
    pub review_reminder_sent: bool,
}

impl Booking {
    /// Creates a new pending booking
    ///
    /// # Arguments
    ///
    /// * `guest_id` - Guest requesting the reservation
    /// * `host_id` - Host who owns the listing
    /// * `listing_id` - Listing being reserved
    /// * `check_in` - Arrival date
    /// * `check_out` - Departure date, if the stay spans multiple days
    /// * `base_price` - Price before fees
    /// * `service_fee` - Platform fee added on top
    /// * `payment_method` - How the guest pays
    /// * `cancellation_policy` - Policy tier copied from the listing
    ///
    /// # Returns
    ///
    /// A new `Booking` in `Pending` status with the total amount derived
    /// from base price and service fee
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        guest_id: Uuid,
        host_id: Uuid,
        listing_id: Uuid,
        check_in: DateTime<Utc>,
        check_out: Option<DateTime<Utc>>,
        base_price: Decimal,
        service_fee: Decimal,
        payment_method: PaymentMethod,
        cancellation_policy: Option<CancellationPolicy>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            guest_id,
            host_id,
            listing_id,
            check_in,
            check_out,
            created_at: Some(now),
            updated_at: now,
            base_price,
            service_fee,
            total_amount: base_price + service_fee,
            payment_method,
            payment_status: PaymentStatus::Pending,
            cancellation_policy,
            status: BookingStatus::Pending,
            auto_confirmed: false,
            confirmed_at: None,
            cancelled_at: None,
            completed_at: None,
            rejection_reason: None,
            cancelled_by: None,
            refund: None,
            reminder_one_day_sent: false,
            reminder_day_of_sent: false,
            review_reminder_sent: false,
        }
    }

    /// Hydrates a booking from a raw store document
    ///
    /// The typed entity guarantees its required fields once constructed;
    /// documents written by earlier application versions may not. A
    /// document whose `check_in`, `total_amount`, or `status` is absent or
    /// unparseable is rejected with `MissingData` naming the field, so the
    /// caller sees which document needs repair instead of a later
    /// computation error. A missing `created_at` is tolerated: the
    /// auto-confirm policy reports it as an ineligibility reason.
    pub fn from_document(document: serde_json::Value) -> Result<Self, BookingError> {
        let booking_id = document
            .get("id")
            .and_then(serde_json::Value::as_str)
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .unwrap_or_else(Uuid::nil);

        required_document_field::<DateTime<Utc>>(&document, "check_in", booking_id)?;
        required_document_field::<Decimal>(&document, "total_amount", booking_id)?;
        required_document_field::<BookingStatus>(&document, "status", booking_id)?;

        serde_json::from_value(document).map_err(|source| BookingError::MissingData {
            booking_id,
            field: source.to_string(),
        })
    }

    /// Resolves the cancellation policy tier, defaulting to `Moderate`
    /// when unset
    pub fn policy_or_default(&self) -> CancellationPolicy {
        self.cancellation_policy.unwrap_or_default()
    }

    /// The date the guest leaves: check-out when present, otherwise the
    /// check-in date itself
    pub fn departure_date(&self) -> DateTime<Utc> {
        self.check_out.unwrap_or(self.check_in)
    }

    /// Marks the booking confirmed
    ///
    /// Field updates only; transition legality is enforced by the state
    /// machine before this is called.
    pub fn confirm(&mut self, kind: ConfirmationKind, now: DateTime<Utc>) {
        self.status = BookingStatus::Confirmed;
        self.confirmed_at = Some(now);
        self.auto_confirmed = kind == ConfirmationKind::Auto;
        self.updated_at = now;
    }

    /// Marks the booking rejected, recording the host's reason when given
    pub fn reject(&mut self, reason: Option<String>, now: DateTime<Utc>) {
        self.status = BookingStatus::Rejected;
        self.cancelled_at = Some(now);
        self.rejection_reason = reason;
        self.updated_at = now;
    }

    /// Marks the booking cancelled, recording who cancelled and the refund
    /// figures computed for the cancellation
    pub fn cancel(&mut self, initiated_by: CancelActor, refund: RefundRecord, now: DateTime<Utc>) {
        self.status = BookingStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.cancelled_by = Some(initiated_by);
        self.refund = Some(refund);
        self.updated_at = now;
    }

    /// Marks the stay completed
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.status = BookingStatus::Completed;
        self.completed_at = Some(now);
        self.updated_at = now;
    }

    /// Checks whether the given reminder has already been sent
    pub fn reminder_sent(&self, kind: ReminderKind) -> bool {
        match kind {
            ReminderKind::OneDayBefore => self.reminder_one_day_sent,
            ReminderKind::DayOf => self.reminder_day_of_sent,
            ReminderKind::Review => self.review_reminder_sent,
        }
    }

    /// Sets the given reminder flag
    ///
    /// Flags are set-once: marking an already-sent reminder again is a
    /// no-op, never a reset.
    pub fn mark_reminder_sent(&mut self, kind: ReminderKind, now: DateTime<Utc>) {
        match kind {
            ReminderKind::OneDayBefore => self.reminder_one_day_sent = true,
            ReminderKind::DayOf => self.reminder_day_of_sent = true,
            ReminderKind::Review => self.review_reminder_sent = true,
        }
        self.updated_at = now;
    }
}

/// Presence-and-parseability check for one required field of a raw document
fn required_document_field<T: serde::de::DeserializeOwned>(
    document: &serde_json::Value,
    field: &str,
    booking_id: Uuid,
) -> Result<T, BookingError> {
    document
        .get(field)
        .filter(|value| !value.is_null())
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .ok_or_else(|| BookingError::MissingData {
            booking_id,
            field: field.to_string(),
        })
}
