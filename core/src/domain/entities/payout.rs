//! Payout entity tracking money owed to a host for a booking.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Settlement status of a payout, driven by the booking lifecycle but
/// tracked independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutStatus {
    /// Created alongside the booking, not yet held
    Pending,
    /// Booking confirmed; funds held until settlement
    OnHold,
    /// Settled to the host by admin tooling
    Released,
    /// Booking cancelled; funds returned to the guest side
    Refunded,
}

impl PayoutStatus {
    /// Convert to string representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::OnHold => "ON_HOLD",
            Self::Released => "RELEASED",
            Self::Refunded => "REFUNDED",
        }
    }

    /// Parse from string representation
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "ON_HOLD" => Some(Self::OnHold),
            "RELEASED" => Some(Self::Released),
            "REFUNDED" => Some(Self::Refunded),
            _ => None,
        }
    }
}

/// Payout entity, one created per booking at reservation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    /// Unique identifier for the payout
    pub id: Uuid,

    /// Booking this payout settles
    pub booking_id: Uuid,

    /// Host owed the money
    pub host_id: Uuid,

    /// Amount owed to the host
    pub amount: Decimal,

    /// Settlement status
    pub status: PayoutStatus,

    /// Timestamp when the payout was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the payout was last updated
    pub updated_at: DateTime<Utc>,
}

impl Payout {
    /// Creates a new pending payout for a booking
    pub fn new(booking_id: Uuid, host_id: Uuid, amount: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            booking_id,
            host_id,
            amount,
            status: PayoutStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Places the payout on hold when the booking is confirmed
    pub fn hold(&mut self, now: DateTime<Utc>) {
        self.status = PayoutStatus::OnHold;
        self.updated_at = now;
    }

    /// Releases the payout to the host at settlement
    pub fn release(&mut self, now: DateTime<Utc>) {
        self.status = PayoutStatus::Released;
        self.updated_at = now;
    }

    /// Marks the payout refunded when the booking is cancelled
    pub fn refund(&mut self, now: DateTime<Utc>) {
        self.status = PayoutStatus::Refunded;
        self.updated_at = now;
    }
}
