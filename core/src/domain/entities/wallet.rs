//! Wallet entity holding a user's platform balance, with immutable
//! transaction records for every balance change.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a wallet balance change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletTransactionKind {
    Credit,
    Debit,
}

impl WalletTransactionKind {
    /// Convert to string representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

/// Immutable audit record written with every wallet balance change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    /// Unique identifier for the transaction
    pub id: Uuid,

    /// Wallet owner
    pub user_id: Uuid,

    /// Booking that caused the change, when applicable
    pub booking_id: Option<Uuid>,

    /// Direction of the change
    pub kind: WalletTransactionKind,

    /// Amount moved (always non-negative; direction is in `kind`)
    pub amount: Decimal,

    /// Balance before the change was applied
    pub balance_before: Decimal,

    /// Balance after the change was applied
    pub balance_after: Decimal,

    /// Human-readable reason for the change
    pub description: String,

    /// Timestamp when the change was applied
    pub created_at: DateTime<Utc>,
}

/// Wallet entity holding a user's platform balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Wallet owner
    pub user_id: Uuid,

    /// Current balance
    pub balance: Decimal,

    /// Timestamp when the balance last changed
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Creates an empty wallet for a user
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            balance: Decimal::ZERO,
            updated_at: Utc::now(),
        }
    }

    /// Applies a credit to the balance and produces the matching audit
    /// record
    ///
    /// The returned transaction captures the balance before and after the
    /// change; the caller persists both the wallet and the record in a
    /// single logical operation.
    pub fn apply_credit(
        &mut self,
        amount: Decimal,
        booking_id: Option<Uuid>,
        description: String,
        now: DateTime<Utc>,
    ) -> WalletTransaction {
        let balance_before = self.balance;
        self.balance += amount;
        self.updated_at = now;

        WalletTransaction {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            booking_id,
            kind: WalletTransactionKind::Credit,
            amount,
            balance_before,
            balance_after: self.balance,
            description,
            created_at: now,
        }
    }
}
