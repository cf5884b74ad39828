//! Wallet repository trait defining the interface for wallet persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::wallet::{Wallet, WalletTransaction};
use crate::errors::DomainError;

/// Repository trait for Wallet persistence operations
///
/// The balance is a shared mutating resource: `credit` must apply the
/// read-modify-write and append the audit transaction record as one logical
/// operation, so concurrent credits never lose an update.
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Find a user's wallet
    ///
    /// # Arguments
    /// * `user_id` - The wallet owner
    ///
    /// # Returns
    /// * `Ok(Some(wallet))` if found, `Ok(None)` otherwise
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Wallet>, DomainError>;

    /// Credit a user's wallet and append the matching transaction record
    ///
    /// Creates the wallet when the user does not have one yet. The balance
    /// update and the transaction append are atomic with respect to other
    /// calls on the same repository.
    ///
    /// # Arguments
    /// * `user_id` - The wallet owner
    /// * `amount` - Amount to credit (non-negative)
    /// * `booking_id` - Booking that caused the credit, when applicable
    /// * `description` - Human-readable reason recorded on the transaction
    /// * `now` - Timestamp recorded on the wallet and the transaction
    ///
    /// # Returns
    /// * The transaction record written for this credit
    async fn credit(
        &self,
        user_id: Uuid,
        amount: Decimal,
        booking_id: Option<Uuid>,
        description: String,
        now: DateTime<Utc>,
    ) -> Result<WalletTransaction, DomainError>;
}
