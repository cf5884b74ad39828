//! Mock implementation of WalletRepository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::wallet::{Wallet, WalletTransaction};
use crate::errors::DomainError;

use super::WalletRepository;

/// Wallets and their transaction log, guarded by a single lock so credits
/// are atomic
#[derive(Default)]
struct WalletStore {
    wallets: HashMap<Uuid, Wallet>,
    transactions: Vec<WalletTransaction>,
}

/// Mock wallet repository backed by an in-memory store
pub struct MockWalletRepository {
    store: Arc<RwLock<WalletStore>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockWalletRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(WalletStore::default())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether operations should fail
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

    /// Insert a wallet directly for test setup
    pub async fn insert(&self, wallet: Wallet) {
        self.store.write().await.wallets.insert(wallet.user_id, wallet);
    }

    /// All transaction records written so far, in write order
    pub async fn transactions(&self) -> Vec<WalletTransaction> {
        self.store.read().await.transactions.clone()
    }
}

impl Default for MockWalletRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletRepository for MockWalletRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Wallet>, DomainError> {
        self.check_failure()?;
        let store = self.store.read().await;
        Ok(store.wallets.get(&user_id).cloned())
    }

    async fn credit(
        &self,
        user_id: Uuid,
        amount: Decimal,
        booking_id: Option<Uuid>,
        description: String,
        now: DateTime<Utc>,
    ) -> Result<WalletTransaction, DomainError> {
        self.check_failure()?;
        let mut store = self.store.write().await;

        let wallet = store
            .wallets
            .entry(user_id)
            .or_insert_with(|| Wallet::new(user_id));
        let transaction = wallet.apply_credit(amount, booking_id, description, now);

        store.transactions.push(transaction.clone());
        Ok(transaction)
    }
}
