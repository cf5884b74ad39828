//! Tests for the mock wallet repository implementation

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::wallet::{Wallet, WalletTransactionKind};
use crate::errors::DomainError;
use crate::repositories::wallet::{MockWalletRepository, WalletRepository};

#[tokio::test]
async fn test_credit_creates_wallet_when_absent() {
    let repo = MockWalletRepository::new();
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    assert!(repo.find_by_user_id(user_id).await.unwrap().is_none());

    let txn = repo
        .credit(user_id, Decimal::new(4_500, 0), None, "Refund".to_string(), now)
        .await
        .unwrap();

    assert_eq!(txn.kind, WalletTransactionKind::Credit);
    assert_eq!(txn.balance_before, Decimal::ZERO);
    assert_eq!(txn.balance_after, Decimal::new(4_500, 0));

    let wallet = repo.find_by_user_id(user_id).await.unwrap().unwrap();
    assert_eq!(wallet.balance, Decimal::new(4_500, 0));
}

#[tokio::test]
async fn test_credit_appends_transaction_per_call() {
    let repo = MockWalletRepository::new();
    let user_id = Uuid::new_v4();
    let booking_id = Uuid::new_v4();
    let now = Utc::now();

    let mut wallet = Wallet::new(user_id);
    wallet.balance = Decimal::new(1_000, 0);
    repo.insert(wallet).await;

    repo.credit(
        user_id,
        Decimal::new(500, 0),
        Some(booking_id),
        "Refund for cancelled booking".to_string(),
        now,
    )
    .await
    .unwrap();
    repo.credit(user_id, Decimal::new(250, 0), None, "Promotion".to_string(), now)
        .await
        .unwrap();

    let transactions = repo.transactions().await;
    assert_eq!(transactions.len(), 2);

    // Each record chains off the previous balance
    assert_eq!(transactions[0].balance_before, Decimal::new(1_000, 0));
    assert_eq!(transactions[0].balance_after, Decimal::new(1_500, 0));
    assert_eq!(transactions[0].booking_id, Some(booking_id));
    assert_eq!(transactions[1].balance_before, Decimal::new(1_500, 0));
    assert_eq!(transactions[1].balance_after, Decimal::new(1_750, 0));

    let wallet = repo.find_by_user_id(user_id).await.unwrap().unwrap();
    assert_eq!(wallet.balance, Decimal::new(1_750, 0));
}

#[tokio::test]
async fn test_concurrent_credits_do_not_lose_updates() {
    let repo = std::sync::Arc::new(MockWalletRepository::new());
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.credit(user_id, Decimal::new(100, 0), None, "credit".to_string(), now)
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let wallet = repo.find_by_user_id(user_id).await.unwrap().unwrap();
    assert_eq!(wallet.balance, Decimal::new(1_000, 0));
    assert_eq!(repo.transactions().await.len(), 10);
}

#[tokio::test]
async fn test_should_fail_forces_errors() {
    let repo = MockWalletRepository::new();
    repo.set_should_fail(true);

    let result = repo
        .credit(Uuid::new_v4(), Decimal::ONE, None, "credit".to_string(), Utc::now())
        .await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Internal { .. }
    ));
}
