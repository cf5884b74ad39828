//! Tests for the booking service transition orchestration

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use sn_shared::config::RefundPolicyConfig;

use crate::domain::entities::booking::{
    BookingStatus, CancelActor, CancellationPolicy, ConfirmationKind, PaymentMethod,
};
use crate::domain::entities::payout::PayoutStatus;
use crate::errors::{BookingError, DomainError, SideEffectError};
use crate::repositories::{
    BookingRepository, MockBookingRepository, MockPayoutRepository, MockWalletRepository,
    PayoutRepository, WalletRepository,
};
use crate::services::booking::{BookingService, NewBookingRequest};
use crate::services::notification::{MockNotificationDispatcher, NotificationTemplate};

type TestService = BookingService<
    MockBookingRepository,
    MockPayoutRepository,
    MockWalletRepository,
    MockNotificationDispatcher,
>;

struct TestHarness {
    service: TestService,
    bookings: Arc<MockBookingRepository>,
    payouts: Arc<MockPayoutRepository>,
    wallets: Arc<MockWalletRepository>,
    dispatcher: Arc<MockNotificationDispatcher>,
}

fn harness() -> TestHarness {
    let bookings = Arc::new(MockBookingRepository::new());
    let payouts = Arc::new(MockPayoutRepository::new());
    let wallets = Arc::new(MockWalletRepository::new());
    let dispatcher = Arc::new(MockNotificationDispatcher::new());

    let service = BookingService::new(
        Arc::clone(&bookings),
        Arc::clone(&payouts),
        Arc::clone(&wallets),
        Arc::clone(&dispatcher),
        RefundPolicyConfig::default(),
    );

    TestHarness {
        service,
        bookings,
        payouts,
        wallets,
        dispatcher,
    }
}

fn request(payment_method: PaymentMethod) -> NewBookingRequest {
    NewBookingRequest {
        guest_id: Uuid::new_v4(),
        host_id: Uuid::new_v4(),
        listing_id: Uuid::new_v4(),
        check_in: Utc::now() + Duration::days(10),
        check_out: Some(Utc::now() + Duration::days(12)),
        base_price: Decimal::new(9_000, 0),
        service_fee: Decimal::new(1_000, 0),
        payment_method,
        cancellation_policy: Some(CancellationPolicy::Moderate),
    }
}

#[tokio::test]
async fn test_create_booking_persists_booking_payout_and_host_notification() {
    let h = harness();
    let req = request(PaymentMethod::ExternalPayment);
    let host_id = req.host_id;

    let booking = h.service.create_booking(req).await.unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.total_amount, Decimal::new(10_000, 0));

    let stored = h.bookings.find_by_id(booking.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Pending);

    let payout = h
        .payouts
        .find_by_booking_id(booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payout.status, PayoutStatus::Pending);
    assert_eq!(payout.amount, Decimal::new(10_000, 0));
    assert_eq!(payout.host_id, host_id);

    let sent = h.dispatcher.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, host_id);
    assert_eq!(sent[0].template, NotificationTemplate::BookingRequested);
}

#[tokio::test]
async fn test_create_booking_rejects_check_out_before_check_in() {
    let h = harness();
    let mut req = request(PaymentMethod::Wallet);
    req.check_out = Some(req.check_in - Duration::days(1));

    let result = h.service.create_booking(req).await;
    match result.unwrap_err() {
        DomainError::Validation { message } => {
            assert!(message.contains("Check-out"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_booking_rejects_negative_amounts() {
    let h = harness();
    let mut req = request(PaymentMethod::Wallet);
    req.base_price = Decimal::new(-100, 0);

    let result = h.service.create_booking(req).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_create_booking_survives_notification_failure() {
    let h = harness();
    h.dispatcher.set_should_fail(true);

    let booking = h
        .service
        .create_booking(request(PaymentMethod::Wallet))
        .await
        .unwrap();

    let stored = h.bookings.find_by_id(booking.id).await.unwrap();
    assert!(stored.is_some());
    assert_eq!(h.dispatcher.sent_count().await, 0);
}

#[tokio::test]
async fn test_confirm_books_payout_hold_and_guest_notification() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::ExternalPayment))
        .await
        .unwrap();
    let now = Utc::now();

    let outcome = h
        .service
        .confirm_booking(booking.id, ConfirmationKind::Manual, now)
        .await
        .unwrap();

    assert_eq!(outcome.booking.status, BookingStatus::Confirmed);
    assert_eq!(outcome.booking.confirmed_at, Some(now));
    assert!(!outcome.booking.auto_confirmed);
    assert_eq!(outcome.notifications_sent, 1);
    assert!(outcome.is_clean());

    let payout = h
        .payouts
        .find_by_booking_id(booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payout.status, PayoutStatus::OnHold);

    let sent = h.dispatcher.sent().await;
    let confirm_notice = sent
        .iter()
        .find(|n| n.template == NotificationTemplate::BookingConfirmed)
        .unwrap();
    assert_eq!(confirm_notice.recipient, booking.guest_id);
}

#[tokio::test]
async fn test_auto_confirm_sends_auto_template() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::ExternalPayment))
        .await
        .unwrap();

    let outcome = h
        .service
        .confirm_booking(booking.id, ConfirmationKind::Auto, Utc::now())
        .await
        .unwrap();

    assert!(outcome.booking.auto_confirmed);
    let sent = h.dispatcher.sent().await;
    assert!(sent
        .iter()
        .any(|n| n.template == NotificationTemplate::BookingAutoConfirmed));
}

#[tokio::test]
async fn test_transition_on_unknown_booking_is_not_found() {
    let h = harness();

    let result = h
        .service
        .confirm_booking(Uuid::new_v4(), ConfirmationKind::Manual, Utc::now())
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_reject_keeps_payout_pending() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::ExternalPayment))
        .await
        .unwrap();
    let now = Utc::now();

    let outcome = h
        .service
        .reject_booking(booking.id, Some("dates conflict".to_string()), now)
        .await
        .unwrap();

    assert_eq!(outcome.booking.status, BookingStatus::Rejected);
    assert_eq!(outcome.booking.cancelled_at, Some(now));
    assert_eq!(
        outcome.booking.rejection_reason.as_deref(),
        Some("dates conflict")
    );

    // Rejection plans no payout change
    let payout = h
        .payouts
        .find_by_booking_id(booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payout.status, PayoutStatus::Pending);

    let sent = h.dispatcher.sent().await;
    let rejection = sent
        .iter()
        .find(|n| n.template == NotificationTemplate::BookingRejected)
        .unwrap();
    assert_eq!(rejection.details["reason"], "dates conflict");
}

#[tokio::test]
async fn test_cancel_wallet_payment_credits_guest_wallet() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::Wallet))
        .await
        .unwrap();

    // Six days of notice under moderate terms refunds in full
    let now = booking.check_in - Duration::days(6);
    let outcome = h
        .service
        .cancel_booking(booking.id, CancelActor::Guest, now)
        .await
        .unwrap();

    assert_eq!(outcome.booking.status, BookingStatus::Cancelled);
    assert_eq!(outcome.booking.cancelled_by, Some(CancelActor::Guest));

    let breakdown = outcome.refund.as_ref().unwrap();
    assert_eq!(breakdown.final_refund_amount, Decimal::new(9_000, 0));
    assert_eq!(
        outcome.booking.refund.as_ref().unwrap().refund_amount,
        Decimal::new(9_000, 0)
    );

    let payout = h
        .payouts
        .find_by_booking_id(booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payout.status, PayoutStatus::Refunded);

    let wallet = h
        .wallets
        .find_by_user_id(booking.guest_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(wallet.balance, Decimal::new(9_000, 0));

    let transactions = h.wallets.transactions().await;
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].booking_id, Some(booking.id));
    assert_eq!(transactions[0].amount, Decimal::new(9_000, 0));
}

#[tokio::test]
async fn test_cancel_external_payment_leaves_wallet_untouched() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::ExternalPayment))
        .await
        .unwrap();

    let now = booking.check_in - Duration::days(6);
    let outcome = h
        .service
        .cancel_booking(booking.id, CancelActor::Host, now)
        .await
        .unwrap();

    assert_eq!(outcome.booking.status, BookingStatus::Cancelled);
    assert!(outcome.refund.is_some());

    let wallet = h.wallets.find_by_user_id(booking.guest_id).await.unwrap();
    assert!(wallet.is_none());
    assert!(h.wallets.transactions().await.is_empty());
}

#[tokio::test]
async fn test_cancel_from_confirmed_is_legal() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::ExternalPayment))
        .await
        .unwrap();
    h.service
        .confirm_booking(booking.id, ConfirmationKind::Manual, Utc::now())
        .await
        .unwrap();

    let outcome = h
        .service
        .cancel_booking(booking.id, CancelActor::Guest, Utc::now())
        .await
        .unwrap();

    assert_eq!(outcome.booking.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_complete_notifies_guest_and_host() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::ExternalPayment))
        .await
        .unwrap();
    h.service
        .confirm_booking(booking.id, ConfirmationKind::Manual, Utc::now())
        .await
        .unwrap();
    let now = Utc::now();

    let outcome = h.service.complete_booking(booking.id, now).await.unwrap();

    assert_eq!(outcome.booking.status, BookingStatus::Completed);
    assert_eq!(outcome.booking.completed_at, Some(now));
    assert_eq!(outcome.notifications_sent, 2);

    let sent = h.dispatcher.sent().await;
    let guest_notice = sent
        .iter()
        .find(|n| n.template == NotificationTemplate::BookingCompletedGuest)
        .unwrap();
    let host_notice = sent
        .iter()
        .find(|n| n.template == NotificationTemplate::BookingCompletedHost)
        .unwrap();
    assert_eq!(guest_notice.recipient, booking.guest_id);
    assert_eq!(host_notice.recipient, booking.host_id);
}

#[tokio::test]
async fn test_transition_out_of_terminal_state_fails_without_side_effects() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::ExternalPayment))
        .await
        .unwrap();
    h.service
        .reject_booking(booking.id, None, Utc::now())
        .await
        .unwrap();
    let sent_before = h.dispatcher.sent_count().await;

    let result = h
        .service
        .cancel_booking(booking.id, CancelActor::Guest, Utc::now())
        .await;

    match result.unwrap_err() {
        DomainError::Booking(BookingError::InvalidTransition { from, to, .. }) => {
            assert_eq!(from, "rejected");
            assert_eq!(to, "cancelled");
        }
        other => panic!("expected invalid transition, got {:?}", other),
    }

    // The failed attempt dispatched nothing and left the payout alone
    assert_eq!(h.dispatcher.sent_count().await, sent_before);
    let payout = h
        .payouts
        .find_by_booking_id(booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payout.status, PayoutStatus::Pending);
}

#[tokio::test]
async fn test_notification_failure_does_not_revert_transition() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::ExternalPayment))
        .await
        .unwrap();
    h.dispatcher.set_should_fail(true);

    let outcome = h
        .service
        .confirm_booking(booking.id, ConfirmationKind::Manual, Utc::now())
        .await
        .unwrap();

    // Transition committed despite the failed dispatch
    assert_eq!(outcome.booking.status, BookingStatus::Confirmed);
    assert_eq!(outcome.notifications_sent, 0);
    assert_eq!(outcome.side_effect_failures.len(), 1);
    assert!(matches!(
        outcome.side_effect_failures[0],
        SideEffectError::NotificationDispatch { .. }
    ));

    let stored = h.bookings.find_by_id(booking.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Confirmed);

    // The payout effect still ran after the failed notification
    let payout = h
        .payouts
        .find_by_booking_id(booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payout.status, PayoutStatus::OnHold);
}

#[tokio::test]
async fn test_payout_failure_is_reported_not_fatal() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::ExternalPayment))
        .await
        .unwrap();
    h.payouts.set_should_fail(true);

    let outcome = h
        .service
        .confirm_booking(booking.id, ConfirmationKind::Manual, Utc::now())
        .await
        .unwrap();

    assert_eq!(outcome.booking.status, BookingStatus::Confirmed);
    assert_eq!(outcome.notifications_sent, 1);
    assert!(matches!(
        outcome.side_effect_failures[0],
        SideEffectError::PayoutUpdate { .. }
    ));
}

#[tokio::test]
async fn test_wallet_failure_is_reported_not_fatal() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::Wallet))
        .await
        .unwrap();
    h.wallets.set_should_fail(true);

    let now = booking.check_in - Duration::days(6);
    let outcome = h
        .service
        .cancel_booking(booking.id, CancelActor::Guest, now)
        .await
        .unwrap();

    assert_eq!(outcome.booking.status, BookingStatus::Cancelled);
    assert!(outcome
        .side_effect_failures
        .iter()
        .any(|f| matches!(f, SideEffectError::WalletUpdate { .. })));

    // The booking keeps its refund record even though the credit failed
    assert!(outcome.booking.refund.is_some());
}

#[tokio::test]
async fn test_racing_transitions_commit_exactly_once() {
    let h = harness();
    let booking = h
        .service
        .create_booking(request(PaymentMethod::ExternalPayment))
        .await
        .unwrap();
    let now = Utc::now();

    let (confirmed, rejected) = tokio::join!(
        h.service
            .confirm_booking(booking.id, ConfirmationKind::Manual, now),
        h.service.reject_booking(booking.id, None, now),
    );

    // Whichever ordering the scheduler picked, exactly one transition won
    // and the loser saw an invalid-transition conflict
    assert!(confirmed.is_ok() != rejected.is_ok());
    let loser = if confirmed.is_ok() {
        rejected.unwrap_err()
    } else {
        confirmed.unwrap_err()
    };
    assert!(matches!(
        loser,
        DomainError::Booking(BookingError::InvalidTransition { .. })
    ));

    let stored = h.bookings.find_by_id(booking.id).await.unwrap().unwrap();
    assert!(stored.status == BookingStatus::Confirmed || stored.status == BookingStatus::Rejected);
}
