//! Tests for the auto-confirm sweep

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use sn_shared::config::RefundPolicyConfig;

use crate::domain::entities::booking::{Booking, BookingStatus, PaymentMethod};
use crate::domain::entities::payout::{Payout, PayoutStatus};
use crate::repositories::{
    BookingRepository, MockBookingRepository, MockPayoutRepository, MockWalletRepository,
    PayoutRepository,
};
use crate::services::autoconfirm::{AutoConfirmConfig, AutoConfirmSweep};
use crate::services::booking::BookingService;
use crate::services::notification::{MockNotificationDispatcher, NotificationTemplate};

struct SweepHarness {
    sweep: AutoConfirmSweep<
        MockBookingRepository,
        MockPayoutRepository,
        MockWalletRepository,
        MockNotificationDispatcher,
    >,
    bookings: Arc<MockBookingRepository>,
    payouts: Arc<MockPayoutRepository>,
    dispatcher: Arc<MockNotificationDispatcher>,
}

fn harness(config: AutoConfirmConfig) -> SweepHarness {
    let bookings = Arc::new(MockBookingRepository::new());
    let payouts = Arc::new(MockPayoutRepository::new());
    let dispatcher = Arc::new(MockNotificationDispatcher::new());

    let service = Arc::new(BookingService::new(
        Arc::clone(&bookings),
        Arc::clone(&payouts),
        Arc::new(MockWalletRepository::new()),
        Arc::clone(&dispatcher),
        RefundPolicyConfig::default(),
    ));
    let sweep = AutoConfirmSweep::new(service, Arc::clone(&bookings), config);

    SweepHarness {
        sweep,
        bookings,
        payouts,
        dispatcher,
    }
}

fn pending_booking_aged_hours(hours: i64) -> Booking {
    let mut booking = Booking::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        Utc::now() + Duration::days(30),
        None,
        Decimal::new(1_000, 0),
        Decimal::new(100, 0),
        PaymentMethod::ExternalPayment,
        None,
    );
    booking.created_at = Some(Utc::now() - Duration::hours(hours));
    booking
}

async fn seed(h: &SweepHarness, booking: &Booking) {
    h.bookings.insert(booking.clone()).await;
    h.payouts
        .create(Payout::new(booking.id, booking.host_id, booking.total_amount))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sweep_confirms_only_eligible_bookings() {
    let h = harness(AutoConfirmConfig::default());
    let now = Utc::now();

    let overdue = pending_booking_aged_hours(25);
    let fresh = pending_booking_aged_hours(2);
    let mut undated = pending_booking_aged_hours(48);
    undated.created_at = None;

    seed(&h, &overdue).await;
    seed(&h, &fresh).await;
    seed(&h, &undated).await;

    let result = h.sweep.run_sweep(now).await.unwrap();

    assert_eq!(result.checked, 3);
    assert_eq!(result.confirmed, 1);
    assert!(result.is_success());

    let confirmed = h.bookings.find_by_id(overdue.id).await.unwrap().unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert!(confirmed.auto_confirmed);

    let untouched = h.bookings.find_by_id(fresh.id).await.unwrap().unwrap();
    assert_eq!(untouched.status, BookingStatus::Pending);

    // The confirmation ran with the auto template and held the payout
    let sent = h.dispatcher.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].template, NotificationTemplate::BookingAutoConfirmed);
    assert_eq!(sent[0].recipient, overdue.guest_id);

    let payout = h
        .payouts
        .find_by_booking_id(overdue.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payout.status, PayoutStatus::OnHold);
}

#[tokio::test]
async fn test_sweep_with_longer_delay_leaves_younger_bookings_pending() {
    let h = harness(AutoConfirmConfig {
        delay_hours: 48,
        sweep_interval_seconds: 900,
        enabled: true,
    });

    let booking = pending_booking_aged_hours(25);
    seed(&h, &booking).await;

    let result = h.sweep.run_sweep(Utc::now()).await.unwrap();

    assert_eq!(result.checked, 1);
    assert_eq!(result.confirmed, 0);
    let stored = h.bookings.find_by_id(booking.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_disabled_sweep_does_nothing() {
    let h = harness(AutoConfirmConfig {
        delay_hours: 24,
        sweep_interval_seconds: 900,
        enabled: false,
    });
    seed(&h, &pending_booking_aged_hours(25)).await;

    let result = h.sweep.run_sweep(Utc::now()).await.unwrap();

    assert_eq!(result.checked, 0);
    assert_eq!(result.confirmed, 0);
    assert_eq!(h.dispatcher.sent_count().await, 0);
}

#[tokio::test]
async fn test_failure_on_one_booking_does_not_abort_the_sweep() {
    // The sweep lists pending bookings from one store while the service
    // reads another, so every confirmation attempt fails. All eligible
    // bookings must still be attempted and every error collected.
    let listing_repo = Arc::new(MockBookingRepository::new());
    let dispatcher = Arc::new(MockNotificationDispatcher::new());

    for _ in 0..3 {
        listing_repo.insert(pending_booking_aged_hours(30)).await;
    }

    let service = Arc::new(BookingService::new(
        Arc::new(MockBookingRepository::new()),
        Arc::new(MockPayoutRepository::new()),
        Arc::new(MockWalletRepository::new()),
        dispatcher,
        RefundPolicyConfig::default(),
    ));
    let sweep = AutoConfirmSweep::new(
        service,
        Arc::clone(&listing_repo),
        AutoConfirmConfig::default(),
    );

    let result = sweep.run_sweep(Utc::now()).await.unwrap();

    assert_eq!(result.checked, 3);
    assert_eq!(result.confirmed, 0);
    assert_eq!(result.errors.len(), 3);
    assert!(!result.is_success());
}

#[tokio::test]
async fn test_sweep_is_idempotent_across_runs() {
    let h = harness(AutoConfirmConfig::default());
    let booking = pending_booking_aged_hours(25);
    seed(&h, &booking).await;

    let first = h.sweep.run_sweep(Utc::now()).await.unwrap();
    assert_eq!(first.confirmed, 1);

    // A second run finds no pending bookings left to confirm
    let second = h.sweep.run_sweep(Utc::now()).await.unwrap();
    assert_eq!(second.checked, 0);
    assert_eq!(second.confirmed, 0);
    assert_eq!(h.dispatcher.sent_count().await, 1);
}

#[tokio::test]
async fn test_store_read_failure_propagates() {
    let h = harness(AutoConfirmConfig::default());
    h.bookings.set_should_fail(true);

    let result = h.sweep.run_sweep(Utc::now()).await;
    assert!(result.is_err());
}
