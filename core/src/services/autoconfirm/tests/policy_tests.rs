//! Tests for the pure auto-confirm eligibility check

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::booking::{
    Booking, ConfirmationKind, PaymentMethod, AUTO_CONFIRM_DELAY_HOURS,
};
use crate::services::autoconfirm::{check_eligibility, IneligibilityReason};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
}

fn pending_booking_created_at(created_at: Option<DateTime<Utc>>) -> Booking {
    let mut booking = Booking::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        now() + Duration::days(30),
        None,
        Decimal::new(1_000, 0),
        Decimal::new(100, 0),
        PaymentMethod::ExternalPayment,
        None,
    );
    booking.created_at = created_at;
    booking
}

#[test]
fn test_pending_booking_past_delay_is_eligible() {
    let booking = pending_booking_created_at(Some(now() - Duration::hours(25)));

    let eligibility = check_eligibility(&booking, now(), AUTO_CONFIRM_DELAY_HOURS);

    assert!(eligibility.eligible);
    assert!(eligibility.reason.is_none());
    assert_eq!(eligibility.remaining_hours, 0);
    assert_eq!(
        eligibility.eligible_at,
        Some(now() - Duration::hours(25) + Duration::hours(24))
    );
}

#[test]
fn test_pending_booking_within_delay_is_not_yet_eligible() {
    let booking = pending_booking_created_at(Some(now() - Duration::hours(23)));

    let eligibility = check_eligibility(&booking, now(), AUTO_CONFIRM_DELAY_HOURS);

    assert!(!eligibility.eligible);
    assert!(eligibility.reason.is_none());
    assert_eq!(eligibility.remaining_hours, 1);
    assert_eq!(eligibility.eligible_at, Some(now() + Duration::hours(1)));
}

#[test]
fn test_exactly_at_delay_boundary_is_eligible() {
    let booking = pending_booking_created_at(Some(now() - Duration::hours(24)));

    let eligibility = check_eligibility(&booking, now(), AUTO_CONFIRM_DELAY_HOURS);

    assert!(eligibility.eligible);
    assert_eq!(eligibility.remaining_hours, 0);
}

#[test]
fn test_remaining_hours_round_up() {
    // 30 minutes short of the window
    let booking = pending_booking_created_at(Some(now() - Duration::hours(23) - Duration::minutes(30)));
    let eligibility = check_eligibility(&booking, now(), AUTO_CONFIRM_DELAY_HOURS);
    assert_eq!(eligibility.remaining_hours, 1);

    // 90 minutes short of the window
    let booking = pending_booking_created_at(Some(now() - Duration::hours(22) - Duration::minutes(30)));
    let eligibility = check_eligibility(&booking, now(), AUTO_CONFIRM_DELAY_HOURS);
    assert_eq!(eligibility.remaining_hours, 2);
}

#[test]
fn test_non_pending_booking_is_ineligible() {
    let mut booking = pending_booking_created_at(Some(now() - Duration::hours(48)));
    booking.confirm(ConfirmationKind::Manual, now() - Duration::hours(1));

    let eligibility = check_eligibility(&booking, now(), AUTO_CONFIRM_DELAY_HOURS);

    assert!(!eligibility.eligible);
    assert_eq!(eligibility.reason, Some(IneligibilityReason::NotPending));
    assert_eq!(eligibility.remaining_hours, 0);
    assert!(eligibility.eligible_at.is_none());
}

#[test]
fn test_missing_created_at_is_ineligible() {
    let booking = pending_booking_created_at(None);

    let eligibility = check_eligibility(&booking, now(), AUTO_CONFIRM_DELAY_HOURS);

    assert!(!eligibility.eligible);
    assert_eq!(
        eligibility.reason,
        Some(IneligibilityReason::MissingCreatedAt)
    );
    assert!(eligibility.eligible_at.is_none());
}

#[test]
fn test_custom_delay_is_honored() {
    let booking = pending_booking_created_at(Some(now() - Duration::hours(25)));

    let eligibility = check_eligibility(&booking, now(), 48);

    assert!(!eligibility.eligible);
    assert_eq!(eligibility.remaining_hours, 23);
}

#[test]
fn test_eligibility_is_monotonic_in_time() {
    let booking = pending_booking_created_at(Some(now()));

    let mut was_eligible = false;
    for hour in 0..72 {
        let at = now() + Duration::hours(hour);
        let eligibility = check_eligibility(&booking, at, AUTO_CONFIRM_DELAY_HOURS);
        if was_eligible {
            assert!(
                eligibility.eligible,
                "eligibility regressed at hour {}",
                hour
            );
        }
        was_eligible = eligibility.eligible;
    }
    assert!(was_eligible);
}

#[test]
fn test_reason_strings_match_display_wording() {
    assert_eq!(IneligibilityReason::NotPending.as_str(), "not pending");
    assert_eq!(
        IneligibilityReason::MissingCreatedAt.as_str(),
        "invalid creation date"
    );
}
