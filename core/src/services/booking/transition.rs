//! Pure transition planning for the booking state machine
//!
//! Planning validates the requested status change against the transition
//! table, applies the field updates to a copy of the booking, and lists the
//! side effects the change owes the outside world. Nothing here performs
//! I/O; the service executes the returned plan.

use chrono::{DateTime, Utc};
use serde_json::json;

use sn_shared::config::RefundPolicyConfig;

use crate::domain::entities::booking::{Booking, ConfirmationKind, PaymentMethod};
use crate::domain::entities::payout::PayoutStatus;
use crate::errors::{BookingError, DomainError};
use crate::services::notification::NotificationTemplate;
use crate::services::refund::calculate_refund;

use super::types::{BookingTransition, SideEffect, TransitionPlan};

/// Plan a status transition for a booking
///
/// Validates the from/to pair against the transition table before anything
/// else; an illegal pair (including any move out of a terminal status)
/// fails with `InvalidTransition` and plans no side effects. For
/// cancellations the refund is computed here so the plan carries the full
/// breakdown the notification and wallet effects need.
///
/// # Arguments
///
/// * `booking` - Current persisted state of the booking
/// * `transition` - The requested change and its trigger-specific inputs
/// * `now` - Instant the transition takes effect; also the cancellation
///   date for refund purposes
/// * `policy_config` - Refund tier thresholds and admin deduction rate
///
/// # Returns
///
/// A `TransitionPlan` holding the mutated booking copy and the ordered
/// side effects, or `InvalidTransition` when the table forbids the move
pub fn plan_transition(
    booking: &Booking,
    transition: &BookingTransition,
    now: DateTime<Utc>,
    policy_config: &RefundPolicyConfig,
) -> Result<TransitionPlan, DomainError> {
    let from = booking.status;
    let to = transition.target_status();

    if !from.can_transition_to(to) {
        return Err(BookingError::InvalidTransition {
            booking_id: booking.id,
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        }
        .into());
    }

    let mut updated = booking.clone();
    let mut effects = Vec::new();
    let mut refund = None;

    match transition {
        BookingTransition::Confirm { kind } => {
            updated.confirm(*kind, now);

            let template = match kind {
                ConfirmationKind::Manual => NotificationTemplate::BookingConfirmed,
                ConfirmationKind::Auto => NotificationTemplate::BookingAutoConfirmed,
            };
            effects.push(SideEffect::Notify {
                recipient: booking.guest_id,
                template,
                details: json!({
                    "booking_id": booking.id,
                    "listing_id": booking.listing_id,
                    "check_in": booking.check_in,
                    "auto_confirmed": *kind == ConfirmationKind::Auto,
                }),
            });
            effects.push(SideEffect::UpdatePayout {
                status: PayoutStatus::OnHold,
            });
        }
        BookingTransition::Reject { reason } => {
            updated.reject(reason.clone(), now);

            effects.push(SideEffect::Notify {
                recipient: booking.guest_id,
                template: NotificationTemplate::BookingRejected,
                details: json!({
                    "booking_id": booking.id,
                    "listing_id": booking.listing_id,
                    "reason": reason,
                }),
            });
        }
        BookingTransition::Cancel { initiated_by } => {
            let breakdown = calculate_refund(booking, now, policy_config);
            updated.cancel(*initiated_by, breakdown.to_record(), now);

            effects.push(SideEffect::Notify {
                recipient: booking.guest_id,
                template: NotificationTemplate::BookingCancelled,
                details: json!({
                    "booking_id": booking.id,
                    "listing_id": booking.listing_id,
                    "cancelled_by": initiated_by.as_str(),
                    "refund_amount": breakdown.final_refund_amount,
                    "admin_deduction": breakdown.admin_deduction,
                    "cancellation_fee": breakdown.cancellation_fee,
                    "policy_description": breakdown.policy_description,
                }),
            });
            effects.push(SideEffect::UpdatePayout {
                status: PayoutStatus::Refunded,
            });

            // Refunds only flow back onto the platform wallet; external
            // payments are reversed by the payment provider
            if booking.payment_method == PaymentMethod::Wallet
                && breakdown.final_refund_amount > rust_decimal::Decimal::ZERO
            {
                effects.push(SideEffect::CreditWallet {
                    user_id: booking.guest_id,
                    amount: breakdown.final_refund_amount,
                    description: format!("Refund for booking {}", booking.id),
                });
            }

            refund = Some(breakdown);
        }
        BookingTransition::Complete => {
            updated.complete(now);

            effects.push(SideEffect::Notify {
                recipient: booking.guest_id,
                template: NotificationTemplate::BookingCompletedGuest,
                details: json!({
                    "booking_id": booking.id,
                    "listing_id": booking.listing_id,
                }),
            });
            effects.push(SideEffect::Notify {
                recipient: booking.host_id,
                template: NotificationTemplate::BookingCompletedHost,
                details: json!({
                    "booking_id": booking.id,
                    "listing_id": booking.listing_id,
                }),
            });
        }
    }

    Ok(TransitionPlan {
        from,
        to,
        booking: updated,
        refund,
        effects,
    })
}
