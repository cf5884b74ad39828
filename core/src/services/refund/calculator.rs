//! Refund calculation for booking cancellations
//!
//! The calculator is a pure function over a booking snapshot, a cancellation
//! instant, and the operator-supplied policy configuration. It performs no
//! I/O and never touches payout or wallet state; the state machine calls it
//! as a subroutine when planning a cancellation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use sn_shared::config::RefundPolicyConfig;

use crate::domain::entities::booking::{Booking, CancellationPolicy};
use crate::domain::value_objects::refund::RefundBreakdown;

/// Seconds in a calendar day, for notice-period rounding
const SECONDS_PER_DAY: i64 = 86_400;

/// Compute the refund owed for cancelling `booking` at `cancellation_date`
///
/// Notice is measured in calendar days rounded up: 24 hours and one minute
/// before check-in counts as two days, while cancelling at or after check-in
/// yields zero or negative days and takes the tier's least generous branch.
/// A booking with an unset or unrecognized policy tier is treated as
/// `Moderate`.
///
/// The computation, in order:
/// 1. `refund_before_deduction = total_amount * refund_percentage`
/// 2. `admin_deduction = refund_before_deduction * admin_deduction_rate`
/// 3. `final_refund_amount = refund_before_deduction - admin_deduction`
/// 4. `cancellation_fee = total_amount - refund_before_deduction`
///
/// A zero total amount yields an all-zero breakdown. The result is fully
/// determined by the arguments.
pub fn calculate_refund(
    booking: &Booking,
    cancellation_date: DateTime<Utc>,
    policy_config: &RefundPolicyConfig,
) -> RefundBreakdown {
    let seconds_until_check_in = (booking.check_in - cancellation_date).num_seconds();
    // Ceiling division (`i64::div_ceil` is not yet stable)
    let days_until_check_in = seconds_until_check_in / SECONDS_PER_DAY
        + (seconds_until_check_in % SECONDS_PER_DAY > 0) as i64;

    let policy = booking.policy_or_default();
    let thresholds = match policy {
        CancellationPolicy::Flexible => &policy_config.flexible,
        CancellationPolicy::Moderate => &policy_config.moderate,
        CancellationPolicy::Strict => &policy_config.strict,
    };
    let refund_percentage = thresholds.percentage_for(days_until_check_in);

    let refund_before_deduction = booking.total_amount * refund_percentage;
    let admin_deduction = refund_before_deduction * policy_config.admin_deduction_rate;
    let final_refund_amount = refund_before_deduction - admin_deduction;
    let cancellation_fee = booking.total_amount - refund_before_deduction;

    let policy_description = policy_description(policy, days_until_check_in, refund_percentage);

    RefundBreakdown {
        policy,
        days_until_check_in,
        refund_percentage,
        refund_before_deduction,
        admin_deduction,
        final_refund_amount,
        cancellation_fee,
        policy_description,
    }
}

/// Guest-facing summary of which threshold applied, derived only from the
/// tier, the notice given, and the resolved percentage
fn policy_description(
    policy: CancellationPolicy,
    days_until_check_in: i64,
    refund_percentage: Decimal,
) -> String {
    let tier_name = match policy {
        CancellationPolicy::Flexible => "Flexible",
        CancellationPolicy::Moderate => "Moderate",
        CancellationPolicy::Strict => "Strict",
    };
    let percent = (refund_percentage * Decimal::ONE_HUNDRED).normalize();

    format!(
        "{} policy: {}% refund ({} days before check-in)",
        tier_name,
        percent,
        days_until_check_in.max(0)
    )
}
