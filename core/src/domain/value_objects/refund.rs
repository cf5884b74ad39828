//! Refund breakdown value object produced by the refund calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::booking::{CancellationPolicy, RefundRecord};

/// Full refund computation for a cancellation
///
/// Carries every intermediate figure so receipts and notifications can show
/// how the final amount was derived:
/// - `refund_before_deduction = total_amount * refund_percentage`
/// - `admin_deduction = refund_before_deduction * admin_deduction_rate`
/// - `final_refund_amount = refund_before_deduction - admin_deduction`
/// - `cancellation_fee = total_amount - refund_before_deduction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundBreakdown {
    /// Policy tier that was applied (after defaulting)
    pub policy: CancellationPolicy,

    /// Calendar days of notice given, fractional days rounded up
    pub days_until_check_in: i64,

    /// Refundable fraction of the total, in [0, 1]
    pub refund_percentage: Decimal,

    /// Refundable portion before the platform deduction
    pub refund_before_deduction: Decimal,

    /// Platform's cut taken from the refundable portion
    pub admin_deduction: Decimal,

    /// Amount paid back to the guest
    pub final_refund_amount: Decimal,

    /// Portion of the total the guest forfeits under the tier
    pub cancellation_fee: Decimal,

    /// Human-readable summary of the applied threshold
    pub policy_description: String,
}

impl RefundBreakdown {
    /// Converts the breakdown into the refund record stored on the booking
    pub fn to_record(&self) -> RefundRecord {
        RefundRecord {
            refund_amount: self.final_refund_amount,
            admin_deduction: self.admin_deduction,
            cancellation_fee: self.cancellation_fee,
            policy_description: self.policy_description.clone(),
        }
    }
}
