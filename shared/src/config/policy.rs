//! Refund policy configuration
//!
//! The booking core treats refund policy as data supplied by the operator,
//! not as code: the admin deduction rate and the per-tier day thresholds
//! live here so they can be retuned without redeploying the core. Defaults
//! match the marketplace's launch policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;

/// Day thresholds for a single cancellation-policy tier.
///
/// Steps are evaluated most-generous first: the first step whose minimum
/// notice (in full days before check-in) is met decides the refund
/// percentage. When no step matches, `floor_percentage` applies — this is
/// also the branch taken when the cancellation lands on or after the
/// check-in date.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TierThresholds {
    /// (minimum days of notice, refund percentage in [0, 1]) pairs,
    /// ordered from the most to the least generous step.
    pub steps: Vec<(i64, Decimal)>,

    /// Refund percentage when no step matches.
    pub floor_percentage: Decimal,
}

impl TierThresholds {
    /// Create tier thresholds from steps and a floor percentage
    pub fn new(steps: Vec<(i64, Decimal)>, floor_percentage: Decimal) -> Self {
        Self {
            steps,
            floor_percentage,
        }
    }

    /// Resolve the refund percentage for a number of days of notice.
    ///
    /// Days at or below zero always fall through to the floor.
    pub fn percentage_for(&self, days_until_check_in: i64) -> Decimal {
        for (min_days, percentage) in &self.steps {
            if days_until_check_in >= *min_days {
                return *percentage;
            }
        }
        self.floor_percentage
    }
}

/// Refund policy configuration supplied to the refund calculator.
///
/// The three tiers mirror the cancellation policies a host can pick for a
/// listing; `admin_deduction_rate` is the platform's cut of the refundable
/// portion.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RefundPolicyConfig {
    /// Platform deduction applied to the refundable portion, in [0, 1]
    #[serde(default = "default_admin_deduction_rate")]
    pub admin_deduction_rate: Decimal,

    /// Thresholds for the flexible tier
    #[serde(default = "default_flexible_tier")]
    pub flexible: TierThresholds,

    /// Thresholds for the moderate tier (the default tier)
    #[serde(default = "default_moderate_tier")]
    pub moderate: TierThresholds,

    /// Thresholds for the strict tier
    #[serde(default = "default_strict_tier")]
    pub strict: TierThresholds,
}

impl Default for RefundPolicyConfig {
    fn default() -> Self {
        Self {
            admin_deduction_rate: default_admin_deduction_rate(),
            flexible: default_flexible_tier(),
            moderate: default_moderate_tier(),
            strict: default_strict_tier(),
        }
    }
}

impl RefundPolicyConfig {
    /// Create from environment variables
    ///
    /// Only the admin deduction rate is exposed as an environment override
    /// (`STAYNEST_ADMIN_DEDUCTION_RATE`, e.g. "0.10"); tier thresholds are
    /// retuned through the serialized policy document.
    pub fn from_env() -> Self {
        let admin_deduction_rate = env::var("STAYNEST_ADMIN_DEDUCTION_RATE")
            .ok()
            .and_then(|v| v.parse::<Decimal>().ok())
            .filter(|rate| *rate >= Decimal::ZERO && *rate <= Decimal::ONE)
            .unwrap_or_else(default_admin_deduction_rate);

        Self {
            admin_deduction_rate,
            ..Self::default()
        }
    }
}

/// Default platform cut of the refundable portion: 10%
fn default_admin_deduction_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Flexible: full refund with at least 1 day of notice, half refund after
fn default_flexible_tier() -> TierThresholds {
    TierThresholds::new(vec![(1, Decimal::ONE)], Decimal::new(50, 2))
}

/// Moderate: full refund at 5+ days, half at 1+ day, nothing after
fn default_moderate_tier() -> TierThresholds {
    TierThresholds::new(
        vec![(5, Decimal::ONE), (1, Decimal::new(50, 2))],
        Decimal::ZERO,
    )
}

/// Strict: half refund at 14+ days, quarter at 7+ days, nothing after
fn default_strict_tier() -> TierThresholds {
    TierThresholds::new(
        vec![(14, Decimal::new(50, 2)), (7, Decimal::new(25, 2))],
        Decimal::ZERO,
    )
}
