//! Configuration for the auto-confirm policy and sweep

use crate::domain::entities::booking::AUTO_CONFIRM_DELAY_HOURS;

/// Configuration for auto-confirmation
#[derive(Debug, Clone)]
pub struct AutoConfirmConfig {
    /// Hours of host inaction before a pending booking is confirmed
    pub delay_hours: i64,
    /// How often to run the sweep (in seconds)
    pub sweep_interval_seconds: u64,
    /// Whether the background sweep is enabled
    pub enabled: bool,
}

impl Default for AutoConfirmConfig {
    fn default() -> Self {
        Self {
            delay_hours: AUTO_CONFIRM_DELAY_HOURS,
            sweep_interval_seconds: 900, // Run every 15 minutes
            enabled: true,
        }
    }
}
