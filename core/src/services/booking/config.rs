//! Configuration for the booking completion sweep

/// Configuration for the completion sweep
#[derive(Debug, Clone)]
pub struct CompletionSweepConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether the background sweep is enabled
    pub enabled: bool,
}

impl Default for CompletionSweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}
