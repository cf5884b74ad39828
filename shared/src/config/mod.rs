//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `environment` - Environment detection and logging configuration
//! - `policy` - Refund policy tuning (admin deduction rate, tier thresholds)

pub mod environment;
pub mod policy;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use policy::{RefundPolicyConfig, TierThresholds};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Refund policy configuration
    #[serde(default)]
    pub refund_policy: RefundPolicyConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            logging: LoggingConfig::for_environment(env),
            refund_policy: RefundPolicyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            logging: LoggingConfig::for_environment(Environment::Development),
            refund_policy: RefundPolicyConfig::default(),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            logging: LoggingConfig::for_environment(Environment::Production),
            refund_policy: RefundPolicyConfig::from_env(),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            logging: LoggingConfig::for_environment(env),
            refund_policy: RefundPolicyConfig::from_env(),
        }
    }
}
