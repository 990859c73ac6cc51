//! Configuration types
//!
//! Every section has defaults, so a missing file, an empty file, or a file
//! that sets a single field all produce a usable configuration.

use crate::loader::ConfigError;
use serde::{Deserialize, Serialize};

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    /// Reconciliation policies
    pub render: RenderConfig,
    /// Log output
    pub logging: LoggingConfig,
    /// Demo driver timings
    pub demo: DemoConfig,
}

/// How children of a live node are matched against normalized children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Match strictly by index and tag
    Positional,
    /// Match keyed children by identity hint, unkeyed children by index and tag
    #[default]
    Keyed,
}

/// Reconciliation policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Child matching strategy
    pub strategy: MatchStrategy,
    /// Remove live properties that the new description no longer sets
    pub clear_stale_props: bool,
    /// Maximum number of component expansions on any root-to-leaf path
    pub max_component_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::Keyed,
            clear_stale_props: true,
            max_component_depth: 256,
        }
    }
}

impl RenderConfig {
    /// The literal index-and-tag policy with no stale property removal.
    pub fn positional() -> Self {
        Self {
            strategy: MatchStrategy::Positional,
            clear_stale_props: false,
            ..Self::default()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Demo driver timings and price range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Clock tick period
    pub clock_interval_ms: u64,
    /// Simulated latency of the lot listing fetch
    pub fetch_delay_ms: u64,
    /// Period of each lot's price feed
    pub price_interval_ms: u64,
    pub price_min: u32,
    pub price_max: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            clock_interval_ms: 1000,
            fetch_delay_ms: 2000,
            price_interval_ms: 400,
            price_min: 30,
            price_max: 40,
        }
    }
}

impl TrellisConfig {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.max_component_depth == 0 {
            return Err(ConfigError::invalid(
                "render.max_component_depth must be at least 1",
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::invalid(format!(
                "logging.level `{}` is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        let demo = &self.demo;
        if demo.clock_interval_ms == 0 || demo.price_interval_ms == 0 {
            return Err(ConfigError::invalid("demo intervals must be non-zero"));
        }
        if demo.price_min > demo.price_max {
            return Err(ConfigError::invalid(format!(
                "demo.price_min ({}) exceeds demo.price_max ({})",
                demo.price_min, demo.price_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TrellisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.render.strategy, MatchStrategy::Keyed);
        assert!(config.render.clear_stale_props);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let mut config = TrellisConfig::default();
        config.render.max_component_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_price_range_is_rejected() {
        let mut config = TrellisConfig::default();
        config.demo.price_min = 50;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("price_min"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut config = TrellisConfig::default();
        config.logging.level = "loud".into();
        assert!(config.validate().is_err());
        config.logging.level = "DEBUG".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn positional_preset_disables_stale_clearing() {
        let render = RenderConfig::positional();
        assert_eq!(render.strategy, MatchStrategy::Positional);
        assert!(!render.clear_stale_props);
        assert_eq!(render.max_component_depth, 256);
    }
}
