//! Configuration Module
//!
//! Handles loading and managing store configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default interval between background GC passes, in seconds
pub const DEFAULT_GC_INTERVAL_SECS: u64 = 60;

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Interval between background GC passes; zero means the sweep never runs
    pub gc_interval: Duration,
    /// Initial state of the disable switch
    pub disabled: bool,
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new StoreConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHESTORE_GC_INTERVAL_SECS` - GC sweep interval in seconds, 0 disables it (default: 60)
    /// - `CACHESTORE_DISABLED` - Start with caching disabled: `1`, `true` or `yes` (default: false)
    pub fn from_env() -> Self {
        let gc_interval_secs = env::var("CACHESTORE_GC_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_GC_INTERVAL_SECS);

        let disabled = env::var("CACHESTORE_DISABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            gc_interval: Duration::from_secs(gc_interval_secs),
            disabled,
        }
    }

    /// Sets the GC sweep interval.
    pub fn with_gc_interval(mut self, interval: Duration) -> Self {
        self.gc_interval = interval;
        self
    }

    /// Sets the initial state of the disable switch.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            gc_interval: Duration::from_secs(DEFAULT_GC_INTERVAL_SECS),
            disabled: false,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
