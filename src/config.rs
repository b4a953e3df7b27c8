// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pipeline and ticker configuration

use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::time::Duration;

use crate::errors::{SearchError, SearchResult};
use crate::frp::Time;

/// Environment variable overriding the quiet period (milliseconds)
pub const ENV_QUIET_MS: &str = "LIVE_SEARCH_QUIET_MS";

/// Environment variable overriding the keystroke log capacity
pub const ENV_LOG_CAPACITY: &str = "LIVE_SEARCH_LOG_CAPACITY";

/// Environment variable overriding the ticker period (milliseconds)
pub const ENV_TICK_MS: &str = "LIVE_SEARCH_TICK_MS";

/// Configuration for a debounced search pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Input silence required before a pending term settles
    pub quiet_period: Duration,

    /// Maximum number of raw keystrokes kept for display
    pub keystroke_log_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(300),
            keystroke_log_capacity: 8,
        }
    }
}

impl SearchConfig {
    /// Set the quiet period
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Set the keystroke log capacity
    pub fn with_keystroke_log_capacity(mut self, capacity: usize) -> Self {
        self.keystroke_log_capacity = capacity;
        self
    }

    /// Quiet period on the pipeline clock
    pub fn quiet_ms(&self) -> Time {
        Time::try_from(self.quiet_period.as_millis()).unwrap_or(Time::MAX)
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> SearchResult<Self> {
        Self::from_vars(|key| std::env::var(key))
    }

    /// Load configuration through `lookup`, which resolves variable names
    pub fn from_vars<F>(lookup: F) -> SearchResult<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let mut config = Self::default();

        if let Some(ms) = var_u64(&lookup, ENV_QUIET_MS)? {
            config.quiet_period = Duration::from_millis(ms);
        }
        if let Some(capacity) = var_u64(&lookup, ENV_LOG_CAPACITY)? {
            config.keystroke_log_capacity = usize::try_from(capacity).map_err(|_| {
                SearchError::Configuration(format!("{ENV_LOG_CAPACITY} out of range: {capacity}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> SearchResult<()> {
        if self.quiet_period.is_zero() {
            return Err(SearchError::Configuration(
                "quiet period must be non-zero".to_string(),
            ));
        }
        if self.keystroke_log_capacity == 0 {
            return Err(SearchError::Configuration(
                "keystroke log capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the interval ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Time between ticks
    pub period: Duration,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

impl TickerConfig {
    /// Create a ticker configuration with the given period
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> SearchResult<Self> {
        Self::from_vars(|key| std::env::var(key))
    }

    /// Load configuration through `lookup`, which resolves variable names
    pub fn from_vars<F>(lookup: F) -> SearchResult<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let mut config = Self::default();
        if let Some(ms) = var_u64(&lookup, ENV_TICK_MS)? {
            config.period = Duration::from_millis(ms);
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject a zero period (tokio intervals panic on it)
    pub fn validate(&self) -> SearchResult<()> {
        if self.period.is_zero() {
            return Err(SearchError::Configuration(
                "ticker period must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn var_u64<F>(lookup: &F, key: &str) -> SearchResult<Option<u64>>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| SearchError::Configuration(format!("{key}={raw:?}: {e}"))),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(SearchError::Configuration(format!("{key}: {e}"))),
    }
}
