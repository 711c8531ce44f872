//! Robot configuration
//!
//! Default budgets and polling behaviour, loadable from YAML so a CI
//! environment can stretch timeouts without touching test code:
//!
//! ```yaml
//! standard_timeout: 2.0
//! scroll_timeout: 8.0
//! poll_interval_ms: 25
//! swipe_velocity: 1500.0
//! ```

use crate::poll::DEFAULT_POLL_INTERVAL_MS;
use crate::timeout::{GestureVelocity, Timeout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading a [`RobotConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read robot config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// YAML did not match the schema
    #[error("Failed to parse robot config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A value was out of range
    #[error("Invalid robot config: {message}")]
    Invalid {
        /// What was wrong
        message: String,
    },
}

/// Tunables shared by every operation of a robot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RobotConfig {
    /// Budget for waits and taps without an explicit timeout
    pub standard_timeout: Timeout,
    /// Budget for swipe-until-condition loops without an explicit timeout
    pub scroll_timeout: Timeout,
    /// Pause between polls in milliseconds
    pub poll_interval_ms: u64,
    /// Swipe speed without an explicit velocity
    pub swipe_velocity: GestureVelocity,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            standard_timeout: Timeout::STANDARD,
            scroll_timeout: Timeout::SCROLL,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            swipe_velocity: GestureVelocity::DEFAULT,
        }
    }
}

impl RobotConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the standard timeout
    #[must_use]
    pub const fn with_standard_timeout(mut self, timeout: Timeout) -> Self {
        self.standard_timeout = timeout;
        self
    }

    /// Set the scroll timeout
    #[must_use]
    pub const fn with_scroll_timeout(mut self, timeout: Timeout) -> Self {
        self.scroll_timeout = timeout;
        self
    }

    /// Set the poll interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the default swipe velocity
    #[must_use]
    pub const fn with_swipe_velocity(mut self, velocity: GestureVelocity) -> Self {
        self.swipe_velocity = velocity;
        self
    }

    /// Poll interval as a `Duration`
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                message: "poll_interval_ms must be at least 1".to_string(),
            });
        }
        if self.poll_interval() > self.standard_timeout.as_duration() && self.standard_timeout > Timeout::ZERO {
            return Err(ConfigError::Invalid {
                message: format!(
                    "poll_interval_ms ({}) exceeds standard_timeout ({}s)",
                    self.poll_interval_ms, self.standard_timeout
                ),
            });
        }
        Ok(())
    }

    /// Parse and validate YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
