//! Timeouts, velocities and the small enums that parameterise interactions.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A non-negative wait budget measured in seconds.
///
/// Rendered in error descriptions as the shortest decimal that round-trips,
/// always with a fractional part (`1.0`, `5.0`, `0.25`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Timeout(f64);

impl Timeout {
    /// No waiting at all; the condition is still checked once
    pub const ZERO: Self = Self(0.0);

    /// Budget used by waits and taps when the caller does not pick one
    pub const STANDARD: Self = Self(1.0);

    /// Budget used by swipe-until-condition loops
    pub const SCROLL: Self = Self(5.0);

    /// Create a timeout from seconds. Negative and NaN inputs clamp to zero.
    #[must_use]
    pub fn from_secs(secs: f64) -> Self {
        if secs.is_nan() || secs <= 0.0 {
            Self::ZERO
        } else {
            Self(secs)
        }
    }

    /// Create a timeout from milliseconds
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self::from_secs(ms as f64 / 1000.0)
    }

    /// Seconds as a float
    #[must_use]
    pub const fn as_secs_f64(self) -> f64 {
        self.0
    }

    /// Convert to a `Duration`, saturating for budgets too large to represent
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::try_from_secs_f64(self.0).unwrap_or(Duration::MAX)
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl From<f64> for Timeout {
    fn from(secs: f64) -> Self {
        Self::from_secs(secs)
    }
}

impl From<Timeout> for f64 {
    fn from(timeout: Timeout) -> Self {
        timeout.0
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        Self::from_secs(duration.as_secs_f64())
    }
}

impl std::fmt::Display for Timeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Debug formatting of f64 keeps the trailing ".0" for whole seconds.
        write!(f, "{:?}", self.0)
    }
}

/// Speed of a swipe gesture in points per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct GestureVelocity(f64);

impl GestureVelocity {
    /// Slow, deliberate scrolling
    pub const SLOW: Self = Self(500.0);
    /// Platform default swipe speed
    pub const DEFAULT: Self = Self(1000.0);
    /// Fling
    pub const FAST: Self = Self(2500.0);

    /// Custom velocity in points per second
    #[must_use]
    pub fn points_per_second(value: f64) -> Self {
        Self(value.max(0.0))
    }

    /// Points per second
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for GestureVelocity {
    fn from(value: f64) -> Self {
        Self::points_per_second(value)
    }
}

impl From<GestureVelocity> for f64 {
    fn from(velocity: GestureVelocity) -> Self {
        velocity.0
    }
}

impl Default for GestureVelocity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for GestureVelocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}pt/s", self.0)
    }
}

/// Direction of a scroll swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    /// Finger moves up, content scrolls towards the end
    Up,
    /// Finger moves down, content scrolls towards the start
    Down,
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Check that must pass before an interaction proceeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PreconditionCheck {
    /// The element must be present in the view hierarchy
    Existence,
    /// The element must be visible and able to receive a direct interaction
    #[default]
    Hittable,
    /// Act immediately
    None,
}

impl std::fmt::Display for PreconditionCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Existence => write!(f, "existence"),
            Self::Hittable => write!(f, "hittable"),
            Self::None => write!(f, "none"),
        }
    }
}
