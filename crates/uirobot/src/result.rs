//! Result and error types for UIRobot.

use crate::spec::ElementSpec;
use crate::timeout::Timeout;
use thiserror::Error;

/// Result type for robot operations
pub type RobotResult<T> = Result<T, RobotError>;

/// Ways a wait or interaction can fail.
///
/// Every variant carries the spec that was waited on and the budget that
/// expired. The `Display` text is stable and safe to assert on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RobotError {
    /// Element never appeared
    #[error("Element '{}' was not found in the view hierarchy within {}s.", .spec.hierarchy_path(), .timeout)]
    NotFoundInViewHierarchy {
        /// Element that was waited on
        spec: ElementSpec,
        /// Budget that expired
        timeout: Timeout,
    },

    /// Element never became hittable
    #[error("Element '{}' was not hittable within {}s.", .spec.hierarchy_path(), .timeout)]
    NotHittable {
        /// Element that was waited on
        spec: ElementSpec,
        /// Budget that expired
        timeout: Timeout,
    },

    /// Element did not go away
    #[error("Element '{}' was still present in the view hierarchy after {}s.", .spec.hierarchy_path(), .timeout)]
    StillPresentInViewHierarchy {
        /// Element that was waited on
        spec: ElementSpec,
        /// Budget that expired
        timeout: Timeout,
    },

    /// A caller-supplied condition on the element never held
    #[error("Condition for element '{}' did not resolve within {}s.", .spec.hierarchy_path(), .timeout)]
    ConditionTimeout {
        /// Element the condition was evaluated against
        spec: ElementSpec,
        /// Budget that expired
        timeout: Timeout,
    },
}

impl RobotError {
    /// Element not found
    #[must_use]
    pub fn not_found(spec: &ElementSpec, timeout: Timeout) -> Self {
        Self::NotFoundInViewHierarchy {
            spec: spec.clone(),
            timeout,
        }
    }

    /// Element not hittable
    #[must_use]
    pub fn not_hittable(spec: &ElementSpec, timeout: Timeout) -> Self {
        Self::NotHittable {
            spec: spec.clone(),
            timeout,
        }
    }

    /// Element still present
    #[must_use]
    pub fn still_present(spec: &ElementSpec, timeout: Timeout) -> Self {
        Self::StillPresentInViewHierarchy {
            spec: spec.clone(),
            timeout,
        }
    }

    /// Condition timed out
    #[must_use]
    pub fn condition_timeout(spec: &ElementSpec, timeout: Timeout) -> Self {
        Self::ConditionTimeout {
            spec: spec.clone(),
            timeout,
        }
    }

    /// Human-readable description, identical to the `Display` text
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }

    /// Element the failure is about
    #[must_use]
    pub const fn spec(&self) -> &ElementSpec {
        match self {
            Self::NotFoundInViewHierarchy { spec, .. }
            | Self::NotHittable { spec, .. }
            | Self::StillPresentInViewHierarchy { spec, .. }
            | Self::ConditionTimeout { spec, .. } => spec,
        }
    }

    /// Budget that expired
    #[must_use]
    pub const fn timeout(&self) -> Timeout {
        match self {
            Self::NotFoundInViewHierarchy { timeout, .. }
            | Self::NotHittable { timeout, .. }
            | Self::StillPresentInViewHierarchy { timeout, .. }
            | Self::ConditionTimeout { timeout, .. } => *timeout,
        }
    }
}
