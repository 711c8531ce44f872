//! UIRobot: deadline-bounded element resolution and interaction for UI test robots
//!
//! Tests describe elements declaratively with [`ElementSpec`] (an identifier,
//! an [`ElementType`] and a parent scope). A [`UiRobot`] resolves those specs
//! against a live UI tree through a [`UiDriver`], waits for existence,
//! disappearance or hittability under a [`Timeout`], and only then taps,
//! types or swipes. Failures come back as [`RobotError`] values whose message
//! names the element by its hierarchy path, e.g.
//! `Element 'app.settings.Switch[wifi]' was not hittable within 1.0s.`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    UIROBOT Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Element    │    │ UiRobot    │    │ UiDriver   │            │
//! │   │ Spec       │───►│ resolve +  │───►│ (platform  │            │
//! │   │ (pure)     │    │ wait + act │    │  or mock)  │            │
//! │   └────────────┘    └─────┬──────┘    └────────────┘            │
//! │                           │                                     │
//! │                     ┌─────▼──────┐    ┌────────────┐            │
//! │                     │ Poller +   │───►│ Clock      │            │
//! │                     │ Deadline   │    │ (sys/fake) │            │
//! │                     └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use uirobot::{ElementSpec, ElementType, FakeClock, MockDriver, MockElement, Timeout, UiRobot};
//!
//! let clock = FakeClock::shared();
//! let driver = MockDriver::new(clock.clone());
//! let robot = UiRobot::builder(&driver).clock(clock).build();
//!
//! let save = ElementSpec::any("editor").descendant_of_type("save", ElementType::Button);
//! driver.insert(&robot.resolve(&save), MockElement::visible().appearing_after(Duration::from_millis(200)));
//!
//! robot.tap(&save).unwrap();
//! assert!(driver.was_called("tap"));
//! ```

#![warn(missing_docs)]

mod clock;
mod config;
mod driver;
mod hierarchy;
mod logging;
mod mock;
mod poll;
mod report;
mod result;
mod robot;
mod screen;
mod spec;
mod timeout;
mod waits;

/// Property-based testing strategies for element specs
#[cfg(any(test, feature = "proptest"))]
pub mod strategies;

pub use clock::{system_clock, Clock, FakeClock, SharedClock, SystemClock};
pub use config::{ConfigError, RobotConfig};
pub use driver::UiDriver;
pub use hierarchy::hierarchy_path;
pub use logging::{init_tracing, try_init_tracing, LogFormat, DEFAULT_FILTER};
pub use mock::{MockDriver, MockElement, MockHandle, QueryStep};
pub use poll::{Deadline, Poller, DEFAULT_POLL_INTERVAL_MS, MIN_POLL_INTERVAL};
pub use report::{
    with_failure_report, Issue, IssueReporter, PanicReporter, RecordingReporter, SourceLocation,
    TracingReporter,
};
pub use result::{RobotError, RobotResult};
pub use robot::{UiRobot, UiRobotBuilder};
pub use screen::ScreenRobot;
pub use spec::{ElementScope, ElementSpec, ElementType};
pub use timeout::{GestureVelocity, PreconditionCheck, SwipeDirection, Timeout};
pub use waits::{conditions, DriverExt};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::clock::*;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::mock::*;
    pub use super::poll::*;
    pub use super::report::*;
    pub use super::result::*;
    pub use super::robot::*;
    pub use super::screen::*;
    pub use super::spec::*;
    pub use super::timeout::*;
    pub use super::waits::*;
    pub use crate::source_location;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_exposes_robot_surface() {
        use crate::prelude::*;

        let clock = FakeClock::shared();
        let driver = MockDriver::new(clock.clone());
        let robot = UiRobot::builder(&driver).clock(clock).build();
        let location = source_location!();
        let reporter = RecordingReporter::new();

        with_failure_report(&reporter, location, || {
            robot.wait_until_exists(&ElementSpec::any("nowhere"), Timeout::ZERO)
        });
        assert_eq!(reporter.issues()[0].location, location);
    }

    #[test]
    fn test_root_reexports() {
        let spec = ElementSpec::new("ok", ElementType::Button, ElementScope::App);
        assert_eq!(hierarchy_path(&spec), "app.Button[ok]");
        assert_eq!(RobotConfig::default().poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }
}
