//! Issue reporting
//!
//! Robots return typed errors; turning those into test failures is the job
//! of an [`IssueReporter`]. [`with_failure_report`] glues the two together so
//! robot methods can attribute a failure to the test line that called them:
//!
//! ```
//! use uirobot::{source_location, with_failure_report, ElementSpec, RecordingReporter, RobotError, Timeout};
//!
//! let reporter = RecordingReporter::new();
//! with_failure_report(&reporter, source_location!(), || {
//!     Err(RobotError::not_found(&ElementSpec::any("login"), Timeout::STANDARD))
//! });
//!
//! assert_eq!(reporter.issues().len(), 1);
//! assert!(reporter.issues()[0].description.starts_with("Element 'app.login'"));
//! ```

use serde::Serialize;
use std::fmt::Display;
use std::sync::{Mutex, PoisonError};
use tracing::error;

/// File and line a failure should be attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    /// Source file path
    pub file: &'static str,
    /// One-based line number
    pub line: u32,
}

impl SourceLocation {
    /// Explicit location
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the caller of the function this is used in.
    ///
    /// Mark the calling function `#[track_caller]` to propagate the call site
    /// further up.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line())
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Capture the current file and line as a [`SourceLocation`]
#[macro_export]
macro_rules! source_location {
    () => {
        $crate::SourceLocation::new(file!(), line!())
    };
}

/// Sink that records a described failure at a source location
pub trait IssueReporter {
    /// Record one failure
    fn report(&self, description: &str, location: SourceLocation);
}

impl<R: IssueReporter + ?Sized> IssueReporter for &R {
    fn report(&self, description: &str, location: SourceLocation) {
        (**self).report(description, location);
    }
}

/// Run `action` and report its error, if any, at `location`.
///
/// The error is swallowed after reporting.
pub fn with_failure_report<R, E, F>(reporter: &R, location: SourceLocation, action: F)
where
    R: IssueReporter + ?Sized,
    E: Display,
    F: FnOnce() -> Result<(), E>,
{
    if let Err(err) = action() {
        reporter.report(&err.to_string(), location);
    }
}

/// Fails the running test, like an assertion at `location`
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl IssueReporter for PanicReporter {
    #[allow(clippy::panic)]
    fn report(&self, description: &str, location: SourceLocation) {
        panic!("{location}: {description}");
    }
}

/// Logs issues through `tracing` and carries on
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl IssueReporter for TracingReporter {
    fn report(&self, description: &str, location: SourceLocation) {
        error!(file = location.file, line = location.line, "{description}");
    }
}

/// A single recorded issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Failure description
    pub description: String,
    /// Where the failure is attributed
    pub location: SourceLocation,
    /// Index of this issue in the sequence
    pub index: usize,
}

/// Collects issues without stopping the test, for soft checks
#[derive(Debug, Default)]
pub struct RecordingReporter {
    issues: Mutex<Vec<Issue>>,
}

impl RecordingReporter {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues recorded so far
    #[must_use]
    pub fn issues(&self) -> Vec<Issue> {
        self.issues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether nothing was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// One line per issue, `file:line: description`
    #[must_use]
    pub fn summary(&self) -> String {
        self.issues()
            .iter()
            .map(|issue| format!("{}: {}", issue.location, issue.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl IssueReporter for RecordingReporter {
    fn report(&self, description: &str, location: SourceLocation) {
        let mut issues = self.issues.lock().unwrap_or_else(PoisonError::into_inner);
        let index = issues.len();
        issues.push(Issue {
            description: description.to_string(),
            location,
            index,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::{ElementSpec, RobotError, Timeout};

    mod location_tests {
        use super::*;

        #[track_caller]
        fn located() -> SourceLocation {
            SourceLocation::caller()
        }

        #[test]
        fn test_macro_captures_call_site() {
            let location = source_location!();
            assert_eq!(location.file, file!());
            assert_eq!(location.line, line!() - 2);
        }

        #[test]
        fn test_caller_propagates_through_track_caller() {
            let expected_line = line!() + 1;
            let location = located();
            assert_eq!(location.line, expected_line);
            assert_eq!(location.file, file!());
        }

        #[test]
        fn test_display() {
            assert_eq!(SourceLocation::new("tests/login.rs", 42).to_string(), "tests/login.rs:42");
        }
    }

    mod wrapper_tests {
        use super::*;

        #[test]
        fn test_success_reports_nothing() {
            let reporter = RecordingReporter::new();
            with_failure_report(&reporter, source_location!(), || Ok::<(), RobotError>(()));
            assert!(reporter.is_empty());
        }

        #[test]
        fn test_error_reported_once_with_location() {
            let reporter = RecordingReporter::new();
            let location = SourceLocation::new("tests/inbox.rs", 7);
            with_failure_report(&reporter, location, || {
                Err(RobotError::not_hittable(&ElementSpec::any("compose"), Timeout::STANDARD))
            });

            let issues = reporter.issues();
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].location, location);
            assert_eq!(
                issues[0].description,
                "Element 'app.compose' was not hittable within 1.0s."
            );
        }

        #[test]
        fn test_any_display_error_is_accepted() {
            let reporter = RecordingReporter::new();
            with_failure_report(&reporter, source_location!(), || Err("plain message"));
            assert_eq!(reporter.issues()[0].description, "plain message");
        }

        #[test]
        #[should_panic(expected = "tests/settings.rs:3: Element 'app.wifi'")]
        fn test_panic_reporter_fails_test() {
            with_failure_report(&PanicReporter, SourceLocation::new("tests/settings.rs", 3), || {
                Err(RobotError::not_found(&ElementSpec::any("wifi"), Timeout::STANDARD))
            });
        }

        #[test]
        fn test_tracing_reporter_does_not_panic() {
            with_failure_report(&TracingReporter, source_location!(), || Err("logged"));
        }
    }

    mod recording_tests {
        use super::*;

        #[test]
        fn test_indices_and_summary() {
            let reporter = RecordingReporter::new();
            reporter.report("first", SourceLocation::new("a.rs", 1));
            reporter.report("second", SourceLocation::new("b.rs", 2));

            let issues = reporter.issues();
            assert_eq!(issues[0].index, 0);
            assert_eq!(issues[1].index, 1);
            assert_eq!(reporter.summary(), "a.rs:1: first\nb.rs:2: second");
        }
    }
}
