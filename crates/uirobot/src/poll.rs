//! Deadlines and bounded polling.
//!
//! Every wait in the crate funnels through [`Poller`]: evaluate a predicate,
//! stop on success, stop on an elapsed [`Deadline`], otherwise run an optional
//! retry action, sleep one interval on the injected clock and go again.

use crate::clock::SharedClock;
use crate::timeout::Timeout;
use std::time::{Duration, Instant};
use tracing::trace;

/// Default pause between predicate evaluations (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Shortest pause the poller will take between evaluations
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// A bounded time window measured from a start instant.
#[derive(Debug, Clone)]
pub struct Deadline {
    start: Instant,
    timeout: Timeout,
    clock: SharedClock,
}

impl Deadline {
    /// Deadline starting at an explicit instant
    #[must_use]
    pub fn new(start: Instant, timeout: Timeout, clock: SharedClock) -> Self {
        Self {
            start,
            timeout,
            clock,
        }
    }

    /// Deadline starting at the clock's current instant
    #[must_use]
    pub fn starting_now(timeout: Timeout, clock: SharedClock) -> Self {
        let start = clock.now();
        Self::new(start, timeout, clock)
    }

    /// Time since the start instant
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.start)
    }

    /// True once strictly more than `timeout` has passed
    #[must_use]
    pub fn is_elapsed(&self) -> bool {
        self.elapsed() > self.timeout.as_duration()
    }

    /// Budget left, zero once elapsed
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.timeout.as_duration().saturating_sub(self.elapsed())
    }

    /// Start instant
    #[must_use]
    pub const fn start(&self) -> Instant {
        self.start
    }

    /// Configured budget
    #[must_use]
    pub const fn timeout(&self) -> Timeout {
        self.timeout
    }
}

/// Repeatedly evaluates a predicate until it holds or a deadline elapses.
#[derive(Debug, Clone)]
pub struct Poller {
    clock: SharedClock,
    interval: Duration,
}

impl Poller {
    /// Poller with the default interval
    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self::with_interval(clock, Duration::from_millis(DEFAULT_POLL_INTERVAL_MS))
    }

    /// Poller with a custom interval, floored at [`MIN_POLL_INTERVAL`]
    #[must_use]
    pub fn with_interval(clock: SharedClock, interval: Duration) -> Self {
        Self {
            clock,
            interval: interval.max(MIN_POLL_INTERVAL),
        }
    }

    /// Pause between evaluations
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Clock used for deadlines and sleeping
    #[must_use]
    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Evaluate `predicate` until it returns true or `timeout` elapses.
    ///
    /// The predicate runs at least once, even for a zero timeout.
    pub fn poll_until<P>(&self, timeout: Timeout, predicate: P) -> bool
    where
        P: FnMut() -> bool,
    {
        self.poll_until_with(timeout, predicate, || {})
    }

    /// Like [`Poller::poll_until`], running `on_retry` after every failed
    /// evaluation that still has budget left.
    pub fn poll_until_with<P, R>(&self, timeout: Timeout, mut predicate: P, mut on_retry: R) -> bool
    where
        P: FnMut() -> bool,
        R: FnMut(),
    {
        let deadline = Deadline::starting_now(timeout, self.clock.clone());
        let mut attempts: u64 = 0;

        loop {
            attempts += 1;
            if predicate() {
                trace!(attempts, elapsed = ?deadline.elapsed(), "poll satisfied");
                return true;
            }
            if deadline.is_elapsed() {
                trace!(attempts, %timeout, "poll deadline elapsed");
                return false;
            }
            on_retry();
            self.clock.sleep(self.interval);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use std::cell::Cell;
    use std::sync::Arc;

    fn fake() -> (Arc<FakeClock>, SharedClock) {
        let clock = FakeClock::shared();
        let shared: SharedClock = clock.clone();
        (clock, shared)
    }

    mod deadline_tests {
        use super::*;
        use crate::clock::Clock;

        #[test]
        fn test_zero_timeout_not_elapsed_on_frozen_clock() {
            let (_, shared) = fake();
            let deadline = Deadline::starting_now(Timeout::ZERO, shared);
            assert!(!deadline.is_elapsed());
        }

        #[test]
        fn test_zero_timeout_elapsed_once_time_moves() {
            let (clock, shared) = fake();
            let deadline = Deadline::starting_now(Timeout::ZERO, shared);
            clock.advance(Duration::from_nanos(1));
            assert!(deadline.is_elapsed());
        }

        #[test]
        fn test_exact_timeout_is_not_elapsed() {
            let (clock, shared) = fake();
            let deadline = Deadline::starting_now(Timeout::STANDARD, shared);
            clock.advance(Duration::from_secs(1));
            assert!(!deadline.is_elapsed());
            clock.advance(Duration::from_nanos(1));
            assert!(deadline.is_elapsed());
        }

        #[test]
        fn test_remaining_saturates() {
            let (clock, shared) = fake();
            let deadline = Deadline::starting_now(Timeout::STANDARD, shared);
            clock.advance_ms(400);
            assert_eq!(deadline.remaining(), Duration::from_millis(600));
            clock.advance_ms(1000);
            assert_eq!(deadline.remaining(), Duration::ZERO);
        }

        #[test]
        fn test_explicit_start() {
            let (clock, shared) = fake();
            let start = clock.now();
            clock.advance_ms(2000);
            let deadline = Deadline::new(start, Timeout::STANDARD, shared);
            assert!(deadline.is_elapsed());
            assert_eq!(deadline.start(), start);
            assert_eq!(deadline.timeout(), Timeout::STANDARD);
        }
    }

    mod poller_tests {
        use super::*;

        #[test]
        fn test_satisfied_immediately_evaluates_once() {
            let (clock, shared) = fake();
            let calls = Cell::new(0);
            let poller = Poller::new(shared);
            assert!(poller.poll_until(Timeout::STANDARD, || {
                calls.set(calls.get() + 1);
                true
            }));
            assert_eq!(calls.get(), 1);
            assert_eq!(clock.sleep_count(), 0);
        }

        #[test]
        fn test_zero_timeout_still_evaluates() {
            let (_, shared) = fake();
            let calls = Cell::new(0);
            let poller = Poller::new(shared);
            assert!(poller.poll_until(Timeout::ZERO, || {
                calls.set(calls.get() + 1);
                true
            }));
            assert_eq!(calls.get(), 1);
        }

        #[test]
        fn test_zero_timeout_gives_up_after_one_interval() {
            let (_, shared) = fake();
            let calls = Cell::new(0);
            let poller = Poller::new(shared);
            assert!(!poller.poll_until(Timeout::ZERO, || {
                calls.set(calls.get() + 1);
                false
            }));
            // first evaluation at t=0 (not elapsed), second at t=50ms (elapsed)
            assert_eq!(calls.get(), 2);
        }

        #[test]
        fn test_times_out_after_full_window() {
            let (clock, shared) = fake();
            let poller = Poller::with_interval(shared, Duration::from_millis(100));
            assert!(!poller.poll_until(Timeout::STANDARD, || false));
            assert_eq!(clock.elapsed(), Duration::from_millis(1100));
        }

        #[test]
        fn test_becomes_true_mid_window() {
            let (clock, shared) = fake();
            let poller = Poller::new(shared);
            let watched = Arc::clone(&clock);
            assert!(poller.poll_until(Timeout::STANDARD, || {
                watched.elapsed() >= Duration::from_millis(300)
            }));
            assert_eq!(clock.elapsed(), Duration::from_millis(300));
        }

        #[test]
        fn test_retry_action_runs_between_failed_ticks() {
            let (_, shared) = fake();
            let retries = Cell::new(0);
            let poller = Poller::with_interval(shared, Duration::from_millis(100));
            let satisfied = poller.poll_until_with(
                Timeout::STANDARD,
                || retries.get() == 3,
                || retries.set(retries.get() + 1),
            );
            assert!(satisfied);
            assert_eq!(retries.get(), 3);
        }

        #[test]
        fn test_retry_action_not_run_after_deadline() {
            let (_, shared) = fake();
            let retries = Cell::new(0);
            let poller = Poller::with_interval(shared, Duration::from_millis(100));
            let satisfied =
                poller.poll_until_with(Timeout::STANDARD, || false, || retries.set(retries.get() + 1));
            assert!(!satisfied);
            // ticks at 0..=1000ms retry, the tick at 1100ms gives up
            assert_eq!(retries.get(), 11);
        }

        #[test]
        fn test_interval_floor() {
            let (_, shared) = fake();
            let poller = Poller::with_interval(shared, Duration::ZERO);
            assert_eq!(poller.interval(), MIN_POLL_INTERVAL);
            assert!(!poller.poll_until(Timeout::from_millis(5), || false));
        }

        #[test]
        fn test_real_clock_bounded() {
            let poller = Poller::with_interval(crate::clock::system_clock(), Duration::from_millis(5));
            let start = Instant::now();
            assert!(!poller.poll_until(Timeout::from_millis(50), || false));
            assert!(start.elapsed() >= Duration::from_millis(50));
        }
    }
}
