//! Injectable time source for deadlines and polling.
//!
//! Production robots use [`SystemClock`]. Tests swap in a [`FakeClock`], whose
//! `sleep` advances virtual time instead of blocking, so timeout boundaries
//! can be exercised exactly and without real delays.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A source of monotonic time that can also wait.
pub trait Clock: Send + Sync + Debug {
    /// Current instant
    fn now(&self) -> Instant;

    /// Block (or pretend to block) for `duration`
    fn sleep(&self, duration: Duration);
}

/// Thread-safe clock handle shared by robots, deadlines and drivers
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock backed by `Instant::now` and `thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Shared handle to the wall clock
#[must_use]
pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}

/// Virtual clock for deterministic tests.
///
/// Time only moves when the test calls [`FakeClock::advance`] or when code
/// under test calls [`Clock::sleep`].
#[derive(Debug)]
pub struct FakeClock {
    /// Real instant the virtual timeline is anchored to
    origin: Instant,
    /// Virtual nanoseconds elapsed since `origin`
    elapsed_nanos: AtomicU64,
    /// Number of `sleep` calls observed
    sleeps: AtomicU64,
}

impl FakeClock {
    /// Create a fake clock frozen at its origin
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed_nanos: AtomicU64::new(0),
            sleeps: AtomicU64::new(0),
        }
    }

    /// Create a shared fake clock
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Move virtual time forward
    pub fn advance(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .elapsed_nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(current.saturating_add(nanos))
            });
    }

    /// Move virtual time forward by milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Virtual time elapsed since the clock was created
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }

    /// How many times code under test slept on this clock
    #[must_use]
    pub fn sleep_count(&self) -> u64 {
        self.sleeps.load(Ordering::SeqCst)
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FakeClock {
    fn clone(&self) -> Self {
        Self {
            origin: self.origin,
            elapsed_nanos: AtomicU64::new(self.elapsed_nanos.load(Ordering::SeqCst)),
            sleeps: AtomicU64::new(self.sleeps.load(Ordering::SeqCst)),
        }
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        self.advance(duration);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod fake_clock_tests {
        use super::*;

        #[test]
        fn test_frozen_until_advanced() {
            let clock = FakeClock::new();
            let first = clock.now();
            assert_eq!(clock.now(), first);
            assert_eq!(clock.elapsed(), Duration::ZERO);
        }

        #[test]
        fn test_advance() {
            let clock = FakeClock::new();
            let start = clock.now();
            clock.advance(Duration::from_millis(250));
            clock.advance_ms(750);
            assert_eq!(clock.now() - start, Duration::from_secs(1));
        }

        #[test]
        fn test_sleep_advances_without_blocking() {
            let clock = FakeClock::new();
            let real_start = Instant::now();
            clock.sleep(Duration::from_secs(3600));
            assert!(real_start.elapsed() < Duration::from_secs(1));
            assert_eq!(clock.elapsed(), Duration::from_secs(3600));
            assert_eq!(clock.sleep_count(), 1);
        }

        #[test]
        fn test_advance_saturates() {
            let clock = FakeClock::new();
            clock.advance(Duration::from_nanos(u64::MAX));
            clock.advance(Duration::from_secs(1));
            assert_eq!(clock.elapsed(), Duration::from_nanos(u64::MAX));
        }

        #[test]
        fn test_clone_snapshots_time() {
            let clock = FakeClock::new();
            clock.advance_ms(10);
            let copy = clock.clone();
            clock.advance_ms(10);
            assert_eq!(copy.elapsed(), Duration::from_millis(10));
            assert_eq!(clock.elapsed(), Duration::from_millis(20));
        }

        #[test]
        fn test_shared_between_threads() {
            let clock = FakeClock::shared();
            let other = Arc::clone(&clock);
            std::thread::spawn(move || other.advance_ms(5))
                .join()
                .unwrap();
            assert_eq!(clock.elapsed(), Duration::from_millis(5));
        }
    }

    mod system_clock_tests {
        use super::*;

        #[test]
        fn test_monotonic() {
            let clock = system_clock();
            let a = clock.now();
            clock.sleep(Duration::from_millis(5));
            assert!(clock.now() >= a + Duration::from_millis(5));
        }
    }
}
