//! Scripted in-memory driver for robot tests.
//!
//! [`MockDriver`] keeps a table of query paths and the timeline each element
//! follows: when it appears, when it disappears, when it becomes hittable, or
//! how many swipes it takes to scroll it into view. Time is read from the
//! injected clock, so with a [`FakeClock`](crate::FakeClock) every wait is
//! deterministic and instantaneous.
//!
//! ```
//! use std::time::Duration;
//! use uirobot::{ElementSpec, FakeClock, MockDriver, MockElement, Timeout, UiRobot};
//!
//! let clock = FakeClock::shared();
//! let driver = MockDriver::new(clock.clone());
//! let robot = UiRobot::builder(&driver).clock(clock.clone()).build();
//!
//! let banner = ElementSpec::any("welcome-banner");
//! driver.insert(&robot.resolve(&banner), MockElement::visible().appearing_after(Duration::from_millis(300)));
//!
//! robot.wait_until_exists(&banner, Timeout::STANDARD).unwrap();
//! assert_eq!(clock.elapsed(), Duration::from_millis(300));
//! ```

use crate::clock::{Clock, SharedClock};
use crate::driver::UiDriver;
use crate::poll::Poller;
use crate::spec::ElementType;
use crate::timeout::{GestureVelocity, Timeout};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// One `descendants` query in a handle's chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryStep {
    /// Category filter
    pub element_type: ElementType,
    /// Identifier filter
    pub identifier: String,
}

/// Handle produced by [`MockDriver`]: the chain of queries from the root.
///
/// Two handles built from the same queries compare equal, which is how the
/// mock models "the same element" across re-resolutions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MockHandle {
    steps: Vec<QueryStep>,
}

impl MockHandle {
    /// The application root
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Queries from the root to this handle
    #[must_use]
    pub fn steps(&self) -> &[QueryStep] {
        &self.steps
    }

    /// Whether this is the application root
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    fn child(&self, element_type: ElementType, identifier: &str) -> Self {
        let mut steps = self.steps.clone();
        steps.push(QueryStep {
            element_type,
            identifier: identifier.to_string(),
        });
        Self { steps }
    }
}

impl std::fmt::Display for MockHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "app")?;
        for step in &self.steps {
            match step.element_type {
                ElementType::Any => write!(f, ".{}", step.identifier)?,
                other => write!(f, ".{}[{}]", other.name(), step.identifier)?,
            }
        }
        Ok(())
    }
}

/// Timeline of a scripted element, relative to the driver's creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockElement {
    appears_at: Option<Duration>,
    disappears_at: Option<Duration>,
    hittable_at: Option<Duration>,
    hittable_after_swipes: Option<u64>,
}

impl MockElement {
    /// Present from the start but never hittable (e.g. covered or off-screen)
    #[must_use]
    pub fn present() -> Self {
        Self {
            appears_at: Some(Duration::ZERO),
            ..Self::default()
        }
    }

    /// Present and hittable from the start
    #[must_use]
    pub fn visible() -> Self {
        Self {
            appears_at: Some(Duration::ZERO),
            hittable_at: Some(Duration::ZERO),
            ..Self::default()
        }
    }

    /// Never present
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }

    /// Appear once `after` has passed; hittability follows appearance
    #[must_use]
    pub fn appearing_after(mut self, after: Duration) -> Self {
        self.appears_at = Some(after);
        if let Some(hittable_at) = self.hittable_at {
            self.hittable_at = Some(hittable_at.max(after));
        }
        self
    }

    /// Disappear once `after` has passed
    #[must_use]
    pub fn disappearing_after(mut self, after: Duration) -> Self {
        self.disappears_at = Some(after);
        self
    }

    /// Become hittable once `after` has passed
    #[must_use]
    pub fn hittable_after(mut self, after: Duration) -> Self {
        self.hittable_at = Some(after);
        self
    }

    /// Become hittable once this many swipes have been performed
    #[must_use]
    pub fn revealed_after_swipes(mut self, swipes: u64) -> Self {
        self.hittable_after_swipes = Some(swipes);
        self
    }

    fn exists_at(&self, now: Duration) -> bool {
        let appeared = self.appears_at.is_some_and(|at| now >= at);
        let gone = self.disappears_at.is_some_and(|at| now >= at);
        appeared && !gone
    }

    fn hittable_at(&self, now: Duration, swipes: u64) -> bool {
        let by_time = self.hittable_at.is_some_and(|at| now >= at);
        let by_swipes = self.hittable_after_swipes.is_some_and(|n| swipes >= n);
        self.exists_at(now) && (by_time || by_swipes)
    }
}

#[derive(Debug, Default)]
struct MockState {
    elements: HashMap<MockHandle, MockElement>,
    typed_text: HashMap<MockHandle, String>,
    swipes: u64,
    call_history: Vec<String>,
}

/// Mock driver for unit testing
#[derive(Debug)]
pub struct MockDriver {
    clock: SharedClock,
    epoch: Instant,
    poller: Poller,
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create a driver whose timeline starts at the clock's current instant
    #[must_use]
    pub fn new<C: Clock + 'static>(clock: Arc<C>) -> Self {
        let clock: SharedClock = clock;
        Self {
            epoch: clock.now(),
            poller: Poller::new(clock.clone()),
            clock,
            state: Mutex::new(MockState::default()),
        }
    }

    /// Use a custom polling interval for the driver's own waits
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poller = Poller::with_interval(self.clock.clone(), interval);
        self
    }

    /// Script an element at the given query path, replacing any previous one
    pub fn insert(&self, handle: &MockHandle, element: MockElement) {
        let _ = self.lock().elements.insert(handle.clone(), element);
    }

    /// Remove an element from the tree immediately
    pub fn remove(&self, handle: &MockHandle) {
        let _ = self.lock().elements.remove(handle);
    }

    /// Text typed into an element so far
    #[must_use]
    pub fn typed_text(&self, handle: &MockHandle) -> Option<String> {
        self.lock().typed_text.get(handle).cloned()
    }

    /// Total swipes performed
    #[must_use]
    pub fn swipe_count(&self) -> u64 {
        self.lock().swipes
    }

    /// Call history for verification
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().call_history.clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// Number of calls to a method
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.lock()
            .call_history
            .iter()
            .filter(|entry| entry.split(':').next() == Some(method))
            .count()
    }

    /// Forget recorded calls
    pub fn clear_history(&self) {
        self.lock().call_history.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, entry: String) {
        self.lock().call_history.push(entry);
    }

    fn offset(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.epoch)
    }

    fn exists_now(&self, handle: &MockHandle) -> bool {
        if handle.is_root() {
            return true;
        }
        let now = self.offset();
        self.lock()
            .elements
            .get(handle)
            .is_some_and(|element| element.exists_at(now))
    }

    fn hittable_now(&self, handle: &MockHandle) -> bool {
        if handle.is_root() {
            return true;
        }
        let now = self.offset();
        let state = self.lock();
        state
            .elements
            .get(handle)
            .is_some_and(|element| element.hittable_at(now, state.swipes))
    }
}

impl UiDriver for MockDriver {
    type Handle = MockHandle;

    fn root_application(&self) -> MockHandle {
        self.record("root_application".to_string());
        MockHandle::root()
    }

    fn descendants(&self, parent: &MockHandle, element_type: ElementType, identifier: &str) -> MockHandle {
        let handle = parent.child(element_type, identifier);
        self.record(format!("descendants:{handle}"));
        handle
    }

    fn exists(&self, handle: &MockHandle) -> bool {
        self.record(format!("exists:{handle}"));
        self.exists_now(handle)
    }

    fn wait_for_existence(&self, handle: &MockHandle, timeout: Timeout) -> bool {
        self.record(format!("wait_for_existence:{handle}:{timeout}"));
        self.poller.poll_until(timeout, || self.exists_now(handle))
    }

    fn wait_for_non_existence(&self, handle: &MockHandle, timeout: Timeout) -> bool {
        self.record(format!("wait_for_non_existence:{handle}:{timeout}"));
        self.poller.poll_until(timeout, || !self.exists_now(handle))
    }

    fn is_hittable(&self, handle: &MockHandle) -> bool {
        self.record(format!("is_hittable:{handle}"));
        self.hittable_now(handle)
    }

    fn wait_for_hittable(&self, handle: &MockHandle, timeout: Timeout) -> bool {
        self.record(format!("wait_for_hittable:{handle}:{timeout}"));
        self.poller.poll_until(timeout, || self.hittable_now(handle))
    }

    fn tap(&self, handle: &MockHandle) {
        self.record(format!("tap:{handle}"));
    }

    fn type_text(&self, handle: &MockHandle, text: &str) {
        let mut state = self.lock();
        state.call_history.push(format!("type_text:{handle}:{text}"));
        state
            .typed_text
            .entry(handle.clone())
            .or_default()
            .push_str(text);
    }

    fn swipe_up(&self, handle: &MockHandle, velocity: GestureVelocity) {
        let mut state = self.lock();
        state.call_history.push(format!("swipe_up:{handle}:{velocity}"));
        state.swipes += 1;
    }

    fn swipe_down(&self, handle: &MockHandle, velocity: GestureVelocity) {
        let mut state = self.lock();
        state.call_history.push(format!("swipe_down:{handle}:{velocity}"));
        state.swipes += 1;
    }
}
