//! The robot: resolution, waits and precondition-gated interactions.
//!
//! [`UiRobot`] owns a [`UiDriver`] and turns [`ElementSpec`]s into live
//! handles on demand. Every wait resolves the spec afresh because the live
//! tree may have been rebuilt since the last call; every interaction first
//! waits for its precondition, then resolves *again* and acts.
//!
//! ```text
//! Idle ──► CheckingPrecondition ──► Acting ──► Done
//!                    │
//!                    └──► Failed(RobotError)
//! ```

use crate::clock::{system_clock, Clock, SharedClock};
use crate::config::RobotConfig;
use crate::driver::UiDriver;
use crate::poll::Poller;
use crate::report::{with_failure_report, IssueReporter, PanicReporter, SourceLocation};
use crate::result::{RobotError, RobotResult};
use crate::spec::{ElementScope, ElementSpec};
use crate::timeout::{GestureVelocity, PreconditionCheck, SwipeDirection, Timeout};
use crate::waits::DriverExt;
use std::sync::Arc;
use tracing::debug;

/// Robot bound to a driver and scoped to a root element
pub struct UiRobot<D: UiDriver> {
    driver: D,
    app: ElementSpec,
    root: ElementSpec,
    config: RobotConfig,
    poller: Poller,
    reporter: Arc<dyn IssueReporter>,
}

impl<D: UiDriver> std::fmt::Debug for UiRobot<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiRobot")
            .field("app", &self.app.hierarchy_path())
            .field("root", &self.root.hierarchy_path())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<D: UiDriver> UiRobot<D> {
    /// Robot for the application under test with default settings
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self::builder(driver).build()
    }

    /// Robot for another application, e.g. system UI.
    ///
    /// `driver` must already be bound to that application; the bundle
    /// identifier only names it in hierarchy paths.
    #[must_use]
    pub fn for_application(driver: D, bundle_identifier: impl Into<String>) -> Self {
        Self::builder(driver).application(bundle_identifier).build()
    }

    /// Start configuring a robot
    #[must_use]
    pub fn builder(driver: D) -> UiRobotBuilder<D> {
        UiRobotBuilder::new(driver)
    }

    /// Narrow this robot to a subtree. Swipes are performed on the new root.
    #[must_use]
    pub fn with_root(mut self, root: ElementSpec) -> Self {
        self.root = root;
        self
    }

    /// A robot sharing this one's driver, clock, config and reporter,
    /// scoped to `root`. Reference drivers make this a cheap copy.
    #[must_use]
    pub fn scoped(&self, root: ElementSpec) -> Self
    where
        D: Clone,
    {
        Self {
            driver: self.driver.clone(),
            app: self.app.clone(),
            root,
            config: self.config.clone(),
            poller: self.poller.clone(),
            reporter: Arc::clone(&self.reporter),
        }
    }

    /// The application spec; the default root for all queries
    #[must_use]
    pub const fn app(&self) -> &ElementSpec {
        &self.app
    }

    /// The element this robot operates on
    #[must_use]
    pub const fn root(&self) -> &ElementSpec {
        &self.root
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Underlying driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Clock used for deadlines and polling
    #[must_use]
    pub fn clock(&self) -> &SharedClock {
        self.poller.clock()
    }

    // ---------------------------------------------------------------------
    // Resolution
    // ---------------------------------------------------------------------

    /// Convert a spec into a live handle.
    ///
    /// Never blocks and never fails: the handle may not match anything yet.
    pub fn resolve(&self, spec: &ElementSpec) -> D::Handle {
        if spec.element_type().is_application() {
            return self.driver.root_application();
        }

        let parent = match spec.scope() {
            ElementScope::App => self.driver.root_application(),
            ElementScope::DescendantOf(parent) => self.resolve(parent),
        };
        self.driver
            .descendants(&parent, spec.element_type(), spec.identifier())
    }

    // ---------------------------------------------------------------------
    // Waits
    // ---------------------------------------------------------------------

    /// Wait until the element appears in the view hierarchy
    pub fn wait_until_exists(&self, spec: &ElementSpec, timeout: Timeout) -> RobotResult<()> {
        debug!(element = %spec, %timeout, "waiting for existence");
        let resolved = self.resolve(spec);
        if self.driver.exists_after(&resolved, timeout) {
            Ok(())
        } else {
            Err(RobotError::not_found(spec, timeout))
        }
    }

    /// Wait until the element is gone from the view hierarchy
    pub fn wait_until_not_existing(&self, spec: &ElementSpec, timeout: Timeout) -> RobotResult<()> {
        debug!(element = %spec, %timeout, "waiting for non-existence");
        let resolved = self.resolve(spec);
        if self.driver.not_exists_after(&resolved, timeout) {
            Ok(())
        } else {
            Err(RobotError::still_present(spec, timeout))
        }
    }

    /// Wait until the element is visible and can receive a tap
    pub fn wait_until_hittable(&self, spec: &ElementSpec, timeout: Timeout) -> RobotResult<()> {
        debug!(element = %spec, %timeout, "waiting for hittable");
        let resolved = self.resolve(spec);
        if self.driver.is_hittable_after(&resolved, timeout) {
            Ok(())
        } else {
            Err(RobotError::not_hittable(spec, timeout))
        }
    }

    /// [`UiRobot::wait_until_exists`] with the standard timeout
    pub fn wait_until_exists_default(&self, spec: &ElementSpec) -> RobotResult<()> {
        self.wait_until_exists(spec, self.config.standard_timeout)
    }

    /// [`UiRobot::wait_until_not_existing`] with the standard timeout
    pub fn wait_until_not_existing_default(&self, spec: &ElementSpec) -> RobotResult<()> {
        self.wait_until_not_existing(spec, self.config.standard_timeout)
    }

    /// [`UiRobot::wait_until_hittable`] with the standard timeout
    pub fn wait_until_hittable_default(&self, spec: &ElementSpec) -> RobotResult<()> {
        self.wait_until_hittable(spec, self.config.standard_timeout)
    }

    /// Wait until `condition` holds for the element, re-resolving every poll
    pub fn wait_until<C>(&self, spec: &ElementSpec, condition: C, timeout: Timeout) -> RobotResult<()>
    where
        C: Fn(&D, &D::Handle) -> bool,
    {
        debug!(element = %spec, %timeout, "waiting for condition");
        let satisfied = self.poller.poll_until(timeout, || {
            let resolved = self.resolve(spec);
            condition(&self.driver, &resolved)
        });
        if satisfied {
            Ok(())
        } else {
            Err(RobotError::condition_timeout(spec, timeout))
        }
    }

    // ---------------------------------------------------------------------
    // Interactions
    // ---------------------------------------------------------------------

    /// Tap once the element is hittable, within the standard timeout
    pub fn tap(&self, spec: &ElementSpec) -> RobotResult<()> {
        self.tap_with(spec, PreconditionCheck::Hittable, self.config.standard_timeout)
    }

    /// Tap after `precondition` holds within `timeout`
    pub fn tap_with(
        &self,
        spec: &ElementSpec,
        precondition: PreconditionCheck,
        timeout: Timeout,
    ) -> RobotResult<()> {
        self.evaluate(precondition, spec, timeout)?;

        debug!(element = %spec, %precondition, "tap");
        // The tree may have changed while waiting, so resolve again.
        let resolved = self.resolve(spec);
        self.driver.tap(&resolved);
        Ok(())
    }

    /// Tap the element, then type `text` into it
    pub fn enter_text(&self, text: &str, spec: &ElementSpec) -> RobotResult<()> {
        self.tap(spec)?;

        debug!(element = %spec, chars = text.chars().count(), "type text");
        let resolved = self.resolve(spec);
        self.driver.type_text(&resolved, text);
        Ok(())
    }

    /// Swipe on the root until `condition` holds for the element, using the
    /// configured velocity and scroll timeout
    pub fn swipe<C>(&self, direction: SwipeDirection, until: &ElementSpec, condition: C) -> RobotResult<()>
    where
        C: Fn(&D, &D::Handle) -> bool,
    {
        self.swipe_with(
            direction,
            until,
            condition,
            self.config.swipe_velocity,
            self.config.scroll_timeout,
        )
    }

    /// Swipe on the root until `condition` holds for the element.
    ///
    /// The root and the target are resolved once, before the first swipe.
    /// No swipe is made if the condition already holds.
    pub fn swipe_with<C>(
        &self,
        direction: SwipeDirection,
        until: &ElementSpec,
        condition: C,
        velocity: GestureVelocity,
        timeout: Timeout,
    ) -> RobotResult<()>
    where
        C: Fn(&D, &D::Handle) -> bool,
    {
        debug!(element = %until, %direction, %velocity, %timeout, "swipe until condition");
        let resolved_root = self.resolve(&self.root);
        let resolved = self.resolve(until);

        let satisfied = self.poller.poll_until_with(
            timeout,
            || condition(&self.driver, &resolved),
            || match direction {
                SwipeDirection::Up => self.driver.swipe_up(&resolved_root, velocity),
                SwipeDirection::Down => self.driver.swipe_down(&resolved_root, velocity),
            },
        );

        if satisfied {
            Ok(())
        } else {
            Err(RobotError::condition_timeout(until, timeout))
        }
    }

    // ---------------------------------------------------------------------
    // Issue reporting
    // ---------------------------------------------------------------------

    /// Hand an error to this robot's reporter
    pub fn report(&self, error: &RobotError, location: SourceLocation) {
        self.reporter.report(&error.description(), location);
    }

    /// Run `action` and report any error at `location` instead of returning it
    pub fn with_failure_report<F>(&self, location: SourceLocation, action: F)
    where
        F: FnOnce(&Self) -> RobotResult<()>,
    {
        with_failure_report(self.reporter.as_ref(), location, || action(self));
    }

    fn evaluate(&self, precondition: PreconditionCheck, spec: &ElementSpec, timeout: Timeout) -> RobotResult<()> {
        match precondition {
            PreconditionCheck::Existence => self.wait_until_exists(spec, timeout),
            PreconditionCheck::Hittable => self.wait_until_hittable(spec, timeout),
            PreconditionCheck::None => Ok(()),
        }
    }
}

/// Builder for [`UiRobot`]
pub struct UiRobotBuilder<D: UiDriver> {
    driver: D,
    app: ElementSpec,
    root: Option<ElementSpec>,
    config: RobotConfig,
    clock: Option<SharedClock>,
    reporter: Arc<dyn IssueReporter>,
}

impl<D: UiDriver> std::fmt::Debug for UiRobotBuilder<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiRobotBuilder")
            .field("app", &self.app)
            .field("root", &self.root)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<D: UiDriver> UiRobotBuilder<D> {
    /// Builder with the wall clock, default config and a panicking reporter
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            app: ElementSpec::app(),
            root: None,
            config: RobotConfig::default(),
            clock: None,
            reporter: Arc::new(PanicReporter),
        }
    }

    /// Name the application by bundle identifier
    #[must_use]
    pub fn application(mut self, bundle_identifier: impl Into<String>) -> Self {
        self.app = ElementSpec::application(bundle_identifier);
        self
    }

    /// Scope the robot to a subtree
    #[must_use]
    pub fn root(mut self, root: ElementSpec) -> Self {
        self.root = Some(root);
        self
    }

    /// Use a specific clock
    #[must_use]
    pub fn clock<C: Clock + 'static>(mut self, clock: Arc<C>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use an already type-erased clock
    #[must_use]
    pub fn shared_clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use a specific configuration
    #[must_use]
    pub fn config(mut self, config: RobotConfig) -> Self {
        self.config = config;
        self
    }

    /// Where [`UiRobot::report`] sends failures
    #[must_use]
    pub fn reporter<R: IssueReporter + 'static>(mut self, reporter: R) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    /// Share a reporter with other robots or the test body
    #[must_use]
    pub fn shared_reporter(mut self, reporter: Arc<dyn IssueReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> UiRobot<D> {
        let clock = self.clock.unwrap_or_else(system_clock);
        let poller = Poller::with_interval(clock, self.config.poll_interval());
        let root = self.root.unwrap_or_else(|| self.app.clone());
        UiRobot {
            driver: self.driver,
            app: self.app,
            root,
            config: self.config,
            poller,
            reporter: self.reporter,
        }
    }
}
