//! Screen robots
//!
//! A screen robot wraps a [`UiRobot`] scoped to one screen or component and
//! exposes that screen's elements and flows as methods, so tests read as
//! user intent rather than element lookups.
//!
//! ```
//! use uirobot::{ElementSpec, ElementType, FakeClock, MockDriver, RobotResult, ScreenRobot, Timeout, UiRobot};
//!
//! struct LoginScreen<'a> {
//!     robot: UiRobot<&'a MockDriver>,
//! }
//!
//! impl<'a> ScreenRobot for LoginScreen<'a> {
//!     type Driver = &'a MockDriver;
//!
//!     fn robot(&self) -> &UiRobot<&'a MockDriver> {
//!         &self.robot
//!     }
//! }
//!
//! impl LoginScreen<'_> {
//!     fn sign_in(&self, email: &str) -> RobotResult<()> {
//!         let field = self.element_of_type("email", ElementType::TextField);
//!         self.robot().enter_text(email, &field)
//!     }
//! }
//!
//! let clock = FakeClock::shared();
//! let driver = MockDriver::new(clock.clone());
//! let app = UiRobot::builder(&driver).clock(clock).build();
//! let login = LoginScreen { robot: app.with_root(ElementSpec::any("login-screen")) };
//!
//! assert_eq!(login.element("submit").hierarchy_path(), "app.login-screen.submit");
//! assert!(login.sign_in("someone@example.com").is_err());
//! ```

use crate::driver::UiDriver;
use crate::result::RobotResult;
use crate::robot::UiRobot;
use crate::spec::{ElementSpec, ElementType};
use crate::timeout::Timeout;

/// A robot for one screen, rooted at that screen's container element.
pub trait ScreenRobot {
    /// Driver the underlying robot talks to
    type Driver: UiDriver;

    /// The robot scoped to this screen
    fn robot(&self) -> &UiRobot<Self::Driver>;

    /// Container element of the screen; defaults to the robot's root
    fn root(&self) -> &ElementSpec {
        self.robot().root()
    }

    /// Screen name for logging/debugging
    fn screen_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Element of any type inside the screen
    fn element(&self, identifier: &str) -> ElementSpec {
        self.root().descendant(identifier)
    }

    /// Element of a given type inside the screen
    fn element_of_type(&self, identifier: &str, element_type: ElementType) -> ElementSpec {
        self.root().descendant_of_type(identifier, element_type)
    }

    /// Wait for the screen container to appear
    fn wait_until_displayed(&self, timeout: Timeout) -> RobotResult<()> {
        tracing::debug!(screen = self.screen_name(), "waiting for screen");
        self.robot().wait_until_exists(self.root(), timeout)
    }

    /// Wait for the screen container to go away, e.g. after dismissing it
    fn wait_until_dismissed(&self, timeout: Timeout) -> RobotResult<()> {
        self.robot().wait_until_not_existing(self.root(), timeout)
    }

    /// Whether the screen container is present right now
    fn is_displayed(&self) -> bool {
        let robot = self.robot();
        let resolved = robot.resolve(self.root());
        robot.driver().exists(&resolved)
    }
}
