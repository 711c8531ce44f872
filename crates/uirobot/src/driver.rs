//! UiDriver - Abstract UI Automation Trait
//!
//! The robot never talks to a platform directly. Everything that touches the
//! live accessibility tree goes through [`UiDriver`], so the same robots run
//! against a native automation bridge, a remote device farm, or the
//! in-memory [`MockDriver`](crate::MockDriver) used in unit tests.
//!
//! # Handles
//!
//! A handle is a *query*, not a node. `descendants` returns immediately and
//! never implies that a matching element exists; existence and hittability
//! are only established by the query methods below, which a driver may
//! evaluate against a freshly rebuilt tree every time.

use crate::spec::ElementType;
use crate::timeout::{GestureVelocity, Timeout};
use std::fmt::Debug;

/// Capabilities a robot needs from the underlying UI automation backend.
///
/// All calls are synchronous: when one returns, its effect on the UI has
/// been dispatched. Backends wrapping an asynchronous protocol must block on
/// completion before returning.
pub trait UiDriver {
    /// Lazy reference to zero or more live elements
    type Handle: Clone + Debug;

    /// Handle for the application under test
    fn root_application(&self) -> Self::Handle;

    /// Query the descendants of `parent` matching type and identifier
    fn descendants(
        &self,
        parent: &Self::Handle,
        element_type: ElementType,
        identifier: &str,
    ) -> Self::Handle;

    /// Whether the element is present right now
    fn exists(&self, handle: &Self::Handle) -> bool;

    /// Wait until the element is present, up to `timeout`
    fn wait_for_existence(&self, handle: &Self::Handle, timeout: Timeout) -> bool;

    /// Wait until the element is gone, up to `timeout`
    fn wait_for_non_existence(&self, handle: &Self::Handle, timeout: Timeout) -> bool;

    /// Whether the element can receive a tap right now
    fn is_hittable(&self, handle: &Self::Handle) -> bool;

    /// Wait until the element can receive a tap, up to `timeout`
    fn wait_for_hittable(&self, handle: &Self::Handle, timeout: Timeout) -> bool;

    /// Tap the element
    fn tap(&self, handle: &Self::Handle);

    /// Type text into the focused element
    fn type_text(&self, handle: &Self::Handle, text: &str);

    /// Swipe up on the element
    fn swipe_up(&self, handle: &Self::Handle, velocity: GestureVelocity);

    /// Swipe down on the element
    fn swipe_down(&self, handle: &Self::Handle, velocity: GestureVelocity);
}

impl<D: UiDriver + ?Sized> UiDriver for &D {
    type Handle = D::Handle;

    fn root_application(&self) -> Self::Handle {
        (**self).root_application()
    }

    fn descendants(
        &self,
        parent: &Self::Handle,
        element_type: ElementType,
        identifier: &str,
    ) -> Self::Handle {
        (**self).descendants(parent, element_type, identifier)
    }

    fn exists(&self, handle: &Self::Handle) -> bool {
        (**self).exists(handle)
    }

    fn wait_for_existence(&self, handle: &Self::Handle, timeout: Timeout) -> bool {
        (**self).wait_for_existence(handle, timeout)
    }

    fn wait_for_non_existence(&self, handle: &Self::Handle, timeout: Timeout) -> bool {
        (**self).wait_for_non_existence(handle, timeout)
    }

    fn is_hittable(&self, handle: &Self::Handle) -> bool {
        (**self).is_hittable(handle)
    }

    fn wait_for_hittable(&self, handle: &Self::Handle, timeout: Timeout) -> bool {
        (**self).wait_for_hittable(handle, timeout)
    }

    fn tap(&self, handle: &Self::Handle) {
        (**self).tap(handle);
    }

    fn type_text(&self, handle: &Self::Handle, text: &str) {
        (**self).type_text(handle, text);
    }

    fn swipe_up(&self, handle: &Self::Handle, velocity: GestureVelocity) {
        (**self).swipe_up(handle, velocity);
    }

    fn swipe_down(&self, handle: &Self::Handle, velocity: GestureVelocity) {
        (**self).swipe_down(handle, velocity);
    }
}
