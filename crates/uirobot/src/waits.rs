//! Short-circuiting existence checks and reusable element conditions.

use crate::driver::UiDriver;
use crate::timeout::Timeout;

/// "Already true, or becomes true within the timeout" checks for any driver.
///
/// The immediate query runs first so a satisfied state never pays for the
/// driver's wait machinery.
pub trait DriverExt: UiDriver {
    /// Present now, or appears within `timeout`
    fn exists_after(&self, handle: &Self::Handle, timeout: Timeout) -> bool {
        self.exists(handle) || self.wait_for_existence(handle, timeout)
    }

    /// Absent now, or disappears within `timeout`
    fn not_exists_after(&self, handle: &Self::Handle, timeout: Timeout) -> bool {
        !self.exists(handle) || self.wait_for_non_existence(handle, timeout)
    }

    /// Hittable now, or becomes hittable within `timeout`
    fn is_hittable_after(&self, handle: &Self::Handle, timeout: Timeout) -> bool {
        self.is_hittable(handle) || self.wait_for_hittable(handle, timeout)
    }
}

impl<D: UiDriver + ?Sized> DriverExt for D {}

/// Ready-made conditions for [`UiRobot::swipe`](crate::UiRobot::swipe) and
/// [`UiRobot::wait_until`](crate::UiRobot::wait_until).
pub mod conditions {
    use crate::driver::UiDriver;

    /// Element is present
    pub fn exists<D: UiDriver>(driver: &D, handle: &D::Handle) -> bool {
        driver.exists(handle)
    }

    /// Element is absent
    pub fn not_exists<D: UiDriver>(driver: &D, handle: &D::Handle) -> bool {
        !driver.exists(handle)
    }

    /// Element can receive a tap
    pub fn is_hittable<D: UiDriver>(driver: &D, handle: &D::Handle) -> bool {
        driver.is_hittable(handle)
    }
}
