//! Property-based tests for resolution and the wait engine.
//!
//! Uses proptest with a fake clock, so time-dependent properties run
//! instantly and deterministically.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use std::time::Duration;
use uirobot::prelude::*;

const TYPES: &[ElementType] = &[
    ElementType::Any,
    ElementType::Button,
    ElementType::Cell,
    ElementType::NavigationBar,
    ElementType::ScrollView,
    ElementType::StaticText,
    ElementType::Table,
    ElementType::TextField,
];

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,9}"
}

fn element_spec() -> impl Strategy<Value = ElementSpec> {
    let steps = prop::collection::vec((identifier(), prop::sample::select(TYPES)), 1..6);
    (any::<bool>(), steps).prop_map(|(from_app_spec, steps)| {
        let mut steps = steps.into_iter();
        let root = if from_app_spec {
            ElementSpec::app()
        } else {
            let (id, ty) = steps.next().unwrap_or_else(|| ("root".to_string(), ElementType::Any));
            ElementSpec::new(id, ty, ElementScope::App)
        };
        steps.fold(root, |parent, (id, ty)| parent.descendant_of_type(id, ty))
    })
}

// === Resolution ===

proptest! {
    /// Resolving the same spec twice yields equivalent handles.
    #[test]
    fn prop_resolution_idempotent(spec in element_spec()) {
        let clock = FakeClock::shared();
        let driver = MockDriver::new(clock.clone());
        let robot = UiRobot::builder(&driver).clock(clock).build();
        prop_assert_eq!(robot.resolve(&spec), robot.resolve(&spec));
    }

    /// The chain of queries issued mirrors the spec's hierarchy path.
    #[test]
    fn prop_resolved_chain_matches_hierarchy_path(spec in element_spec()) {
        let clock = FakeClock::shared();
        let driver = MockDriver::new(clock.clone());
        let robot = UiRobot::builder(&driver).clock(clock).build();
        prop_assert_eq!(robot.resolve(&spec).to_string(), spec.hierarchy_path());
    }

    /// One descendant query per non-application level, never more.
    #[test]
    fn prop_one_query_per_level(spec in element_spec()) {
        let clock = FakeClock::shared();
        let driver = MockDriver::new(clock.clone());
        let robot = UiRobot::builder(&driver).clock(clock).build();
        let handle = robot.resolve(&spec);
        prop_assert_eq!(driver.call_count("descendants"), handle.steps().len());
        prop_assert_eq!(driver.call_count("root_application"), 1);
    }
}

// === Waits ===

proptest! {
    /// An element appearing within the window is found, and no later than
    /// one interval after it appeared.
    #[test]
    fn prop_wait_until_exists_succeeds_within_window(appear_ms in 0u64..=1000) {
        let clock = FakeClock::shared();
        let driver = MockDriver::new(clock.clone());
        let robot = UiRobot::builder(&driver).clock(clock.clone()).build();
        let target = ElementSpec::any("target");
        driver.insert(
            &robot.resolve(&target),
            MockElement::present().appearing_after(Duration::from_millis(appear_ms)),
        );

        prop_assert!(robot.wait_until_exists(&target, Timeout::STANDARD).is_ok());
        prop_assert!(clock.elapsed() >= Duration::from_millis(appear_ms));
        prop_assert!(clock.elapsed() < Duration::from_millis(appear_ms + 50));
    }

    /// An element appearing after the final poll is reported with the
    /// spec and timeout that were used.
    #[test]
    fn prop_wait_until_exists_fails_after_window(appear_ms in 1051u64..5000) {
        let clock = FakeClock::shared();
        let driver = MockDriver::new(clock.clone());
        let robot = UiRobot::builder(&driver).clock(clock).build();
        let target = ElementSpec::any("target");
        driver.insert(
            &robot.resolve(&target),
            MockElement::present().appearing_after(Duration::from_millis(appear_ms)),
        );

        let err = robot.wait_until_exists(&target, Timeout::STANDARD).unwrap_err();
        prop_assert_eq!(err, RobotError::not_found(&target, Timeout::STANDARD));
    }

    /// A condition that already holds never triggers a swipe.
    #[test]
    fn prop_swipe_noop_when_already_satisfied(spec in element_spec(), up in any::<bool>()) {
        let clock = FakeClock::shared();
        let driver = MockDriver::new(clock.clone());
        let robot = UiRobot::builder(&driver).clock(clock).build();
        driver.insert(&robot.resolve(&spec), MockElement::visible());
        let direction = if up { SwipeDirection::Up } else { SwipeDirection::Down };

        prop_assert!(robot.swipe(direction, &spec, conditions::is_hittable).is_ok());
        prop_assert_eq!(driver.swipe_count(), 0);
    }

    /// Swipes stop as soon as the element is revealed.
    #[test]
    fn prop_swipe_count_matches_reveal(swipes in 0u64..50) {
        let clock = FakeClock::shared();
        let driver = MockDriver::new(clock.clone());
        let robot = UiRobot::builder(&driver).clock(clock).build();
        let row = ElementSpec::any("list").descendant_of_type("row", ElementType::Cell);
        driver.insert(&robot.resolve(&row), MockElement::present().revealed_after_swipes(swipes));

        prop_assert!(robot.swipe(SwipeDirection::Up, &row, conditions::is_hittable).is_ok());
        prop_assert_eq!(driver.swipe_count(), swipes);
    }

    /// Error messages always name the spec's hierarchy path and timeout.
    #[test]
    fn prop_error_message_names_path(spec in element_spec(), tenths in 0u32..100) {
        let timeout = Timeout::from_secs(f64::from(tenths) / 10.0);
        let err = RobotError::not_hittable(&spec, timeout);
        let expected = format!("Element '{}' was not hittable within {}s.", spec.hierarchy_path(), timeout);
        prop_assert_eq!(err.to_string(), expected);
    }
}
