//! Proptest strategies for element specs.
//!
//! Enabled with the `proptest` feature so downstream robot suites can fuzz
//! their own screen definitions:
//!
//! ```rust,ignore
//! proptest! {
//!     #[test]
//!     fn prop_paths_are_stable(spec in any_element_spec()) {
//!         prop_assert_eq!(spec.hierarchy_path(), spec.clone().hierarchy_path());
//!     }
//! }
//! ```

use crate::spec::{ElementScope, ElementSpec, ElementType};
use proptest::prelude::*;

const SAMPLE_TYPES: &[ElementType] = &[
    ElementType::Any,
    ElementType::Button,
    ElementType::Cell,
    ElementType::CheckBox,
    ElementType::ScrollView,
    ElementType::StaticText,
    ElementType::Table,
    ElementType::TextField,
];

/// Accessibility-identifier-like strings, never empty
pub fn plain_identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

/// Any non-application element category
pub fn any_element_type() -> impl Strategy<Value = ElementType> {
    prop::sample::select(SAMPLE_TYPES)
}

/// Specs up to five levels deep, rooted either at the app spec or directly
/// in app scope
pub fn any_element_spec() -> impl Strategy<Value = ElementSpec> {
    let root = prop_oneof![
        Just(ElementSpec::app()),
        (plain_identifier(), any_element_type())
            .prop_map(|(id, ty)| ElementSpec::new(id, ty, ElementScope::App)),
    ];
    let steps = prop::collection::vec((plain_identifier(), any_element_type()), 0..5);

    (root, steps).prop_map(|(root, steps)| {
        steps
            .into_iter()
            .fold(root, |parent, (id, ty)| parent.descendant_of_type(id, ty))
    })
}
