//! Human-readable hierarchy paths for element specs.
//!
//! The rendered path is embedded verbatim in every [`RobotError`] description,
//! so the format is part of the public contract:
//!
//! | spec                                           | path                       |
//! |------------------------------------------------|----------------------------|
//! | application, no identifier                     | `app`                      |
//! | application `com.example`                     | `app(com.example)`         |
//! | `root` (any) below app                         | `app.root`                 |
//! | `Button[ok]` below `Sheet[confirm]` below app  | `app.Sheet[confirm].Button[ok]` |
//!
//! [`RobotError`]: crate::RobotError

use crate::spec::{ElementScope, ElementSpec};

const APP_SEGMENT: &str = "app";
const SEPARATOR: &str = ".";

impl ElementSpec {
    /// Render the spec and its ancestry as a dotted path.
    #[must_use]
    pub fn hierarchy_path(&self) -> String {
        hierarchy_path(self)
    }
}

/// Render `spec` as a dotted hierarchy path. Pure and total.
#[must_use]
pub fn hierarchy_path(spec: &ElementSpec) -> String {
    if spec.element_type().is_application() {
        return if spec.identifier().is_empty() {
            APP_SEGMENT.to_string()
        } else {
            format!("{APP_SEGMENT}({})", spec.identifier())
        };
    }

    let head = match spec.scope() {
        ElementScope::App => APP_SEGMENT.to_string(),
        ElementScope::DescendantOf(parent) => hierarchy_path(parent),
    };
    let tail = segment(spec);

    [head, tail]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn segment(spec: &ElementSpec) -> String {
    let name = spec.element_type().name();
    if name.is_empty() {
        spec.identifier().to_string()
    } else {
        format!("{name}[{}]", spec.identifier())
    }
}
