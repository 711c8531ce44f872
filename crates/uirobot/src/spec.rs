//! Declarative element specifications.
//!
//! An [`ElementSpec`] describes *which* element a robot wants to talk to,
//! not a live reference to it. Specs are plain data: they can be built long
//! before the element exists, compared structurally, and rendered into a
//! stable hierarchy path for failure messages.
//!
//! ```
//! use uirobot::{ElementSpec, ElementType};
//!
//! let list = ElementSpec::app().descendant_of_type("inbox", ElementType::Table);
//! let row = list.descendant_of_type("message-42", ElementType::Cell);
//!
//! assert_eq!(row.hierarchy_path(), "app.Table[inbox].Cell[message-42]");
//! ```

use std::sync::Arc;

/// Category of a node in the accessibility tree.
///
/// `Any` matches every category and has no display name. `Application` is
/// the sentinel for the application itself and never takes part in a
/// descendant search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementType {
    /// Wildcard, matches any category
    #[default]
    Any,
    /// The application root
    Application,
    /// Spinner shown while work is in progress
    ActivityIndicator,
    /// Modal alert
    Alert,
    /// Push button
    Button,
    /// Row or item of a table or collection
    Cell,
    /// Check box
    CheckBox,
    /// Grid or list of cells
    CollectionView,
    /// Date and time picker
    DatePicker,
    /// Dialog window
    Dialog,
    /// Grouping container
    Group,
    /// Home screen or dock icon
    Icon,
    /// Image view
    Image,
    /// Software keyboard key
    Key,
    /// Software keyboard
    Keyboard,
    /// Hyperlink
    Link,
    /// Map view
    Map,
    /// Menu
    Menu,
    /// Entry in a menu
    MenuItem,
    /// Navigation bar
    NavigationBar,
    /// Element with no more specific category
    Other,
    /// Page dots
    PageIndicator,
    /// Picker
    Picker,
    /// Single wheel of a picker
    PickerWheel,
    /// Determinate progress bar
    ProgressIndicator,
    /// Scrollable container
    ScrollView,
    /// Search field
    SearchField,
    /// Password field
    SecureTextField,
    /// Segmented control
    SegmentedControl,
    /// Action or share sheet
    Sheet,
    /// Slider
    Slider,
    /// Label
    StaticText,
    /// System status bar
    StatusBar,
    /// Increment/decrement stepper
    Stepper,
    /// On/off switch
    Switch,
    /// Single tab
    Tab,
    /// Tab bar
    TabBar,
    /// Table view
    Table,
    /// Single-line text input
    TextField,
    /// Multi-line text input
    TextView,
    /// Toggle
    Toggle,
    /// Toolbar
    Toolbar,
    /// Embedded web content
    WebView,
    /// Top-level window
    Window,
}

impl ElementType {
    /// Display name used in hierarchy paths. Empty for [`ElementType::Any`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Application => "Application",
            Self::ActivityIndicator => "ActivityIndicator",
            Self::Alert => "Alert",
            Self::Button => "Button",
            Self::Cell => "Cell",
            Self::CheckBox => "CheckBox",
            Self::CollectionView => "CollectionView",
            Self::DatePicker => "DatePicker",
            Self::Dialog => "Dialog",
            Self::Group => "Group",
            Self::Icon => "Icon",
            Self::Image => "Image",
            Self::Key => "Key",
            Self::Keyboard => "Keyboard",
            Self::Link => "Link",
            Self::Map => "Map",
            Self::Menu => "Menu",
            Self::MenuItem => "MenuItem",
            Self::NavigationBar => "NavigationBar",
            Self::Other => "Other",
            Self::PageIndicator => "PageIndicator",
            Self::Picker => "Picker",
            Self::PickerWheel => "PickerWheel",
            Self::ProgressIndicator => "ProgressIndicator",
            Self::ScrollView => "ScrollView",
            Self::SearchField => "SearchField",
            Self::SecureTextField => "SecureTextField",
            Self::SegmentedControl => "SegmentedControl",
            Self::Sheet => "Sheet",
            Self::Slider => "Slider",
            Self::StaticText => "StaticText",
            Self::StatusBar => "StatusBar",
            Self::Stepper => "Stepper",
            Self::Switch => "Switch",
            Self::Tab => "Tab",
            Self::TabBar => "TabBar",
            Self::Table => "Table",
            Self::TextField => "TextField",
            Self::TextView => "TextView",
            Self::Toggle => "Toggle",
            Self::Toolbar => "Toolbar",
            Self::WebView => "WebView",
            Self::Window => "Window",
        }
    }

    /// Whether this is the application sentinel
    #[must_use]
    pub const fn is_application(self) -> bool {
        matches!(self, Self::Application)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Where an element is searched for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementScope {
    /// Among all descendants of the application
    App,
    /// Among the descendants of another element
    DescendantOf(Arc<ElementSpec>),
}

impl ElementScope {
    /// Parent spec, if scoped below another element
    #[must_use]
    pub fn parent(&self) -> Option<&ElementSpec> {
        match self {
            Self::App => None,
            Self::DescendantOf(parent) => Some(parent),
        }
    }
}

/// Immutable description of an element and its ancestry.
///
/// Cloning is cheap: ancestors are shared, never copied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementSpec {
    identifier: String,
    element_type: ElementType,
    scope: ElementScope,
}

impl ElementSpec {
    /// Create a spec from its parts
    #[must_use]
    pub fn new(identifier: impl Into<String>, element_type: ElementType, scope: ElementScope) -> Self {
        Self {
            identifier: identifier.into(),
            element_type,
            scope,
        }
    }

    /// Create a wildcard-typed spec searched from the application root
    #[must_use]
    pub fn any(identifier: impl Into<String>) -> Self {
        Self::new(identifier, ElementType::Any, ElementScope::App)
    }

    /// The application under test
    #[must_use]
    pub fn app() -> Self {
        Self::application("")
    }

    /// An application identified by bundle identifier, e.g. system UI
    #[must_use]
    pub fn application(bundle_identifier: impl Into<String>) -> Self {
        Self::new(bundle_identifier, ElementType::Application, ElementScope::App)
    }

    /// A wildcard-typed descendant of this element
    #[must_use]
    pub fn descendant(&self, identifier: impl Into<String>) -> Self {
        self.descendant_of_type(identifier, ElementType::Any)
    }

    /// A typed descendant of this element
    #[must_use]
    pub fn descendant_of_type(&self, identifier: impl Into<String>, element_type: ElementType) -> Self {
        Self::new(
            identifier,
            element_type,
            ElementScope::DescendantOf(Arc::new(self.clone())),
        )
    }

    /// Accessibility identifier
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Element category
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Search scope
    #[must_use]
    pub const fn scope(&self) -> &ElementScope {
        &self.scope
    }

    /// Parent spec, if any
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.scope.parent()
    }

    /// Number of ancestors between this spec and the application root
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(parent) = current {
            depth += 1;
            current = parent.parent();
        }
        depth
    }
}

impl std::fmt::Display for ElementSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hierarchy_path())
    }
}
