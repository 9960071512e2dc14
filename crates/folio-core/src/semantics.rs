/// High‑level semantic role of a widget, similar to ARIA roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Menu,
    MenuItem,
    MenuItemCheckbox,
    MenuItemRadio,
    Link,
    Group,
    Button,
    TabList,
    Tab,
}

impl Role {
    /// The ARIA `role` attribute value.
    pub fn aria(self) -> &'static str {
        match self {
            Role::Menu => "menu",
            Role::MenuItem => "menuitem",
            Role::MenuItemCheckbox => "menuitemcheckbox",
            Role::MenuItemRadio => "menuitemradio",
            Role::Link => "link",
            Role::Group => "group",
            Role::Button => "button",
            Role::TabList => "tablist",
            Role::Tab => "tab",
        }
    }
}

/// Accessibility snapshot of a widget, used by renderers to emit attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Semantics {
    /// Primary role of this node (what kind of thing it is).
    pub role: Role,
    /// Human‑readable label for screen readers.
    pub label: Option<String>,
    /// Whether this node currently holds focus.
    pub focused: bool,
    /// Whether this node is actionable; disabled nodes remain in the tree
    /// but are marked not enabled.
    pub enabled: bool,
    /// `aria-selected` / `aria-pressed`.
    pub selected: bool,
    /// `aria-expanded`, for nodes that own a popup.
    pub expanded: Option<bool>,
    /// `aria-hidden`.
    pub hidden: bool,
    /// `aria-haspopup`.
    pub has_popup: bool,
    /// Roving `tabIndex` (0 reachable by Tab, -1 only programmatically).
    pub tab_index: i32,
}

impl Semantics {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            label: None,
            focused: false,
            enabled: true,
            selected: false,
            expanded: None,
            hidden: false,
            has_popup: false,
            tab_index: -1,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
