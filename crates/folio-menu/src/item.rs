//! Menu item handles.
//!
//! An `ItemHandle` is owned by whatever renders the item. Menus only keep
//! `WeakItem`s, so dropping the last handle is enough to take the item out of
//! every roster it was registered in.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use folio_core::{ParseError, Role, Semantics};

static ITEM_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a menu item, reported to selection listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    fn next() -> Self {
        Self(ITEM_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ItemRole {
    #[default]
    MenuItem,
    Checkbox,
    Radio,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkTarget {
    Blank,
    #[default]
    Self_,
    Parent,
    Top,
}

impl FromStr for LinkTarget {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "_blank" => Ok(LinkTarget::Blank),
            "_self" => Ok(LinkTarget::Self_),
            "_parent" => Ok(LinkTarget::Parent),
            "_top" => Ok(LinkTarget::Top),
            other => Err(ParseError::unknown("link target", other)),
        }
    }
}

/// What activating the item does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Plain(ItemRole),
    /// Opens a nested menu instead of selecting.
    Submenu,
    Link { href: String, target: LinkTarget },
}

impl ItemKind {
    pub fn role(&self) -> Role {
        match self {
            ItemKind::Plain(ItemRole::MenuItem) | ItemKind::Submenu => Role::MenuItem,
            ItemKind::Plain(ItemRole::Checkbox) => Role::MenuItemCheckbox,
            ItemKind::Plain(ItemRole::Radio) => Role::MenuItemRadio,
            ItemKind::Link { .. } => Role::Link,
        }
    }
}

pub(crate) struct ItemInner {
    id: ItemId,
    label: RefCell<String>,
    kind: ItemKind,
    disabled: Cell<bool>,
    keep_open: bool,
    selected: Cell<bool>,
    order: Option<i32>,
    focused: Cell<bool>,
    tab_index: Cell<i32>,
    on_select: Option<Rc<dyn Fn(&ItemHandle)>>,
}

#[derive(Clone)]
pub struct ItemHandle(Rc<ItemInner>);

#[derive(Clone)]
pub struct WeakItem(Weak<ItemInner>);

impl ItemHandle {
    pub fn builder(label: impl Into<String>) -> ItemBuilder {
        ItemBuilder::new(label)
    }

    /// Plain `menuitem` with default flags.
    pub fn new(label: impl Into<String>) -> Self {
        ItemBuilder::new(label).build()
    }

    pub fn id(&self) -> ItemId {
        self.0.id
    }

    pub fn label(&self) -> String {
        self.0.label.borrow().clone()
    }

    pub fn set_label(&self, label: impl Into<String>) {
        *self.0.label.borrow_mut() = label.into();
    }

    pub(crate) fn label_starts_with(&self, lowercase_prefix: &str) -> bool {
        self.0
            .label
            .borrow()
            .trim_start()
            .to_lowercase()
            .starts_with(lowercase_prefix)
    }

    pub fn kind(&self) -> &ItemKind {
        &self.0.kind
    }

    pub fn is_submenu(&self) -> bool {
        matches!(self.0.kind, ItemKind::Submenu)
    }

    pub fn is_disabled(&self) -> bool {
        self.0.disabled.get()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.0.disabled.set(disabled);
    }

    pub fn keep_open(&self) -> bool {
        self.0.keep_open
    }

    pub fn is_selected(&self) -> bool {
        self.0.selected.get()
    }

    pub fn set_selected(&self, selected: bool) {
        self.0.selected.set(selected);
    }

    pub fn order(&self) -> Option<i32> {
        self.0.order
    }

    pub fn is_focused(&self) -> bool {
        self.0.focused.get()
    }

    pub(crate) fn set_focused(&self, focused: bool) {
        self.0.focused.set(focused);
    }

    /// Roving tab index assigned by the owning roster.
    pub fn tab_index(&self) -> i32 {
        self.0.tab_index.get()
    }

    pub(crate) fn set_tab_index(&self, tab_index: i32) {
        self.0.tab_index.set(tab_index);
    }

    pub(crate) fn on_select(&self) -> Option<Rc<dyn Fn(&ItemHandle)>> {
        self.0.on_select.clone()
    }

    pub fn downgrade(&self) -> WeakItem {
        WeakItem(Rc::downgrade(&self.0))
    }

    pub fn ptr_eq(&self, other: &ItemHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn semantics(&self) -> Semantics {
        Semantics {
            label: Some(self.label()),
            focused: self.is_focused(),
            enabled: !self.is_disabled(),
            selected: self.is_selected(),
            has_popup: self.is_submenu(),
            tab_index: self.tab_index(),
            ..Semantics::new(self.0.kind.role())
        }
    }
}

impl PartialEq for ItemHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ItemHandle {}

impl fmt::Debug for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemHandle")
            .field("id", &self.0.id)
            .field("label", &*self.0.label.borrow())
            .field("kind", &self.0.kind)
            .field("disabled", &self.0.disabled.get())
            .finish()
    }
}

impl WeakItem {
    pub fn upgrade(&self) -> Option<ItemHandle> {
        self.0.upgrade().map(ItemHandle)
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub fn points_to(&self, item: &ItemHandle) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&item.0))
    }
}

impl fmt::Debug for WeakItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(item) => write!(f, "WeakItem({:?})", item.id()),
            None => f.write_str("WeakItem(<dropped>)"),
        }
    }
}

pub struct ItemBuilder {
    label: String,
    kind: ItemKind,
    disabled: bool,
    keep_open: bool,
    selected: bool,
    order: Option<i32>,
    on_select: Option<Rc<dyn Fn(&ItemHandle)>>,
}

impl ItemBuilder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ItemKind::Plain(ItemRole::MenuItem),
            disabled: false,
            keep_open: false,
            selected: false,
            order: None,
            on_select: None,
        }
    }

    pub fn role(mut self, role: ItemRole) -> Self {
        self.kind = ItemKind::Plain(role);
        self
    }

    pub fn submenu(mut self) -> Self {
        self.kind = ItemKind::Submenu;
        self
    }

    pub fn link(mut self, href: impl Into<String>, target: LinkTarget) -> Self {
        self.kind = ItemKind::Link {
            href: href.into(),
            target,
        };
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn keep_open(mut self, keep_open: bool) -> Self {
        self.keep_open = keep_open;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Visual position among siblings. Rosters insert hinted items in hint
    /// order instead of mount order.
    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn on_select(mut self, f: impl Fn(&ItemHandle) + 'static) -> Self {
        self.on_select = Some(Rc::new(f));
        self
    }

    pub fn build(self) -> ItemHandle {
        ItemHandle(Rc::new(ItemInner {
            id: ItemId::next(),
            label: RefCell::new(self.label),
            kind: self.kind,
            disabled: Cell::new(self.disabled),
            keep_open: self.keep_open,
            selected: Cell::new(self.selected),
            order: self.order,
            focused: Cell::new(false),
            tab_index: Cell::new(-1),
            on_select: self.on_select,
        }))
    }
}
