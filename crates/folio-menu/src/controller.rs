//! # Menu controller
//!
//! Owns one menu's state and is the only thing that mutates it. Items,
//! submenus and the host all talk to a cloned `MenuController` handle that is
//! passed to them explicitly; timers and frame callbacks hold a `WeakMenu`.
//!
//! States are just closed and open:
//!
//! - `show()` opens, repositions, and on the next frame applies the
//!   `default_focus` policy if the menu is still open by then.
//! - `hide()` closes, clears focus and the typeahead buffer, and closes any
//!   open submenu.
//!
//! # Failure Modes
//!
//! None surface as errors. Showing an open menu, hiding a closed one,
//! unregistering an unknown item, selecting a disabled or foreign item and
//! clearing a timer that already fired are all no-ops.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_core::{Key, KeyEvent, Role, Scheduler, Semantics, Signal, TimerId, scoped_effect};

use crate::config::MenuConfig;
use crate::item::{ItemHandle, WeakItem};
use crate::keyboard::{KeyAction, KeyboardRouter};
use crate::position::{Measure, MenuPosition, MenuPositioner};
use crate::roster::{FocusRoster, OpenFocus};
use crate::shared::{CloseReason, FocusState};
use crate::typeahead::Typeahead;

pub type SelectListener = Rc<dyn Fn(&ItemHandle)>;
pub type CloseListener = Rc<dyn Fn(CloseReason)>;

struct MenuInner {
    config: MenuConfig,
    scheduler: Rc<Scheduler>,
    measure: RefCell<Option<Rc<dyn Measure>>>,
    open: Signal<bool>,
    /// Bumped on every `show`, so a frame callback from an earlier opening
    /// can tell it is stale.
    generation: Cell<u64>,
    positioner: RefCell<MenuPositioner>,
    roster: RefCell<FocusRoster>,
    typeahead: RefCell<Typeahead>,
    list_root_focused: Cell<bool>,
    selected: RefCell<Option<ItemHandle>>,
    pending_timer: Cell<Option<TimerId>>,
    submenus: RefCell<Vec<(WeakItem, WeakMenu)>>,
    /// Set on submenus; selections propagate up through it.
    parent: RefCell<Option<WeakMenu>>,
    on_select: RefCell<Vec<SelectListener>>,
    on_close: RefCell<Vec<CloseListener>>,
}

#[derive(Clone)]
pub struct MenuController {
    inner: Rc<MenuInner>,
}

#[derive(Clone)]
pub struct WeakMenu(Weak<MenuInner>);

impl WeakMenu {
    pub fn upgrade(&self) -> Option<MenuController> {
        self.0.upgrade().map(|inner| MenuController { inner })
    }
}

impl MenuController {
    pub fn new(config: MenuConfig, scheduler: Rc<Scheduler>) -> Self {
        let open = config.open;
        let inner = MenuInner {
            positioner: RefCell::new(MenuPositioner::new(config.position_options())),
            typeahead: RefCell::new(Typeahead::new(config.typeahead_window)),
            config,
            scheduler,
            measure: RefCell::new(None),
            open: Signal::new(open),
            generation: Cell::new(0),
            roster: RefCell::new(FocusRoster::new()),
            list_root_focused: Cell::new(false),
            selected: RefCell::new(None),
            pending_timer: Cell::new(None),
            submenus: RefCell::new(Vec::new()),
            parent: RefCell::new(None),
            on_select: RefCell::new(Vec::new()),
            on_close: RefCell::new(Vec::new()),
        };
        Self {
            inner: Rc::new(inner),
        }
    }

    pub fn downgrade(&self) -> WeakMenu {
        WeakMenu(Rc::downgrade(&self.inner))
    }

    pub fn ptr_eq(&self, other: &MenuController) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn config(&self) -> &MenuConfig {
        &self.inner.config
    }

    pub fn scheduler(&self) -> &Rc<Scheduler> {
        &self.inner.scheduler
    }

    /// Renderer hint: whether open/close should animate.
    pub fn animates(&self) -> bool {
        !self.inner.config.quick
    }

    /// Renderer hint: let submenus spill outside the surface.
    pub fn has_overflow(&self) -> bool {
        self.inner.config.has_overflow
    }

    // ---- open state -------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.inner.open.get()
    }

    /// Observable open state, for `aria-expanded` and visibility.
    pub fn open_signal(&self) -> Signal<bool> {
        self.inner.open.clone()
    }

    pub fn show(&self) {
        self.show_with_focus(self.inner.config.default_focus);
    }

    /// Opens and applies `focus` instead of the configured default focus.
    /// Keyboard-opened submenus use this to land on their first item.
    pub fn show_with_focus(&self, focus: FocusState) {
        if self.is_open() {
            return;
        }
        self.inner.typeahead.borrow_mut().reset();
        self.inner.list_root_focused.set(false);
        let generation = self.inner.generation.get().wrapping_add(1);
        self.inner.generation.set(generation);

        log::debug!("menu opening (focus policy {focus})");
        self.inner.open.set(true);
        self.update_position();

        // Items mount with the surface; focus them once they exist.
        let weak = self.downgrade();
        self.inner.scheduler.request_frame(move || {
            let Some(menu) = weak.upgrade() else { return };
            if !menu.is_open() || menu.inner.generation.get() != generation {
                log::trace!("deferred open focus skipped: menu closed or reopened");
                return;
            }
            menu.apply_open_focus(focus);
        });
    }

    fn apply_open_focus(&self, focus: FocusState) {
        let outcome = self.inner.roster.borrow_mut().apply_open_policy(focus);
        match outcome {
            OpenFocus::ListRoot => self.inner.list_root_focused.set(true),
            OpenFocus::Item(_) => self.inner.list_root_focused.set(false),
            OpenFocus::Unchanged => {}
        }
        log::trace!("open focus applied: {outcome:?}");
    }

    pub fn hide(&self) {
        if !self.is_open() {
            return;
        }
        // A pending hover timer must not reopen a submenu under a closed menu.
        self.clear_timeout();
        for child in self.submenu_controllers() {
            child.hide();
        }
        self.inner.roster.borrow_mut().set_focus_index(None);
        self.inner.list_root_focused.set(false);
        self.inner.typeahead.borrow_mut().reset();

        log::debug!("menu closed");
        self.inner.open.set(false);
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.hide();
        } else {
            self.show();
        }
    }

    /// Hides and tells close listeners why. Returns `false` if already closed.
    pub fn close(&self, reason: CloseReason) -> bool {
        if !self.is_open() {
            return false;
        }
        self.hide();
        let listeners = self.inner.on_close.borrow().clone();
        for l in listeners {
            l(reason);
        }
        true
    }

    pub fn handle_outside_click(&self) -> bool {
        if self.inner.config.stay_open_on_outside_click {
            return false;
        }
        self.close(CloseReason::OutsideClick)
    }

    pub fn handle_focus_out(&self) -> bool {
        if self.inner.config.stay_open_on_focusout {
            return false;
        }
        self.close(CloseReason::FocusOut)
    }

    // ---- position ---------------------------------------------------------

    pub fn set_measure(&self, measure: Rc<dyn Measure>) {
        *self.inner.measure.borrow_mut() = Some(measure);
        if self.is_open() {
            self.update_position();
        }
    }

    /// Re-measures and recomputes the placement. Without a measure capability
    /// or before the elements are measurable this keeps the old placement.
    pub fn update_position(&self) -> bool {
        let measure = self.inner.measure.borrow().clone();
        match measure {
            Some(m) => self.inner.positioner.borrow_mut().update_from(&*m),
            None => false,
        }
    }

    pub fn position(&self) -> MenuPosition {
        self.inner.positioner.borrow().position()
    }

    // ---- items ------------------------------------------------------------

    /// Adds an item to the roster. Duplicate registration is ignored.
    pub fn register_item(&self, item: &ItemHandle) -> bool {
        let added = self.inner.roster.borrow_mut().register(item);
        if added {
            log::trace!("item {:?} registered", item.id());
        }
        added
    }

    pub fn unregister_item(&self, item: &ItemHandle) -> bool {
        let removed = self.inner.roster.borrow_mut().unregister(item);
        if removed {
            log::trace!("item {:?} unregistered", item.id());
            self.inner
                .submenus
                .borrow_mut()
                .retain(|(trigger, _)| !trigger.points_to(item));
        }
        removed
    }

    /// Registers `item` and unregisters it when the current `Scope` is
    /// disposed (the item's subtree unmounts).
    pub fn mount_item(&self, item: &ItemHandle) -> bool {
        let added = self.register_item(item);
        if added {
            let menu = self.downgrade();
            let weak_item = item.downgrade();
            scoped_effect(move || {
                Box::new(move || {
                    if let (Some(menu), Some(item)) = (menu.upgrade(), weak_item.upgrade()) {
                        menu.unregister_item(&item);
                    }
                })
            });
        }
        added
    }

    /// Live items in roster order.
    pub fn items(&self) -> Vec<ItemHandle> {
        let mut roster = self.inner.roster.borrow_mut();
        roster.prune();
        roster.items()
    }

    pub fn is_registered(&self, item: &ItemHandle) -> bool {
        self.inner.roster.borrow().contains(item)
    }

    // ---- focus ------------------------------------------------------------

    pub fn focus_index(&self) -> Option<usize> {
        let mut roster = self.inner.roster.borrow_mut();
        roster.prune();
        roster.focus_index()
    }

    pub fn focused_item(&self) -> Option<ItemHandle> {
        let mut roster = self.inner.roster.borrow_mut();
        roster.prune();
        roster.focused_item()
    }

    /// Moves item focus. Out-of-range indices are ignored.
    pub fn focus_item_at(&self, index: usize) -> bool {
        let moved = self.inner.roster.borrow_mut().set_focus_index(Some(index));
        if moved {
            self.inner.list_root_focused.set(false);
        }
        moved
    }

    pub fn is_list_root_focused(&self) -> bool {
        self.inner.list_root_focused.get()
    }

    // ---- selection --------------------------------------------------------

    pub fn selected_item(&self) -> Option<ItemHandle> {
        self.inner.selected.borrow().clone()
    }

    pub fn on_select(&self, f: impl Fn(&ItemHandle) + 'static) {
        self.inner.on_select.borrow_mut().push(Rc::new(f));
    }

    pub fn on_close(&self, f: impl Fn(CloseReason) + 'static) {
        self.inner.on_close.borrow_mut().push(Rc::new(f));
    }

    /// Records the selection, notifies the item and the listeners, then closes
    /// unless the item is keep-open. Returns `false` when ignored.
    ///
    /// In a submenu the selection also reaches every ancestor menu (recorded
    /// and reported to its listeners), and closing takes down the whole menu
    /// tree, innermost first.
    pub fn select_item(&self, item: &ItemHandle) -> bool {
        if item.is_disabled() || !self.is_registered(item) {
            log::trace!("select ignored for {:?}", item.id());
            return false;
        }
        log::debug!("item {:?} selected", item.id());
        if let Some(cb) = item.on_select() {
            cb(item);
        }

        let chain = self.menu_chain();
        for menu in &chain {
            *menu.inner.selected.borrow_mut() = Some(item.clone());
            let listeners = menu.inner.on_select.borrow().clone();
            for l in listeners {
                l(item);
            }
        }

        if !item.keep_open() {
            for menu in &chain {
                menu.close(CloseReason::ClickSelection);
            }
        }
        true
    }

    /// This menu followed by its ancestors, root last.
    fn menu_chain(&self) -> Vec<MenuController> {
        let mut chain = vec![self.clone()];
        while let Some(parent) = chain.last().and_then(MenuController::parent) {
            chain.push(parent);
        }
        chain
    }

    /// The menu this one is a submenu of.
    pub fn parent(&self) -> Option<MenuController> {
        self.inner.parent.borrow().as_ref().and_then(WeakMenu::upgrade)
    }

    /// Clicks the item at `index`: submenu triggers open their menu, anything
    /// else is selected.
    pub fn activate_index(&self, index: usize) -> bool {
        let Some(item) = self.items().get(index).cloned() else {
            return false;
        };
        if item.is_submenu() {
            self.open_submenu_at(index)
        } else {
            self.select_item(&item)
        }
    }

    // ---- submenus ---------------------------------------------------------

    pub(crate) fn attach_submenu(&self, trigger: &ItemHandle, child: &MenuController) {
        let mut submenus = self.inner.submenus.borrow_mut();
        submenus.retain(|(t, m)| t.is_alive() && m.upgrade().is_some());
        submenus.push((trigger.downgrade(), child.downgrade()));
        *child.inner.parent.borrow_mut() = Some(self.downgrade());
    }

    fn submenu_controllers(&self) -> Vec<MenuController> {
        self.inner
            .submenus
            .borrow()
            .iter()
            .filter(|(t, _)| t.is_alive())
            .filter_map(|(_, m)| m.upgrade())
            .collect()
    }

    fn submenu_for(&self, trigger: &ItemHandle) -> Option<MenuController> {
        self.inner
            .submenus
            .borrow()
            .iter()
            .find(|(t, _)| t.points_to(trigger))
            .and_then(|(_, m)| m.upgrade())
    }

    /// The currently open child menu, if any.
    pub fn open_submenu(&self) -> Option<MenuController> {
        self.submenu_controllers().into_iter().find(|m| m.is_open())
    }

    /// Opens the submenu behind the item at `index`, focusing its first item.
    pub fn open_submenu_at(&self, index: usize) -> bool {
        let Some(trigger) = self.items().get(index).cloned() else {
            return false;
        };
        if trigger.is_disabled() {
            return false;
        }
        let Some(child) = self.submenu_for(&trigger) else {
            log::warn!("item {:?} is a submenu trigger without a menu", trigger.id());
            return false;
        };
        for other in self.submenu_controllers() {
            if !other.ptr_eq(&child) {
                other.hide();
            }
        }
        self.focus_item_at(index);
        child.show_with_focus(FocusState::FirstItem);
        true
    }

    // ---- keyboard ---------------------------------------------------------

    /// Handles a key press while the menu is open. Returns whether the key was
    /// claimed (the host should then suppress its default action).
    ///
    /// An open submenu sees the key first. Printable characters feed the
    /// typeahead; everything else goes through `KeyboardRouter`.
    pub fn handle_key(&self, event: &KeyEvent) -> bool {
        if !self.is_open() {
            return false;
        }
        let router = KeyboardRouter::from_locals();

        if let Some(child) = self.open_submenu() {
            let leaves = event.key == Key::Escape || event.key == router.back_key();
            if leaves && child.open_submenu().is_none() {
                child.close(CloseReason::Keydown(event.key));
                if let Some(i) = self.trigger_index_of(&child) {
                    self.focus_item_at(i);
                }
                return true;
            }
            return child.handle_key(event);
        }

        let items = self.items();
        let m = event.modifiers;
        if let Some(c) = event.key.printable()
            && !(m.ctrl || m.alt || m.meta)
        {
            let mut typeahead = self.inner.typeahead.borrow_mut();
            if typeahead.is_active() {
                let now = self.inner.scheduler.now();
                let hit = typeahead.on_key(c, now, &items);
                drop(typeahead);
                if let Some(i) = hit {
                    self.focus_item_at(i);
                }
                return true;
            }
        }

        let action = router.route(event, &items, self.focus_index());
        log::trace!("key {:?} -> {action:?}", event.key);
        match action {
            KeyAction::Focus(i) => {
                self.focus_item_at(i);
            }
            KeyAction::Activate(i) => {
                self.activate_index(i);
            }
            KeyAction::OpenSubmenu(i) => {
                self.open_submenu_at(i);
            }
            KeyAction::Close => {
                self.close(CloseReason::Keydown(event.key));
            }
            KeyAction::Ignored => return false,
        }
        true
    }

    fn trigger_index_of(&self, child: &MenuController) -> Option<usize> {
        let trigger = self
            .inner
            .submenus
            .borrow()
            .iter()
            .find(|(_, m)| m.upgrade().is_some_and(|m| m.ptr_eq(child)))
            .and_then(|(t, _)| t.upgrade())?;
        self.inner.roster.borrow().position_of(&trigger)
    }

    pub fn typeahead_buffer(&self) -> String {
        self.inner.typeahead.borrow().buffer().to_string()
    }

    pub fn set_typeahead_active(&self, active: bool) {
        self.inner.typeahead.borrow_mut().set_active(active);
    }

    // ---- timers -----------------------------------------------------------

    /// Schedules `f` after `delay`, cancelling any timer this menu already has
    /// pending. At most one timer per menu is ever live.
    pub fn set_timeout(&self, delay: Duration, f: impl FnOnce() + 'static) -> TimerId {
        self.clear_timeout();
        let weak = self.downgrade();
        let id = self.inner.scheduler.set_timeout(delay, move || {
            if let Some(menu) = weak.upgrade()
                && let Some(pending) = menu.inner.pending_timer.get()
                && !menu.inner.scheduler.is_pending(pending)
            {
                menu.inner.pending_timer.set(None);
            }
            f();
        });
        self.inner.pending_timer.set(Some(id));
        id
    }

    pub fn clear_timeout(&self) {
        if let Some(id) = self.inner.pending_timer.take() {
            self.inner.scheduler.clear_timeout(id);
        }
    }

    pub fn has_pending_timer(&self) -> bool {
        self.inner
            .pending_timer
            .get()
            .is_some_and(|id| self.inner.scheduler.is_pending(id))
    }

    // ---- accessibility ----------------------------------------------------

    pub fn semantics(&self) -> Semantics {
        let open = self.is_open();
        let root_focused = self.is_list_root_focused();
        Semantics {
            focused: root_focused,
            expanded: Some(open),
            hidden: !open,
            tab_index: if root_focused { 0 } else { -1 },
            ..Semantics::new(Role::Menu)
        }
    }
}

impl Drop for MenuInner {
    fn drop(&mut self) {
        if let Some(id) = self.pending_timer.take() {
            self.scheduler.clear_timeout(id);
        }
    }
}

impl fmt::Debug for MenuController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuController")
            .field("open", &self.is_open())
            .field("focus", &self.inner.roster.borrow().focus_index())
            .field("items", &self.inner.roster.borrow().len())
            .field("position", &self.position())
            .finish()
    }
}
