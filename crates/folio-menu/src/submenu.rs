//! Nested menus opened from a trigger item.
//!
//! Hover timers go through the *parent's* single timer slot, so moving the
//! pointer from one trigger to a sibling cancels whatever the first one had
//! scheduled. Hiding the parent clears that slot.
//!
//! Hover covers the trigger and the open panel together: hosts route enter
//! and leave of both through the same `SubMenu` (`handle_pointer` for the
//! trigger, `handle_panel_pointer` for the panel), so crossing from one to
//! the other cancels the pending close.

use std::rc::Rc;
use std::time::Duration;

use folio_core::{PointerEvent, PointerEventKind, Scheduler, Semantics};

use crate::config::MenuConfig;
use crate::controller::MenuController;
use crate::item::ItemHandle;
use crate::shared::{CloseReason, DEFAULT_HOVER_CLOSE_DELAY, DEFAULT_HOVER_OPEN_DELAY};

pub struct SubMenu {
    parent: MenuController,
    menu: MenuController,
    trigger: ItemHandle,
    open_delay: Duration,
    close_delay: Duration,
}

impl SubMenu {
    /// Creates the trigger item, registers it in `parent` and attaches a child
    /// menu built from `config`. The child shares the parent's scheduler.
    pub fn new(parent: &MenuController, label: impl Into<String>, config: MenuConfig) -> Self {
        let trigger = ItemHandle::builder(label).submenu().build();
        Self::with_trigger(parent, trigger, config)
    }

    /// Like [`SubMenu::new`] with a caller-built trigger (for order hints or a
    /// disabled trigger). Non-submenu items are accepted but `Activate` on them
    /// selects instead of opening.
    pub fn with_trigger(parent: &MenuController, trigger: ItemHandle, config: MenuConfig) -> Self {
        let scheduler: Rc<Scheduler> = parent.scheduler().clone();
        let menu = MenuController::new(config, scheduler);
        parent.register_item(&trigger);
        parent.attach_submenu(&trigger, &menu);
        Self {
            parent: parent.clone(),
            menu,
            trigger,
            open_delay: DEFAULT_HOVER_OPEN_DELAY,
            close_delay: DEFAULT_HOVER_CLOSE_DELAY,
        }
    }

    pub fn hover_delays(mut self, open: Duration, close: Duration) -> Self {
        self.open_delay = open;
        self.close_delay = close;
        self
    }

    pub fn trigger(&self) -> &ItemHandle {
        &self.trigger
    }

    /// The child menu. Register its items here.
    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn parent(&self) -> &MenuController {
        &self.parent
    }

    pub fn is_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn on_hover_enter(&self) {
        if self.trigger.is_disabled() {
            return;
        }
        let child = self.menu.downgrade();
        let parent = self.parent.downgrade();
        self.parent.clear_timeout();
        self.parent.set_timeout(self.open_delay, move || {
            let parent_open = parent.upgrade().is_some_and(|p| p.is_open());
            if let Some(child) = child.upgrade()
                && parent_open
            {
                child.show();
            }
        });
    }

    pub fn on_hover_leave(&self) {
        let child = self.menu.downgrade();
        self.parent.clear_timeout();
        self.parent.set_timeout(self.close_delay, move || {
            if let Some(child) = child.upgrade() {
                child.close(CloseReason::HoverOut);
            }
        });
    }

    /// Routes pointer enter/leave on the trigger. Other pointer events are
    /// left to the item.
    pub fn handle_pointer(&self, event: &PointerEvent) -> bool {
        match event.event {
            PointerEventKind::Enter => {
                self.on_hover_enter();
                true
            }
            PointerEventKind::Leave => {
                self.on_hover_leave();
                true
            }
            _ => false,
        }
    }

    /// Routes pointer enter/leave on the open submenu panel. Entering the
    /// panel after leaving the trigger keeps the submenu open; leaving the
    /// panel starts the close delay.
    pub fn handle_panel_pointer(&self, event: &PointerEvent) -> bool {
        if !self.menu.is_open() {
            return false;
        }
        self.handle_pointer(event)
    }

    /// Trigger semantics with `aria-expanded` reflecting the child menu.
    pub fn semantics(&self) -> Semantics {
        Semantics {
            expanded: Some(self.menu.is_open()),
            ..self.trigger.semantics()
        }
    }
}

impl Drop for SubMenu {
    fn drop(&mut self) {
        self.menu.hide();
        self.parent.unregister_item(&self.trigger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Key, KeyEvent, ManualClock, PointerButton, Vec2};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup() -> (Rc<ManualClock>, Rc<Scheduler>, MenuController) {
        let clock = Rc::new(ManualClock::starting_now());
        let scheduler = Rc::new(Scheduler::new(clock.clone()));
        let root = MenuController::new(MenuConfig::default(), scheduler.clone());
        (clock, scheduler, root)
    }

    fn tick(clock: &ManualClock, scheduler: &Scheduler, by: Duration) {
        clock.advance(by);
        scheduler.run_due_timers();
        scheduler.run_frame();
    }

    #[test]
    fn test_hover_opens_after_delay() {
        let (clock, s, root) = setup();
        root.show();
        let sub = SubMenu::new(&root, "More", MenuConfig::default());

        sub.on_hover_enter();
        tick(&clock, &s, ms(399));
        assert!(!sub.is_open());
        tick(&clock, &s, ms(1));
        assert!(sub.is_open());
        assert!(!root.has_pending_timer());
    }

    #[test]
    fn test_leave_then_reenter_keeps_open() {
        let (clock, s, root) = setup();
        root.show();
        let sub = SubMenu::new(&root, "More", MenuConfig::default());
        sub.on_hover_enter();
        tick(&clock, &s, ms(400));
        assert!(sub.is_open());

        sub.on_hover_leave();
        tick(&clock, &s, ms(200));
        sub.on_hover_enter();
        // Past the first close deadline.
        tick(&clock, &s, ms(300));
        assert!(sub.is_open());
        tick(&clock, &s, ms(500));
        assert!(sub.is_open());
    }

    #[test]
    fn test_leave_closes_after_delay() {
        let (clock, s, root) = setup();
        root.show();
        let sub = SubMenu::new(&root, "More", MenuConfig::default()).hover_delays(ms(0), ms(100));
        let reasons = Rc::new(std::cell::RefCell::new(Vec::new()));
        {
            let reasons = reasons.clone();
            sub.menu().on_close(move |r| reasons.borrow_mut().push(r));
        }
        sub.on_hover_enter();
        tick(&clock, &s, ms(0));
        assert!(sub.is_open());

        sub.on_hover_leave();
        tick(&clock, &s, ms(100));
        assert!(!sub.is_open());
        assert_eq!(*reasons.borrow(), vec![CloseReason::HoverOut]);
    }

    #[test]
    fn test_sibling_hover_cancels_pending_open() {
        let (clock, s, root) = setup();
        root.show();
        let a = SubMenu::new(&root, "Alpha", MenuConfig::default());
        let b = SubMenu::new(&root, "Beta", MenuConfig::default());

        a.on_hover_enter();
        tick(&clock, &s, ms(200));
        b.on_hover_enter();
        assert_eq!(s.pending_timers(), 1);
        tick(&clock, &s, ms(400));
        assert!(!a.is_open());
        assert!(b.is_open());
    }

    #[test]
    fn test_pointer_routing() {
        let (clock, s, root) = setup();
        root.show();
        let sub = SubMenu::new(&root, "More", MenuConfig::default());
        let enter = PointerEvent::mouse(PointerEventKind::Enter, Vec2::default());
        let down = PointerEvent::mouse(PointerEventKind::Down(PointerButton::Primary), Vec2::default());
        assert!(!sub.handle_pointer(&down));
        assert!(sub.handle_pointer(&enter));
        tick(&clock, &s, ms(400));
        assert!(sub.is_open());
        assert_eq!(sub.semantics().expanded, Some(true));
        assert!(sub.semantics().has_popup);
    }

    #[test]
    fn test_keyboard_open_and_back() {
        let (_clock, s, root) = setup();
        let copy = ItemHandle::new("Copy");
        root.register_item(&copy);
        let sub = SubMenu::new(&root, "Share", MenuConfig::default());
        let email = ItemHandle::new("Email");
        let link = ItemHandle::new("Link");
        sub.menu().register_item(&email);
        sub.menu().register_item(&link);

        root.show();
        s.run_frame();
        root.handle_key(&KeyEvent::new(Key::ArrowDown));
        root.handle_key(&KeyEvent::new(Key::ArrowDown));
        assert_eq!(root.focus_index(), Some(1));

        assert!(root.handle_key(&KeyEvent::new(Key::ArrowRight)));
        s.run_frame();
        assert!(sub.is_open());
        assert_eq!(sub.menu().focus_index(), Some(0));

        // Navigation goes to the child while it is open.
        root.handle_key(&KeyEvent::new(Key::ArrowDown));
        assert_eq!(sub.menu().focus_index(), Some(1));
        assert_eq!(root.focus_index(), Some(1));

        assert!(root.handle_key(&KeyEvent::new(Key::ArrowLeft)));
        assert!(!sub.is_open());
        assert!(root.is_open());
        assert_eq!(root.focus_index(), Some(1));
        assert!(sub.trigger().is_focused());
    }

    #[test]
    fn test_escape_in_child_closes_only_child() {
        let (_clock, s, root) = setup();
        let sub = SubMenu::new(&root, "Share", MenuConfig::default());
        let email = ItemHandle::new("Email");
        sub.menu().register_item(&email);
        root.show();
        s.run_frame();
        root.focus_item_at(0);
        root.handle_key(&KeyEvent::new(Key::Enter));
        s.run_frame();
        assert!(sub.is_open());
        assert_eq!(sub.menu().focused_item(), Some(email));

        assert!(root.handle_key(&KeyEvent::new(Key::Escape)));
        assert!(!sub.is_open());
        assert!(root.is_open());
        assert!(root.handle_key(&KeyEvent::new(Key::Escape)));
        assert!(!root.is_open());
    }

    #[test]
    fn test_hiding_parent_hides_child() {
        let (clock, s, root) = setup();
        root.show();
        let sub = SubMenu::new(&root, "More", MenuConfig::default());
        sub.on_hover_enter();
        tick(&clock, &s, ms(400));
        assert!(sub.is_open());
        root.hide();
        assert!(!sub.is_open());
    }

    #[test]
    fn test_drop_unregisters_trigger() {
        let (_clock, _s, root) = setup();
        let sub = SubMenu::new(&root, "More", MenuConfig::default());
        assert_eq!(root.items().len(), 1);
        drop(sub);
        assert!(root.items().is_empty());
    }

    #[test]
    fn test_parent_closing_cancels_pending_open() {
        let (clock, s, root) = setup();
        root.show();
        let sub = SubMenu::new(&root, "More", MenuConfig::default());

        sub.on_hover_enter();
        tick(&clock, &s, ms(100));
        assert!(root.handle_key(&KeyEvent::new(Key::Escape)));
        assert!(!root.has_pending_timer());
        tick(&clock, &s, ms(400));
        assert!(!root.is_open());
        assert!(!sub.is_open());
    }

    #[test]
    fn test_open_timer_checks_parent_state() {
        let (clock, s, root) = setup();
        root.show();
        let sub = SubMenu::new(&root, "More", MenuConfig::default());
        sub.on_hover_enter();
        // Closed without going through hide, e.g. by a host resetting state.
        root.open_signal().set(false);
        tick(&clock, &s, ms(400));
        assert!(!sub.is_open());
    }

    #[test]
    fn test_panel_hover_keeps_open() {
        let (clock, s, root) = setup();
        root.show();
        let sub = SubMenu::new(&root, "More", MenuConfig::default());
        let enter = PointerEvent::mouse(PointerEventKind::Enter, Vec2::default());
        let leave = PointerEvent::mouse(PointerEventKind::Leave, Vec2::default());

        // Panel events are ignored while it is not shown.
        assert!(!sub.handle_panel_pointer(&enter));
        sub.handle_pointer(&enter);
        tick(&clock, &s, ms(400));
        assert!(sub.is_open());

        // Trigger to panel.
        sub.handle_pointer(&leave);
        tick(&clock, &s, ms(100));
        assert!(sub.handle_panel_pointer(&enter));
        tick(&clock, &s, ms(800));
        assert!(sub.is_open());

        sub.handle_panel_pointer(&leave);
        tick(&clock, &s, ms(400));
        assert!(!sub.is_open());
    }

    #[test]
    fn test_selection_in_submenu_closes_tree_and_reaches_root() {
        let (_clock, s, root) = setup();
        let sub = SubMenu::new(&root, "Share", MenuConfig::default());
        let email = ItemHandle::new("Email");
        let pin = ItemHandle::builder("Pin").keep_open(true).build();
        sub.menu().register_item(&email);
        sub.menu().register_item(&pin);

        let picked = Rc::new(std::cell::RefCell::new(Vec::new()));
        {
            let picked = picked.clone();
            root.on_select(move |i| picked.borrow_mut().push(i.label()));
        }
        let root_closes = Rc::new(std::cell::RefCell::new(Vec::new()));
        {
            let root_closes = root_closes.clone();
            root.on_close(move |r| root_closes.borrow_mut().push(r));
        }

        root.show();
        s.run_frame();
        root.focus_item_at(0);
        root.handle_key(&KeyEvent::new(Key::Enter));
        s.run_frame();
        assert_eq!(sub.menu().parent().map(|p| p.ptr_eq(&root)), Some(true));

        // Keep-open items report upward but leave both menus open.
        assert!(sub.menu().select_item(&pin));
        assert!(root.is_open() && sub.is_open());

        root.handle_key(&KeyEvent::new(Key::Enter));
        assert!(!sub.is_open());
        assert!(!root.is_open());
        assert_eq!(*picked.borrow(), vec!["Pin".to_string(), "Email".to_string()]);
        assert_eq!(root.selected_item(), Some(email.clone()));
        assert_eq!(sub.menu().selected_item(), Some(email));
        assert_eq!(*root_closes.borrow(), vec![CloseReason::ClickSelection]);
    }
}
