//! Navigation bar: a tab list with one active destination.
//!
//! Arrow keys wrap around; Home and End jump to the ends. The active index is
//! a [`Signal`], so subscribers double as the tab-change callback.

use folio_core::{Key, KeyEvent, Role, Semantics, Signal};

use crate::roving::{self, Wrap};

pub struct NavigationBar {
    /// Registered tab indices, ascending.
    tabs: Vec<usize>,
    active: Signal<usize>,
    hide_inactive_labels: bool,
}

impl Default for NavigationBar {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NavigationBar {
    pub fn new(initial_active: usize) -> Self {
        Self {
            tabs: Vec::new(),
            active: Signal::new(initial_active),
            hide_inactive_labels: false,
        }
    }

    pub fn hide_inactive_labels(mut self, hide: bool) -> Self {
        self.hide_inactive_labels = hide;
        self
    }

    /// Returns `false` if `index` was already registered.
    pub fn register_tab(&mut self, index: usize) -> bool {
        match self.tabs.binary_search(&index) {
            Ok(_) => false,
            Err(at) => {
                self.tabs.insert(at, index);
                true
            }
        }
    }

    pub fn unregister_tab(&mut self, index: usize) -> bool {
        match self.tabs.binary_search(&index) {
            Ok(at) => {
                self.tabs.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    pub fn tabs(&self) -> &[usize] {
        &self.tabs
    }

    pub fn active(&self) -> usize {
        self.active.get()
    }

    pub fn active_signal(&self) -> Signal<usize> {
        self.active.clone()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active() == index
    }

    /// Activates a registered tab. Unknown indices are ignored.
    pub fn select(&self, index: usize) -> bool {
        if self.tabs.binary_search(&index).is_err() {
            log::trace!("navigation bar: tab {index} is not registered");
            return false;
        }
        self.active.set(index);
        true
    }

    /// Returns whether the key was claimed.
    pub fn handle_key(&self, event: &KeyEvent) -> bool {
        let len = self.tabs.len();
        let current = self.tabs.iter().position(|t| *t == self.active());
        let next = match event.key {
            Key::ArrowLeft | Key::ArrowUp => roving::step(current, -1, len, Wrap::Loop),
            Key::ArrowRight | Key::ArrowDown => roving::step(current, 1, len, Wrap::Loop),
            Key::Home => roving::step(None, 1, len, Wrap::Clamp),
            Key::End => len.checked_sub(1),
            _ => return false,
        };
        if let Some(at) = next {
            log::debug!("navigation bar: tab {} active", self.tabs[at]);
            self.active.set(self.tabs[at]);
        }
        true
    }

    pub fn label_visible(&self, index: usize) -> bool {
        !self.hide_inactive_labels || self.is_active(index)
    }

    pub fn semantics(&self) -> Semantics {
        Semantics::new(Role::TabList)
    }

    pub fn tab_semantics(&self, index: usize) -> Semantics {
        let active = self.is_active(index);
        Semantics {
            selected: active,
            tab_index: if active { 0 } else { -1 },
            ..Semantics::new(Role::Tab)
        }
    }
}
