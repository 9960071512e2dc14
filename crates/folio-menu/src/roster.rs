//! # Focus roster
//!
//! Ordered list of the items a menu can move focus between, plus the index of
//! the focused one.
//!
//! # Invariants
//!
//! - The focus index is `None` or a valid index into the live items.
//! - An item appears at most once; registering it again is ignored.
//! - Order is registration order, except that items carrying an `order` hint
//!   are inserted before the first item with a larger hint (stable among equal
//!   hints). Hosts that mount out of visual order pass hints to keep keyboard
//!   and typeahead order equal to what is on screen.
//! - Dropped items are pruned on every access; the roster never holds a strong
//!   reference.
//! - Exactly one live item has tab index 0 when the roster is non-empty and
//!   has an enabled item: the focused one, else the first enabled one.

use crate::item::{ItemHandle, WeakItem};
use crate::shared::FocusState;

/// Where focus should go when a menu opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenFocus {
    Item(usize),
    ListRoot,
    Unchanged,
}

#[derive(Debug, Default)]
pub struct FocusRoster {
    items: Vec<WeakItem>,
    focus: Option<usize>,
}

impl FocusRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item`. Returns `false` if it was already registered.
    pub fn register(&mut self, item: &ItemHandle) -> bool {
        self.prune();
        if self.position_of(item).is_some() {
            log::trace!("roster: duplicate registration of {:?} ignored", item.id());
            return false;
        }

        let at = match item.order() {
            Some(order) => self
                .items
                .iter()
                .position(|w| {
                    w.upgrade()
                        .and_then(|i| i.order())
                        .is_some_and(|o| o > order)
                })
                .unwrap_or(self.items.len()),
            None => self.items.len(),
        };
        self.items.insert(at, item.downgrade());
        if let Some(f) = self.focus
            && at <= f
        {
            self.focus = Some(f + 1);
        }
        self.apply_roving();
        true
    }

    /// Removes `item`. Returns `false` for unknown items.
    pub fn unregister(&mut self, item: &ItemHandle) -> bool {
        self.prune();
        let Some(at) = self.position_of(item) else {
            return false;
        };
        self.remove_at(at);
        item.set_focused(false);
        item.set_tab_index(-1);
        self.apply_roving();
        true
    }

    /// Live items in roster order.
    pub fn items(&self) -> Vec<ItemHandle> {
        self.items.iter().filter_map(WeakItem::upgrade).collect()
    }

    pub fn len(&self) -> usize {
        self.items.iter().filter(|w| w.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, item: &ItemHandle) -> bool {
        self.position_of(item).is_some()
    }

    pub fn position_of(&self, item: &ItemHandle) -> Option<usize> {
        self.items
            .iter()
            .filter(|w| w.is_alive())
            .position(|w| w.points_to(item))
    }

    pub fn get(&self, index: usize) -> Option<ItemHandle> {
        self.items.iter().filter_map(WeakItem::upgrade).nth(index)
    }

    /// Index of the focused item among the live items, the same indexing
    /// `get` and `position_of` use. `None` if the focused item was dropped.
    pub fn focus_index(&self) -> Option<usize> {
        let f = self.focus?;
        if !self.items.get(f)?.is_alive() {
            return None;
        }
        Some(self.items[..f].iter().filter(|w| w.is_alive()).count())
    }

    pub fn focused_item(&self) -> Option<ItemHandle> {
        self.focus
            .and_then(|i| self.items.get(i))
            .and_then(WeakItem::upgrade)
    }

    /// Moves focus. `None` clears it; an out-of-range index is ignored and
    /// returns `false`.
    pub fn set_focus_index(&mut self, index: Option<usize>) -> bool {
        self.prune();
        if let Some(i) = index
            && i >= self.items.len()
        {
            log::warn!(
                "roster: focus index {i} out of range (len {}), ignored",
                self.items.len()
            );
            return false;
        }
        self.focus = index;
        self.apply_roving();
        true
    }

    /// Applies an open policy: `FirstItem`/`LastItem` focus an item when there
    /// is one, `ListRoot` clears item focus so the container can take it.
    pub fn apply_open_policy(&mut self, policy: FocusState) -> OpenFocus {
        self.prune();
        let len = self.items.len();
        let outcome = match policy {
            FocusState::FirstItem if len > 0 => OpenFocus::Item(0),
            FocusState::LastItem if len > 0 => OpenFocus::Item(len - 1),
            FocusState::ListRoot => OpenFocus::ListRoot,
            _ => OpenFocus::Unchanged,
        };
        match outcome {
            OpenFocus::Item(i) => {
                self.set_focus_index(Some(i));
            }
            OpenFocus::ListRoot => {
                self.set_focus_index(None);
            }
            OpenFocus::Unchanged => {}
        }
        outcome
    }

    /// Drops entries whose item is gone, keeping focus on the same item (or
    /// clearing it if the focused item itself is gone).
    pub fn prune(&mut self) {
        if self.items.iter().all(WeakItem::is_alive) {
            return;
        }
        let mut i = 0;
        while i < self.items.len() {
            if self.items[i].is_alive() {
                i += 1;
            } else {
                self.remove_at(i);
            }
        }
        self.apply_roving();
    }

    fn remove_at(&mut self, at: usize) {
        self.items.remove(at);
        self.focus = match self.focus {
            Some(f) if f == at => None,
            Some(f) if f > at => Some(f - 1),
            other => other,
        };
    }

    fn apply_roving(&self) {
        let items = self.items();
        let focus = self.focus_index();
        let target = focus.or_else(|| items.iter().position(|i| !i.is_disabled()));
        for (i, item) in items.iter().enumerate() {
            let focused = focus == Some(i);
            item.set_focused(focused);
            item.set_tab_index(if target == Some(i) { 0 } else { -1 });
        }
    }
}
