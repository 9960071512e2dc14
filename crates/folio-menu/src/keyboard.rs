//! Key routing for an open menu.
//!
//! `KeyboardRouter::route` only decides; the controller applies the decision.
//!
//! | Key | Action |
//! |---|---|
//! | ArrowDown / ArrowUp | next / previous item, clamped at the ends |
//! | Home / End | first / last item |
//! | ArrowRight (LTR), ArrowLeft (RTL) | open the focused submenu |
//! | Enter / Space | activate the focused item |
//! | Escape | close, whatever has focus |

use folio_core::{Key, KeyEvent, TextDirection};

use crate::item::ItemHandle;
use crate::roving::{self, Wrap};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Move focus to this index (may equal the current one at either end).
    Focus(usize),
    /// Activate (click) the item at this index.
    Activate(usize),
    /// Open the submenu owned by the item at this index.
    OpenSubmenu(usize),
    Close,
    /// Not a menu key; leave it to the host.
    Ignored,
}

impl KeyAction {
    pub fn is_claimed(self) -> bool {
        self != KeyAction::Ignored
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct KeyboardRouter {
    direction: TextDirection,
}

impl KeyboardRouter {
    pub fn new(direction: TextDirection) -> Self {
        Self { direction }
    }

    /// Router for the direction currently provided through locals.
    pub fn from_locals() -> Self {
        Self::new(folio_core::text_direction())
    }

    /// The arrow that opens a submenu: the one pointing toward the inline end.
    pub fn forward_key(&self) -> Key {
        if self.direction.is_rtl() {
            Key::ArrowLeft
        } else {
            Key::ArrowRight
        }
    }

    /// The arrow that leaves a submenu.
    pub fn back_key(&self) -> Key {
        if self.direction.is_rtl() {
            Key::ArrowRight
        } else {
            Key::ArrowLeft
        }
    }

    pub fn route(&self, event: &KeyEvent, items: &[ItemHandle], current: Option<usize>) -> KeyAction {
        if event.key == Key::Escape {
            return KeyAction::Close;
        }
        let len = items.len();
        if len == 0 {
            return KeyAction::Ignored;
        }
        // A stale index is treated as no focus.
        let current = current.filter(|&c| c < len);

        match event.key {
            Key::ArrowDown => Self::focus(roving::step(current, 1, len, Wrap::Clamp)),
            Key::ArrowUp => Self::focus(roving::step(current, -1, len, Wrap::Clamp)),
            Key::Home => KeyAction::Focus(0),
            Key::End => KeyAction::Focus(len - 1),
            k if k == self.forward_key() => match current {
                Some(c) if items[c].is_submenu() => KeyAction::OpenSubmenu(c),
                _ => KeyAction::Ignored,
            },
            Key::Enter | Key::Space => current.map_or(KeyAction::Ignored, KeyAction::Activate),
            _ => KeyAction::Ignored,
        }
    }

    fn focus(index: Option<usize>) -> KeyAction {
        index.map_or(KeyAction::Ignored, KeyAction::Focus)
    }
}
