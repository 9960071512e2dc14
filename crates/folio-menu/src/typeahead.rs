//! Type-to-focus for menus.
//!
//! Characters typed within `window` of each other accumulate into a lowercase
//! buffer; the first item whose label starts with the buffer takes focus. A
//! longer pause starts a new buffer. Misses keep the buffer so the next key can
//! still complete a match.

use std::time::Duration;

use folio_core::Instant;

use crate::item::ItemHandle;
use crate::shared::DEFAULT_TYPEAHEAD_BUFFER_TIME;

#[derive(Clone, Debug)]
pub struct Typeahead {
    buffer: String,
    last_key_time: Option<Instant>,
    active: bool,
    window: Duration,
}

impl Default for Typeahead {
    fn default() -> Self {
        Self::new(DEFAULT_TYPEAHEAD_BUFFER_TIME)
    }
}

impl Typeahead {
    pub fn new(window: Duration) -> Self {
        Self {
            buffer: String::new(),
            last_key_time: None,
            active: true,
            window,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_key_time = None;
    }

    /// Feeds one keystroke. Returns the index of the first matching item.
    ///
    /// Non-printable characters and keys typed while inactive are rejected
    /// without touching the buffer.
    pub fn on_key(&mut self, c: char, now: Instant, items: &[ItemHandle]) -> Option<usize> {
        if !self.active || c.is_control() {
            return None;
        }

        if let Some(last) = self.last_key_time
            && now.saturating_duration_since(last) > self.window
        {
            self.buffer.clear();
        }
        self.last_key_time = Some(now);
        self.buffer.extend(c.to_lowercase());

        let hit = items.iter().position(|i| i.label_starts_with(&self.buffer));
        log::trace!("typeahead {:?} -> {hit:?}", self.buffer);
        hit
    }
}
