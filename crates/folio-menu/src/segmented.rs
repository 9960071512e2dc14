//! # Segmented button set
//!
//! Coordinates the buttons of one segmented control: which values are
//! selected, which button is reachable by Tab, and where arrow keys move focus.
//!
//! Buttons are keyed by `SegmentId` (slot-map keys), so a stale id left behind
//! by an unmounted button is simply ignored.
//!
//! # Selection
//!
//! - `Single { fallback }`: pressing the selected value reverts to `fallback`
//!   (or to nothing). Pressing the fallback while it is selected does nothing.
//! - `Multiple`: pressing toggles membership.
//!
//! The selection lives in a [`Signal`]; subscribing to it is the change
//! callback.

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use folio_core::{Key, Role, Semantics, Signal, TextDirection, text_direction};

use crate::roving::{self, Wrap};
use crate::shared::Orientation;

new_key_type! {
    pub struct SegmentId;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    Single { fallback: Option<String> },
    Multiple,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Single(Option<String>),
    Multiple(SmallVec<[String; 4]>),
}

impl Selection {
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Selection::Single(v) => v.as_deref() == Some(value),
            Selection::Multiple(vs) => vs.iter().any(|v| v == value),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Single(v) => v.is_none(),
            Selection::Multiple(vs) => vs.is_empty(),
        }
    }
}

#[derive(Debug)]
struct Segment {
    value: String,
    disabled: bool,
}

pub struct SegmentedButtonSet {
    segments: SlotMap<SegmentId, Segment>,
    order: Vec<SegmentId>,
    mode: SelectionMode,
    selection: Signal<Selection>,
    orientation: Orientation,
    direction: TextDirection,
    looping: bool,
    disabled: bool,
    deselectable: bool,
}

impl SegmentedButtonSet {
    pub fn new(mode: SelectionMode) -> Self {
        let selection = match mode {
            SelectionMode::Single { .. } => Selection::Single(None),
            SelectionMode::Multiple => Selection::Multiple(SmallVec::new()),
        };
        Self {
            segments: SlotMap::with_key(),
            order: Vec::new(),
            mode,
            selection: Signal::new(selection),
            orientation: Orientation::default(),
            direction: text_direction(),
            looping: false,
            disabled: false,
            deselectable: true,
        }
    }

    pub fn single(fallback: Option<&str>) -> Self {
        Self::new(SelectionMode::Single {
            fallback: fallback.map(str::to_owned),
        })
    }

    pub fn multiple() -> Self {
        Self::new(SelectionMode::Multiple)
    }

    /// Initial selection. In single mode only the last value is kept.
    pub fn selected<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into);
        let selection = match self.mode {
            SelectionMode::Single { .. } => Selection::Single(values.last()),
            SelectionMode::Multiple => Selection::Multiple(values.collect()),
        };
        self.selection.set(selection);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether pressing a selected button may unselect it.
    pub fn deselectable(mut self, deselectable: bool) -> Self {
        self.deselectable = deselectable;
        self
    }

    pub fn mode(&self) -> &SelectionMode {
        &self.mode
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Registers a button by value. A value registered twice keeps its
    /// first id.
    pub fn register(&mut self, value: impl Into<String>, disabled: bool) -> SegmentId {
        let value = value.into();
        if let Some(id) = self.find(&value) {
            log::trace!("segment {value:?} already registered");
            return id;
        }
        let id = self.segments.insert(Segment { value, disabled });
        self.order.push(id);
        id
    }

    pub fn unregister(&mut self, id: SegmentId) -> bool {
        if self.segments.remove(id).is_none() {
            return false;
        }
        self.order.retain(|s| *s != id);
        true
    }

    pub fn find(&self, value: &str) -> Option<SegmentId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.segments.get(*id).is_some_and(|s| s.value == value))
    }

    /// Ids in registration order.
    pub fn ids(&self) -> &[SegmentId] {
        &self.order
    }

    pub fn value(&self, id: SegmentId) -> Option<&str> {
        self.segments.get(id).map(|s| s.value.as_str())
    }

    pub fn set_segment_disabled(&mut self, id: SegmentId, disabled: bool) {
        if let Some(s) = self.segments.get_mut(id) {
            s.disabled = disabled;
        }
    }

    /// Disabled on its own or through the whole set.
    pub fn is_disabled(&self, id: SegmentId) -> bool {
        self.disabled || self.segments.get(id).is_none_or(|s| s.disabled)
    }

    pub fn selection(&self) -> Selection {
        self.selection.get()
    }

    pub fn selection_signal(&self) -> Signal<Selection> {
        self.selection.clone()
    }

    pub fn is_selected(&self, id: SegmentId) -> bool {
        self.value(id)
            .is_some_and(|v| self.selection.with(|sel| sel.contains(v)))
    }

    /// Presses a button. Returns whether the selection changed.
    pub fn press(&mut self, id: SegmentId) -> bool {
        if self.is_disabled(id) {
            return false;
        }
        let Some(value) = self.value(id).map(str::to_owned) else {
            return false;
        };
        let current = self.selection.get();
        let was_selected = current.contains(&value);
        if was_selected && !self.deselectable {
            return false;
        }

        let next = match (&self.mode, current) {
            (SelectionMode::Single { fallback }, Selection::Single(_)) => {
                if !was_selected {
                    Selection::Single(Some(value))
                } else if fallback.as_deref() == Some(value.as_str()) {
                    return false;
                } else {
                    Selection::Single(fallback.clone())
                }
            }
            (SelectionMode::Multiple, Selection::Multiple(mut values)) => {
                if was_selected {
                    values.retain(|v| *v != value);
                } else {
                    values.push(value);
                }
                Selection::Multiple(values)
            }
            (mode, sel) => {
                log::warn!("selection {sel:?} does not match mode {mode:?}");
                return false;
            }
        };
        log::debug!("segmented selection -> {next:?}");
        self.selection.set(next);
        true
    }

    /// Roving tab index: selected buttons are reachable, otherwise the first
    /// enabled one is.
    pub fn tab_index(&self, id: SegmentId) -> i32 {
        let any_selected = self.order.iter().any(|s| self.is_selected(*s));
        let reachable = if any_selected {
            self.is_selected(id)
        } else {
            self.order.iter().copied().find(|s| !self.is_disabled(*s)) == Some(id)
        };
        if reachable { 0 } else { -1 }
    }

    /// Focus step for an arrow key given orientation and reading direction:
    /// `1`, `-1` or `0` for keys that do not move along the set's axis.
    pub fn step_for(&self, key: &Key) -> isize {
        let forward = match (self.orientation, key) {
            (Orientation::Horizontal, Key::ArrowRight) => 1,
            (Orientation::Horizontal, Key::ArrowLeft) => -1,
            (Orientation::Vertical, Key::ArrowDown) => 1,
            (Orientation::Vertical, Key::ArrowUp) => -1,
            _ => 0,
        };
        if self.direction.is_rtl() {
            -forward
        } else {
            forward
        }
    }

    /// Where focus goes from `from` on `key`, moving over enabled buttons
    /// only. `None` when the key does not move focus or `from` is not an
    /// enabled button of this set.
    pub fn focus_step(&self, from: SegmentId, key: &Key) -> Option<SegmentId> {
        let delta = self.step_for(key);
        if delta == 0 {
            return None;
        }
        let enabled: Vec<SegmentId> = self
            .order
            .iter()
            .copied()
            .filter(|s| !self.is_disabled(*s))
            .collect();
        let current = enabled.iter().position(|s| *s == from)?;
        let wrap = if self.looping { Wrap::Loop } else { Wrap::Clamp };
        roving::step(Some(current), delta, enabled.len(), wrap).map(|i| enabled[i])
    }

    pub fn semantics(&self) -> Semantics {
        Semantics {
            enabled: !self.disabled,
            ..Semantics::new(Role::Group)
        }
    }

    pub fn segment_semantics(&self, id: SegmentId) -> Semantics {
        Semantics {
            label: self.value(id).map(str::to_owned),
            enabled: !self.is_disabled(id),
            selected: self.is_selected(id),
            tab_index: self.tab_index(id),
            ..Semantics::new(Role::Button)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn theme_set() -> (SegmentedButtonSet, [SegmentId; 3]) {
        let mut set = SegmentedButtonSet::single(Some("system")).selected(["system"]);
        let light = set.register("light", false);
        let system = set.register("system", false);
        let dark = set.register("dark", false);
        (set, [light, system, dark])
    }

    #[test]
    fn test_single_with_fallback() {
        let (mut set, [light, system, dark]) = theme_set();
        assert!(set.is_selected(system));

        assert!(set.press(dark));
        assert_eq!(set.selection(), Selection::Single(Some("dark".into())));
        // Unpressing falls back.
        assert!(set.press(dark));
        assert!(set.is_selected(system));
        // The fallback cannot be unpressed.
        assert!(!set.press(system));
        assert!(set.is_selected(system));

        assert!(set.press(light));
        assert!(!set.is_selected(system));
    }

    #[test]
    fn test_single_without_fallback_clears() {
        let mut set = SegmentedButtonSet::single(None);
        let a = set.register("a", false);
        set.press(a);
        set.press(a);
        assert!(set.selection().is_empty());
    }

    #[test]
    fn test_multiple_toggles() {
        let mut set = SegmentedButtonSet::multiple();
        let a = set.register("a", false);
        let b = set.register("b", false);
        set.press(a);
        set.press(b);
        assert!(set.is_selected(a) && set.is_selected(b));
        set.press(a);
        assert_eq!(set.selection(), Selection::Multiple(SmallVec::from_vec(vec!["b".to_string()])));
    }

    #[test]
    fn test_not_deselectable() {
        let mut set = SegmentedButtonSet::multiple().deselectable(false);
        let a = set.register("a", false);
        assert!(set.press(a));
        assert!(!set.press(a));
        assert!(set.is_selected(a));
    }

    #[test]
    fn test_disabled_ignored() {
        let mut set = SegmentedButtonSet::multiple();
        let a = set.register("a", true);
        let b = set.register("b", false);
        assert!(!set.press(a));
        set.set_disabled(true);
        assert!(!set.press(b));
        assert!(set.selection().is_empty());
    }

    #[test]
    fn test_register_is_idempotent_by_value() {
        let mut set = SegmentedButtonSet::multiple();
        let a = set.register("a", false);
        assert_eq!(set.register("a", true), a);
        assert_eq!(set.ids().len(), 1);
        assert!(set.unregister(a));
        assert!(!set.unregister(a));
        // Stale ids are harmless.
        assert!(!set.press(a));
        assert_eq!(set.tab_index(a), -1);
    }

    #[test]
    fn test_selection_signal_is_change_callback() {
        let (mut set, [light, ..]) = theme_set();
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            set.selection_signal().subscribe(move |s| seen.borrow_mut().push(s.clone()));
        }
        set.press(light);
        assert_eq!(*seen.borrow(), vec![Selection::Single(Some("light".into()))]);
    }

    #[test]
    fn test_roving_tab_index() {
        let mut set = SegmentedButtonSet::multiple();
        let a = set.register("a", true);
        let b = set.register("b", false);
        let c = set.register("c", false);
        assert_eq!([set.tab_index(a), set.tab_index(b), set.tab_index(c)], [-1, 0, -1]);
        set.press(c);
        assert_eq!([set.tab_index(a), set.tab_index(b), set.tab_index(c)], [-1, -1, 0]);
    }

    #[test]
    fn test_focus_step_clamps_or_loops() {
        let mut set = SegmentedButtonSet::multiple().direction(TextDirection::Ltr);
        let a = set.register("a", false);
        let _b = set.register("b", true);
        let c = set.register("c", false);

        // Disabled buttons are skipped.
        assert_eq!(set.focus_step(a, &Key::ArrowRight), Some(c));
        assert_eq!(set.focus_step(c, &Key::ArrowRight), Some(c));
        assert_eq!(set.focus_step(a, &Key::ArrowLeft), Some(a));
        assert_eq!(set.focus_step(a, &Key::ArrowDown), None);

        let set = set.looping(true);
        assert_eq!(set.focus_step(c, &Key::ArrowRight), Some(a));
        assert_eq!(set.focus_step(a, &Key::ArrowLeft), Some(c));
    }

    #[test]
    fn test_step_table() {
        let set = SegmentedButtonSet::multiple().direction(TextDirection::Rtl);
        assert_eq!(set.step_for(&Key::ArrowRight), -1);
        assert_eq!(set.step_for(&Key::ArrowLeft), 1);
        let set = set.orientation(Orientation::Vertical);
        assert_eq!(set.step_for(&Key::ArrowDown), -1);
        assert_eq!(set.step_for(&Key::ArrowRight), 0);
        let set = set.direction(TextDirection::Ltr);
        assert_eq!(set.step_for(&Key::ArrowUp), -1);
        assert_eq!(set.step_for(&Key::Home), 0);
    }
}
