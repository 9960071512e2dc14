//! # Folio menus
//!
//! Headless state machines for anchored menus, segmented button sets and the
//! navigation bar. A renderer reads positions, focus and [`Semantics`]; the
//! host loop feeds key and pointer events and drives the shared
//! [`Scheduler`].
//!
//! [`Semantics`]: folio_core::Semantics
//! [`Scheduler`]: folio_core::Scheduler
//!
//! ## A menu
//!
//! ```rust
//! use std::rc::Rc;
//! use folio_core::{Key, KeyEvent, ManualClock, Scheduler};
//! use folio_menu::{FocusState, ItemHandle, MenuConfig, MenuController};
//!
//! let clock = Rc::new(ManualClock::starting_now());
//! let scheduler = Rc::new(Scheduler::new(clock));
//! let menu = MenuController::new(
//!     MenuConfig::default().default_focus(FocusState::FirstItem),
//!     scheduler.clone(),
//! );
//!
//! let cut = ItemHandle::new("Cut");
//! let paste = ItemHandle::new("Paste");
//! menu.register_item(&cut);
//! menu.register_item(&paste);
//!
//! menu.show();
//! scheduler.run_frame();
//! assert_eq!(menu.focus_index(), Some(0));
//!
//! menu.handle_key(&KeyEvent::char('p'));
//! assert_eq!(menu.focused_item(), Some(paste.clone()));
//!
//! menu.handle_key(&KeyEvent::new(Key::Enter));
//! assert_eq!(menu.selected_item(), Some(paste));
//! assert!(!menu.is_open());
//! ```

pub mod config;
pub mod controller;
pub mod item;
pub mod keyboard;
pub mod navigation_bar;
pub mod position;
pub mod roster;
pub mod roving;
pub mod segmented;
pub mod shared;
pub mod submenu;
pub mod typeahead;

pub use config::MenuConfig;
pub use controller::{CloseListener, MenuController, SelectListener, WeakMenu};
pub use item::{ItemBuilder, ItemHandle, ItemId, ItemKind, ItemRole, LinkTarget, WeakItem};
pub use keyboard::{KeyAction, KeyboardRouter};
pub use navigation_bar::NavigationBar;
pub use position::{
    Measure, MenuPosition, MenuPositioner, PositionOptions, StaticMeasure, compute_position,
};
pub use roster::{FocusRoster, OpenFocus};
pub use roving::Wrap;
pub use segmented::{SegmentId, SegmentedButtonSet, Selection, SelectionMode};
pub use shared::*;
pub use submenu::SubMenu;
pub use typeahead::Typeahead;
