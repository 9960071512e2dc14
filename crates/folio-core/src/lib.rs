//! # Folio core
//!
//! Small building blocks shared by Folio's widgets. None of them render
//! anything; they hold the state a renderer reads and the host loop drives.
//!
//! - `Signal<T>`: observable value with subscriptions.
//! - `Scope`: cleanup bound to a mounted subtree.
//! - `Scheduler` + `Clock`: timers and next-frame callbacks on one thread.
//! - `Rect`, `Vec2`, `Transform`: viewport geometry.
//! - `Key`, `KeyEvent`, `PointerEvent`: input vocabulary.
//! - `TextDirection` local: LTR/RTL for keyboard navigation.
//! - `Semantics`: accessibility attributes.
//!
//! ## Signals
//!
//! ```rust
//! use folio_core::*;
//!
//! let open = signal(false);
//! let seen = signal(Vec::<bool>::new());
//! {
//!     let seen = seen.clone();
//!     open.subscribe(move |v| seen.update(|s| s.push(*v)));
//! }
//! open.set(true);
//! assert!(!open.set_if_changed(true));
//! assert_eq!(seen.get(), vec![true]);
//! ```
//!
//! ## Scopes
//!
//! Cleanups registered while a scope is current run when it is disposed:
//!
//! ```rust
//! use folio_core::*;
//!
//! let scope = Scope::new();
//! let mounted = signal(true);
//! scope.run(|| {
//!     let mounted = mounted.clone();
//!     scoped_effect(move || Box::new(move || mounted.set(false)));
//! });
//! scope.dispose();
//! assert!(!mounted.get());
//! ```

pub mod clock;
pub mod error;
pub mod geometry;
pub mod input;
pub mod locals;
pub mod scheduler;
pub mod scope;
pub mod semantics;
pub mod signal;
mod tests;

pub use clock::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use locals::*;
pub use scheduler::*;
pub use scope::*;
pub use semantics::*;
pub use signal::*;

pub use web_time::Instant;
