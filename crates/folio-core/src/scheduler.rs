//! # Scheduler
//!
//! A single-threaded stand-in for the host event loop's `setTimeout`,
//! `clearTimeout` and `requestAnimationFrame`.
//!
//! The platform (or a test) pumps it:
//!
//! - `run_frame()` once per rendered frame, after layout, so deferred work sees
//!   mounted elements.
//! - `run_due_timers()` whenever the clock may have passed a deadline.
//!
//! Callbacks always run outside the scheduler's internal borrows, so they can
//! schedule or cancel further work. Timer ids are generational slot-map keys:
//! cancelling a timer that already fired or was already cancelled is a no-op,
//! never a hit on some newer timer that reused the slot.
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use folio_core::*;
//!
//! let clock = Rc::new(ManualClock::starting_now());
//! let scheduler = Scheduler::new(clock.clone());
//! let fired = signal(false);
//!
//! let f = fired.clone();
//! scheduler.set_timeout(Duration::from_millis(400), move || f.set(true));
//!
//! clock.advance(Duration::from_millis(399));
//! scheduler.run_due_timers();
//! assert!(!fired.get());
//!
//! clock.advance(Duration::from_millis(1));
//! scheduler.run_due_timers();
//! assert!(fired.get());
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};
use web_time::Instant;

use crate::clock::{Clock, SystemClock};

new_key_type! {
    /// Handle to a pending timer.
    pub struct TimerId;
}

struct Timer {
    deadline: Instant,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

pub struct Scheduler {
    clock: Rc<dyn Clock>,
    timers: RefCell<SlotMap<TimerId, Timer>>,
    frames: RefCell<VecDeque<Box<dyn FnOnce()>>>,
    seq: Cell<u64>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Rc::new(SystemClock))
    }
}

impl Scheduler {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            timers: RefCell::new(SlotMap::with_key()),
            frames: RefCell::new(VecDeque::new()),
            seq: Cell::new(0),
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn set_timeout(&self, delay: Duration, f: impl FnOnce() + 'static) -> TimerId {
        let seq = self.seq.get();
        self.seq.set(seq.wrapping_add(1));
        let deadline = self.clock.now() + delay;
        let id = self.timers.borrow_mut().insert(Timer {
            deadline,
            seq,
            callback: Box::new(f),
        });
        log::trace!("timer {id:?} scheduled in {delay:?}");
        id
    }

    /// Cancels a pending timer. Returns `false` for unknown or spent ids.
    pub fn clear_timeout(&self, id: TimerId) -> bool {
        let removed = self.timers.borrow_mut().remove(id).is_some();
        if removed {
            log::trace!("timer {id:?} cancelled");
        }
        removed
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.borrow().contains_key(id)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.borrow().values().map(|t| t.deadline).min()
    }

    /// Fires every timer whose deadline has passed, earliest first (ties in
    /// scheduling order). Timers scheduled by these callbacks wait for the
    /// next call. Returns how many fired.
    pub fn run_due_timers(&self) -> usize {
        let now = self.clock.now();
        let mut due: Vec<(Instant, u64, TimerId)> = self
            .timers
            .borrow()
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(id, t)| (t.deadline, t.seq, id))
            .collect();
        due.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut fired = 0;
        for (_, _, id) in due {
            // An earlier callback may have cancelled this one.
            let timer = self.timers.borrow_mut().remove(id);
            if let Some(timer) = timer {
                (timer.callback)();
                fired += 1;
            }
        }
        fired
    }

    /// Queues `f` for the next `run_frame`.
    pub fn request_frame(&self, f: impl FnOnce() + 'static) {
        self.frames.borrow_mut().push_back(Box::new(f));
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Runs the frame callbacks queued before this call. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let batch = std::mem::take(&mut *self.frames.borrow_mut());
        let n = batch.len();
        for f in batch {
            f();
        }
        n
    }
}
