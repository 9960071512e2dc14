#[cfg(test)]
mod tests {
    use crate::Rect;
    use crate::clock::*;
    use crate::input::*;
    use crate::locals::*;
    use crate::scheduler::*;
    use crate::scope::*;
    use crate::signal::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;
    use web_time::Instant;

    fn manual() -> (Rc<ManualClock>, Scheduler) {
        let clock = Rc::new(ManualClock::new(Instant::now()));
        let scheduler = Scheduler::new(clock.clone());
        (clock, scheduler)
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let called = Rc::new(RefCell::new(false));

        let called_clone = called.clone();
        sig.subscribe(move |_| {
            *called_clone.borrow_mut() = true;
        });

        sig.set(42);
        assert!(*called.borrow());
    }

    #[test]
    fn test_signal_subscriber_can_read() {
        let sig = signal(1);
        let seen = Rc::new(RefCell::new(0));
        {
            let sig2 = sig.clone();
            let seen = seen.clone();
            sig.subscribe(move |_| *seen.borrow_mut() = sig2.get());
        }
        sig.set(7);
        assert_eq!(*seen.borrow(), 7);
    }

    #[test]
    fn test_signal_set_if_changed_and_unsubscribe() {
        let sig = signal(false);
        let hits = Rc::new(RefCell::new(0));
        let id = {
            let hits = hits.clone();
            sig.subscribe(move |_| *hits.borrow_mut() += 1)
        };

        assert!(sig.set_if_changed(true));
        assert!(!sig.set_if_changed(true));
        assert_eq!(*hits.borrow(), 1);

        sig.unsubscribe(id);
        sig.set(false);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || {
            *cleaned_up_clone.borrow_mut() = true;
        });

        assert!(!*cleaned_up.borrow());
        scope.dispose();
        assert!(*cleaned_up.borrow());
    }

    #[test]
    fn test_scope_drop_runs_children_first() {
        let order = Rc::new(RefCell::new(Vec::new()));
        {
            let scope = Scope::new();
            let child = scope.child();
            let o = order.clone();
            scope.add_disposer(move || o.borrow_mut().push("parent"));
            let o = order.clone();
            child.add_disposer(move || o.borrow_mut().push("child"));
        }
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn test_scoped_effect_registers_with_current_scope() {
        let ran = Rc::new(RefCell::new(0));
        let scope = Scope::new();
        scope.run(|| {
            let ran = ran.clone();
            scoped_effect(move || Box::new(move || *ran.borrow_mut() += 1));
        });
        assert!(current_scope().is_none());
        assert_eq!(*ran.borrow(), 0);
        scope.dispose();
        assert_eq!(*ran.borrow(), 1);
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::from_edges(100.0, 50.0, 150.0, 130.0);
        assert_eq!(rect, Rect::new(50.0, 100.0, 100.0, 30.0));
        assert_eq!(rect.right(), 150.0);
        assert_eq!(rect.bottom(), 130.0);
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!("ArrowDown".parse::<Key>(), Ok(Key::ArrowDown));
        assert_eq!("q".parse::<Key>(), Ok(Key::Character('q')));
        assert_eq!("F5".parse::<Key>(), Ok(Key::F(5)));
        assert!("Hyper".parse::<Key>().is_err());
        assert!("F13".parse::<Key>().is_err());

        assert_eq!(Key::Character('A').printable(), Some('A'));
        assert_eq!(Key::Space.printable(), None);
        assert_eq!(Key::Enter.printable(), None);
    }

    #[test]
    fn test_text_direction_local() {
        assert_eq!(text_direction(), TextDirection::Ltr);
        let inner = with_text_direction(TextDirection::Rtl, text_direction);
        assert_eq!(inner, TextDirection::Rtl);
        assert_eq!(text_direction(), TextDirection::Ltr);
        assert_eq!("rtl".parse::<TextDirection>(), Ok(TextDirection::Rtl));
    }

    #[test]
    fn test_scheduler_timeout_fires_once_due() {
        let (clock, scheduler) = manual();
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        let id = scheduler.set_timeout(Duration::from_millis(400), move || {
            *h.borrow_mut() += 1
        });

        clock.advance(Duration::from_millis(399));
        assert_eq!(scheduler.run_due_timers(), 0);
        assert!(scheduler.is_pending(id));

        clock.advance(Duration::from_millis(1));
        assert_eq!(scheduler.run_due_timers(), 1);
        assert_eq!(scheduler.run_due_timers(), 0);
        assert_eq!(*hits.borrow(), 1);
        assert!(!scheduler.is_pending(id));
    }

    #[test]
    fn test_scheduler_stale_id_is_noop() {
        let (clock, scheduler) = manual();
        let first = scheduler.set_timeout(Duration::ZERO, || {});
        clock.advance(Duration::from_millis(1));
        scheduler.run_due_timers();

        let second = scheduler.set_timeout(Duration::from_millis(10), || {});
        assert!(!scheduler.clear_timeout(first));
        assert!(scheduler.is_pending(second));
    }

    #[test]
    fn test_scheduler_order_and_reentrancy() {
        let (clock, scheduler) = manual();
        let scheduler = Rc::new(scheduler);
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        scheduler.set_timeout(Duration::from_millis(20), move || l.borrow_mut().push(20));
        let l = log.clone();
        let s = scheduler.clone();
        scheduler.set_timeout(Duration::from_millis(10), move || {
            l.borrow_mut().push(10);
            let l = l.clone();
            s.set_timeout(Duration::ZERO, move || l.borrow_mut().push(0));
        });

        clock.advance(Duration::from_millis(50));
        assert_eq!(scheduler.run_due_timers(), 2);
        assert_eq!(*log.borrow(), vec![10, 20]);
        // Scheduled during the previous pass.
        assert_eq!(scheduler.run_due_timers(), 1);
        assert_eq!(*log.borrow(), vec![10, 20, 0]);
    }

    #[test]
    fn test_scheduler_frames() {
        let (_clock, scheduler) = manual();
        let scheduler = Rc::new(scheduler);
        let ran = Rc::new(RefCell::new(Vec::new()));

        let r = ran.clone();
        let s = scheduler.clone();
        scheduler.request_frame(move || {
            r.borrow_mut().push(1);
            let r = r.clone();
            s.request_frame(move || r.borrow_mut().push(2));
        });

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(*ran.borrow(), vec![1]);
        assert_eq!(scheduler.pending_frames(), 1);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(*ran.borrow(), vec![1, 2]);
    }
}
