//! Delayed callbacks tied to a component's lifetime.

use std::rc::Rc;
use std::time::Duration;
use usekit_core::{timers, use_effect_cleanup, use_ref};

/// Run `callback` once, `delay` after the first render.
///
/// The callback that runs is the one passed on the most recent render.
/// Changing `delay` restarts the timer; unmounting cancels it.
pub fn use_timeout<F>(callback: F, delay: Duration)
where
    F: Fn() + 'static,
{
    let latest = use_ref(|| -> Rc<dyn Fn()> { Rc::new(|| {}) });
    latest.set(Rc::new(callback));

    use_effect_cleanup(
        move || {
            let id = timers::set_timeout(delay, move || (latest.get())());
            move || {
                timers::clear_timeout(id);
            }
        },
        delay,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use usekit_core::{clear_hooks, host, render, unmount};

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn Fn()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |label: &'static str| -> Box<dyn Fn()> {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn latest_callback_fires_once() {
        host::reset();
        clear_hooks();
        let (log, make) = recorder();
        let delay = Duration::from_secs(1);

        render(|| use_timeout(make("first"), delay));
        render(|| use_timeout(make("second"), delay));
        timers::advance_time(Duration::from_secs(5));

        assert_eq!(*log.borrow(), ["second"]);
    }

    #[test]
    fn changing_delay_restarts_the_timer() {
        host::reset();
        clear_hooks();
        let (log, make) = recorder();

        render(|| use_timeout(make("toast"), Duration::from_millis(500)));
        timers::advance_time(Duration::from_millis(400));
        render(|| use_timeout(make("toast"), Duration::from_millis(300)));

        timers::advance_time(Duration::from_millis(200));
        assert!(log.borrow().is_empty());
        timers::advance_time(Duration::from_millis(100));
        assert_eq!(*log.borrow(), ["toast"]);
    }

    #[test]
    fn unmount_cancels_pending_callback() {
        host::reset();
        clear_hooks();
        let (log, make) = recorder();

        render(|| use_timeout(make("late"), Duration::from_millis(50)));
        unmount();
        timers::advance_time(Duration::from_millis(100));

        assert!(log.borrow().is_empty());
    }
}
