//! A virtual clock with one-shot timers.
//!
//! Time only moves when the embedder calls [`advance_time`], which makes
//! timer-driven hooks such as debouncing fully deterministic. Deadlines
//! saturate at [`Duration::MAX`].

use std::cell::RefCell;
use std::time::Duration;
use tracing::trace;

/// Identifies a scheduled timer for cancellation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TimerId(u64);

struct Timer {
    id: TimerId,
    deadline: Duration,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    timers: Vec<Timer>,
    next_id: u64,
    /// Set while [`advance_time`] runs callbacks.
    firing: bool,
}

impl Clock {
    /// Remove and return the earliest timer due at or before `limit`.
    fn pop_due(&mut self, limit: Duration) -> Option<Timer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= limit)
            .min_by_key(|(_, timer)| (timer.deadline, timer.id))
            .map(|(index, _)| index)?;
        Some(self.timers.swap_remove(index))
    }
}

const MIN_NESTED_DELAY: Duration = Duration::from_nanos(1);

thread_local! {
    static CLOCK: RefCell<Clock> = RefCell::new(Clock::default());
}

/// Time elapsed on the virtual clock.
pub fn now() -> Duration {
    CLOCK.with(|clock| clock.borrow().now)
}

/// Run `callback` once, `delay` from now.
///
/// A timer scheduled from a timer callback waits at least one nanosecond,
/// so a callback that keeps rescheduling itself cannot stall
/// [`advance_time`].
pub fn set_timeout(delay: Duration, callback: impl FnOnce() + 'static) -> TimerId {
    CLOCK.with(|clock| {
        let mut clock = clock.borrow_mut();
        let id = TimerId(clock.next_id);
        clock.next_id += 1;
        let delay = if clock.firing {
            delay.max(MIN_NESTED_DELAY)
        } else {
            delay
        };
        let deadline = clock.now.saturating_add(delay);
        clock.timers.push(Timer {
            id,
            deadline,
            callback: Box::new(callback),
        });
        id
    })
}

/// Cancel a timer. Returns `false` if it already fired or was cancelled.
pub fn clear_timeout(id: TimerId) -> bool {
    CLOCK.with(|clock| {
        let mut clock = clock.borrow_mut();
        let before = clock.timers.len();
        clock.timers.retain(|timer| timer.id != id);
        clock.timers.len() != before
    })
}

/// Timers still waiting to fire.
pub fn pending_timers() -> usize {
    CLOCK.with(|clock| clock.borrow().timers.len())
}

/// Move the clock forward by `by`, firing due timers in deadline order.
///
/// Timers scheduled by a callback fire in the same call if their deadline
/// falls inside the window. Returns how many timers fired.
pub fn advance_time(by: Duration) -> usize {
    let limit = now().saturating_add(by);
    let mut fired = 0;

    while let Some(timer) = CLOCK.with(|clock| {
        let mut clock = clock.borrow_mut();
        let timer = clock.pop_due(limit)?;
        clock.now = timer.deadline;
        clock.firing = true;
        Some(timer)
    }) {
        trace!(id = timer.id.0, at = ?timer.deadline, "firing timer");
        (timer.callback)();
        fired += 1;
        CLOCK.with(|clock| clock.borrow_mut().firing = false);
    }

    CLOCK.with(|clock| clock.borrow_mut().now = limit);
    fired
}

/// Drop every timer and rewind the clock.
pub fn clear_timers() {
    CLOCK.with(|clock| *clock.borrow_mut() = Clock::default());
}
