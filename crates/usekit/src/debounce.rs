//! Values that settle after a quiet period.

use std::time::Duration;
use usekit_core::{timers, use_effect_cleanup, use_signal};

/// Returns the last `value` that stayed unchanged for `delay`.
///
/// Every change to `value` (or `delay`) restarts the timer; until it fires
/// the previous settled value is returned. Unmounting cancels the timer.
pub fn use_debounce<T>(value: T, delay: Duration) -> T
where
    T: Clone + PartialEq + 'static,
{
    let settled = use_signal(|| value.clone());

    let target = settled.clone();
    let pending = value.clone();
    use_effect_cleanup(
        move || {
            let id = timers::set_timeout(delay, move || {
                target.set_if_changed(pending);
            });
            move || {
                timers::clear_timeout(id);
            }
        },
        (value, delay),
    );

    settled.get()
}
