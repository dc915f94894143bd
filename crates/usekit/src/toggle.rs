//! Boolean state with a flip function.

use usekit_core::use_signal;

/// Keep a flag across renders. Returns the flag as of this render and a
/// function that flips it.
pub fn use_toggle(initial: bool) -> (bool, impl Fn() + Clone) {
    let state = use_signal(|| initial);
    let on = state.get();
    let toggle = move || state.update(|on| *on = !*on);
    (on, toggle)
}
