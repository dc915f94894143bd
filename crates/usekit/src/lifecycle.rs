//! Render-lifecycle helpers: first render, mounted state, one-shot and
//! update-only effects.

use std::cell::Cell;
use std::rc::Rc;
use usekit_core::{use_effect_cleanup, use_mount, use_ref};

/// `true` during the first render only.
pub fn use_is_first_render() -> bool {
    let first = use_ref(|| true);
    first.replace(false)
}

/// A function reporting whether the component is still mounted.
///
/// The function keeps working after [`usekit_core::unmount`], where it
/// returns `false`; hand it to timers or listeners that may outlive the
/// component.
pub fn use_is_mounted() -> impl Fn() -> bool + Clone {
    let mounted = use_ref(|| Rc::new(Cell::new(false))).get();

    let flag = Rc::clone(&mounted);
    use_mount(move || {
        flag.set(true);
        move || flag.set(false)
    });

    move || mounted.get()
}

/// Run `effect` once, on the first render; its cleanup runs on unmount.
pub fn use_effect_once<F, C>(effect: F)
where
    F: FnOnce() -> C + 'static,
    C: FnOnce() + 'static,
{
    use_mount(effect);
}

/// Run `effect` when `deps` change, skipping the first render.
pub fn use_update_effect<F, C, D>(effect: F, deps: D)
where
    F: FnOnce() -> C + 'static,
    C: FnOnce() + 'static,
    D: PartialEq + 'static,
{
    let first = use_ref(|| true);
    use_effect_cleanup(
        move || -> Box<dyn FnOnce()> {
            if first.replace(false) {
                Box::new(|| {})
            } else {
                Box::new(effect())
            }
        },
        deps,
    );
}
