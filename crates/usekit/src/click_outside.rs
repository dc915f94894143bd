//! Detect presses that land outside an element, e.g. to close a popover.

use std::rc::Rc;
use usekit_core::{
    add_event_listener, host, remove_event_listener, use_effect_cleanup, use_ref, EventKind,
    EventTarget, NodeId,
};

/// Call `callback` whenever a mouse button goes down outside `node`.
///
/// The callback passed on the most recent render is the one invoked.
pub fn use_click_outside<F>(node: NodeId, callback: F)
where
    F: Fn() + 'static,
{
    let latest = use_ref(|| -> Rc<dyn Fn()> { Rc::new(|| {}) });
    latest.set(Rc::new(callback));

    use_effect_cleanup(
        move || {
            let id = add_event_listener(EventTarget::Document, EventKind::MouseDown, move |event| {
                let inside = event
                    .target_node()
                    .is_some_and(|target| host::contains(node, target));
                if !inside {
                    (latest.get())();
                }
            });
            move || {
                remove_event_listener(id);
            }
        },
        node,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use usekit_core::{clear_hooks, dispatch, render, unmount};

    fn popover() -> (NodeId, NodeId, NodeId) {
        let page = host::create_node(None);
        let menu = host::create_node(Some(page));
        let item = host::create_node(Some(menu));
        (page, menu, item)
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let hits = Rc::new(Cell::new(0));
        let bump = Rc::clone(&hits);
        (hits, move || bump.set(bump.get() + 1))
    }

    #[test]
    fn fires_only_for_presses_outside() {
        host::reset();
        clear_hooks();
        let (page, menu, item) = popover();
        let (hits, bump) = counter();

        render(|| use_click_outside(menu, bump));

        host::mouse_down(item);
        host::mouse_down(menu);
        assert_eq!(hits.get(), 0);

        host::mouse_down(page);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn press_on_document_counts_as_outside() {
        host::reset();
        clear_hooks();
        let (_, menu, _) = popover();
        let (hits, bump) = counter();

        render(|| use_click_outside(menu, bump));
        dispatch(EventTarget::Document, EventKind::MouseDown);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn stops_after_unmount() {
        host::reset();
        clear_hooks();
        let (page, menu, _) = popover();
        let (hits, bump) = counter();

        render(|| use_click_outside(menu, bump));
        unmount();
        host::mouse_down(page);
        assert_eq!(hits.get(), 0);
    }
}
