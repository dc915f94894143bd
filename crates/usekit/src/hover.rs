//! Pointer hover tracking.

use usekit_core::{
    add_event_listener, remove_event_listener, use_effect_cleanup, use_signal, EventKind,
    EventTarget, NodeId,
};

/// Whether the pointer is over `node`.
///
/// Switching to a different node resets the state to not hovered.
pub fn use_hover(node: NodeId) -> bool {
    let hovered = use_signal(|| false);

    let tracked = hovered.clone();
    use_effect_cleanup(
        move || {
            tracked.set_if_changed(false);
            let listen = |kind: EventKind, value: bool| {
                let tracked = tracked.clone();
                add_event_listener(EventTarget::Node(node), kind, move |_| {
                    tracked.set_if_changed(value);
                })
            };
            let enter = listen(EventKind::MouseEnter, true);
            let leave = listen(EventKind::MouseLeave, false);
            move || {
                remove_event_listener(enter);
                remove_event_listener(leave);
            }
        },
        node,
    );

    hovered.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use usekit_core::{clear_hooks, events, host, render, unmount};

    #[test]
    fn tracks_enter_and_leave() {
        host::reset();
        clear_hooks();
        let card = host::create_node(None);

        assert!(!render(|| use_hover(card)));
        host::pointer_enter(card);
        assert!(render(|| use_hover(card)));
        host::pointer_leave(card);
        assert!(!render(|| use_hover(card)));
    }

    #[test]
    fn ignores_other_nodes() {
        host::reset();
        clear_hooks();
        let card = host::create_node(None);
        let badge = host::create_node(Some(card));

        render(|| use_hover(card));
        host::pointer_enter(badge);
        assert!(!render(|| use_hover(card)));
    }

    #[test]
    fn switching_nodes_rebinds_and_resets() {
        host::reset();
        clear_hooks();
        let first = host::create_node(None);
        let second = host::create_node(None);

        render(|| use_hover(first));
        host::pointer_enter(first);
        assert!(!render(|| use_hover(second)));
        assert_eq!(events::listener_count(), 2);

        host::pointer_enter(second);
        assert!(render(|| use_hover(second)));
    }

    #[test]
    fn unmount_removes_both_listeners() {
        host::reset();
        clear_hooks();
        let card = host::create_node(None);

        render(|| use_hover(card));
        unmount();
        assert_eq!(events::listener_count(), 0);
    }
}
