//! Window and element focus tracking.

use std::cell::RefCell;
use std::rc::Rc;
use usekit_core::{
    add_event_listener, host, remove_event_listener, use_mount, use_ref, use_signal, EventKind,
    EventTarget, ListenerId, NodeId, Signal,
};

/// Whether the window has input focus, plus a setter to override it.
pub fn use_focus() -> (bool, impl Fn(bool) + Clone) {
    let focused = use_signal(host::has_focus);

    let tracked = focused.clone();
    use_mount(move || {
        let on_focus = {
            let tracked = tracked.clone();
            add_event_listener(EventTarget::Window, EventKind::Focus, move |_| {
                tracked.set_if_changed(true);
            })
        };
        let on_blur = add_event_listener(EventTarget::Window, EventKind::Blur, move |_| {
            tracked.set_if_changed(false);
        });
        move || {
            remove_event_listener(on_focus);
            remove_event_listener(on_blur);
        }
    });

    let value = focused.get();
    (value, move |value: bool| focused.set(value))
}

/// Attach point returned by [`use_focus_ref`].
///
/// Attaching moves the focus/blur listeners to the new node; attaching
/// `None` detaches them.
#[derive(Clone)]
pub struct FocusRef {
    focused: Signal<bool>,
    binding: Rc<RefCell<Option<Binding>>>,
}

struct Binding {
    node: NodeId,
    listeners: [ListenerId; 2],
}

impl FocusRef {
    pub fn attach(&self, node: Option<NodeId>) {
        let mut binding = self.binding.borrow_mut();
        if binding.as_ref().map(|b| b.node) == node {
            return;
        }
        if let Some(previous) = binding.take() {
            for id in previous.listeners {
                remove_event_listener(id);
            }
        }

        let Some(node) = node else {
            return;
        };
        let listen = |kind: EventKind, focused: bool| {
            let signal = self.focused.clone();
            add_event_listener(EventTarget::Node(node), kind, move |_| {
                signal.set_if_changed(focused);
            })
        };
        *binding = Some(Binding {
            node,
            listeners: [listen(EventKind::Focus, true), listen(EventKind::Blur, false)],
        });
    }

    /// The node currently attached.
    pub fn node(&self) -> Option<NodeId> {
        self.binding.borrow().as_ref().map(|b| b.node)
    }
}

/// Track whether an attached element has focus.
pub fn use_focus_ref() -> (FocusRef, bool) {
    let focused = use_signal(|| false);
    let binding = use_ref(|| Rc::new(RefCell::new(None::<Binding>))).get();

    let detach = Rc::clone(&binding);
    use_mount(move || {
        move || {
            if let Some(previous) = detach.borrow_mut().take() {
                for id in previous.listeners {
                    remove_event_listener(id);
                }
            }
        }
    });

    let value = focused.get();
    (FocusRef { focused, binding }, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use usekit_core::{clear_hooks, events, render, unmount};

    #[test]
    fn window_focus_is_mirrored() {
        host::reset();
        clear_hooks();

        let (focused, _) = render(use_focus);
        assert!(focused);

        host::set_focus(false);
        assert!(!render(use_focus).0);
        host::set_focus(true);
        assert!(render(use_focus).0);
    }

    #[test]
    fn setter_overrides_state() {
        host::reset();
        clear_hooks();

        let (_, set_focused) = render(use_focus);
        set_focused(false);
        assert!(!render(use_focus).0);
    }

    #[test]
    fn focus_ref_tracks_attached_node() {
        host::reset();
        clear_hooks();
        let search = host::create_node(None);
        let other = host::create_node(None);

        let (input, focused) = render(use_focus_ref);
        assert!(!focused);
        input.attach(Some(search));

        host::focus_node(search);
        assert!(render(use_focus_ref).1);
        host::focus_node(other);
        assert!(!render(use_focus_ref).1);
    }

    #[test]
    fn reattaching_moves_listeners() {
        host::reset();
        clear_hooks();
        let first = host::create_node(None);
        let second = host::create_node(None);

        let (input, _) = render(use_focus_ref);
        input.attach(Some(first));
        input.attach(Some(second));
        assert_eq!(input.node(), Some(second));
        assert_eq!(events::listener_count(), 2);

        host::focus_node(first);
        assert!(!render(use_focus_ref).1);
        host::focus_node(second);
        assert!(render(use_focus_ref).1);

        input.attach(None);
        assert_eq!(events::listener_count(), 0);
    }

    #[test]
    fn unmount_detaches() {
        host::reset();
        clear_hooks();
        let field = host::create_node(None);

        let (input, _) = render(use_focus_ref);
        input.attach(Some(field));
        unmount();

        assert_eq!(events::listener_count(), 0);
        assert_eq!(input.node(), None);
    }
}
