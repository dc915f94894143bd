//! Listener registry for host events.
//!
//! Listeners are registered against an [`EventTarget`] and an [`EventKind`].
//! [`dispatch`] invokes the target's listeners and, for bubbling kinds, those
//! of every ancestor node, the document and the window.

use crate::host;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Handle to a node in the host's node tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a listener is attached.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EventTarget {
    Window,
    Document,
    Node(NodeId),
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EventKind {
    MouseEnter,
    MouseLeave,
    MouseDown,
    Focus,
    Blur,
    Resize,
    OrientationChange,
}

impl EventKind {
    /// Whether the event propagates from a node up to the window.
    pub fn bubbles(self) -> bool {
        matches!(self, EventKind::MouseDown)
    }

    pub fn name(self) -> &'static str {
        match self {
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::MouseDown => "mousedown",
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::Resize => "resize",
            EventKind::OrientationChange => "orientationchange",
        }
    }
}

/// An event as seen by a listener.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Event {
    pub kind: EventKind,
    /// Where the event originated.
    pub target: EventTarget,
    /// Whose listener is running.
    pub current_target: EventTarget,
}

impl Event {
    /// The originating node, if the event started at one.
    pub fn target_node(&self) -> Option<NodeId> {
        match self.target {
            EventTarget::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// Identifies a registered listener for removal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(usize);

type Listener = Rc<dyn Fn(&Event)>;

struct Registration {
    id: ListenerId,
    target: EventTarget,
    kind: EventKind,
    callback: Listener,
}

#[derive(Default)]
struct ListenerRegistry {
    registrations: Vec<Registration>,
    next_id: usize,
}

impl ListenerRegistry {
    fn is_registered(&self, id: ListenerId) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }

    fn matching(&self, target: EventTarget, kind: EventKind) -> Vec<(ListenerId, Listener)> {
        self.registrations
            .iter()
            .filter(|r| r.target == target && r.kind == kind)
            .map(|r| (r.id, Rc::clone(&r.callback)))
            .collect()
    }
}

thread_local! {
    static LISTENERS: RefCell<ListenerRegistry> = RefCell::new(ListenerRegistry::default());
}

/// Register `callback` for `kind` events reaching `target`.
pub fn add_event_listener(
    target: EventTarget,
    kind: EventKind,
    callback: impl Fn(&Event) + 'static,
) -> ListenerId {
    LISTENERS.with(|registry| {
        let mut registry = registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.registrations.push(Registration {
            id,
            target,
            kind,
            callback: Rc::new(callback),
        });
        id
    })
}

/// Remove a listener. Returns `false` if it was already gone.
pub fn remove_event_listener(id: ListenerId) -> bool {
    LISTENERS.with(|registry| {
        let mut registry = registry.borrow_mut();
        let before = registry.registrations.len();
        registry.registrations.retain(|r| r.id != id);
        registry.registrations.len() != before
    })
}

/// Drop every listener attached to `target`.
pub(crate) fn remove_target_listeners(target: EventTarget) {
    LISTENERS.with(|registry| {
        registry
            .borrow_mut()
            .registrations
            .retain(|r| r.target != target);
    });
}

/// Number of registered listeners.
pub fn listener_count() -> usize {
    LISTENERS.with(|registry| registry.borrow().registrations.len())
}

/// Drop every listener.
pub fn clear_listeners() {
    LISTENERS.with(|registry| *registry.borrow_mut() = ListenerRegistry::default());
}

fn propagation_path(target: EventTarget, kind: EventKind) -> Vec<EventTarget> {
    let mut path = vec![target];
    if !kind.bubbles() {
        return path;
    }

    if let EventTarget::Node(node) = target {
        let mut current = host::parent_of(node);
        while let Some(parent) = current {
            path.push(EventTarget::Node(parent));
            current = host::parent_of(parent);
        }
    }
    if target != EventTarget::Window {
        if target != EventTarget::Document {
            path.push(EventTarget::Document);
        }
        path.push(EventTarget::Window);
    }
    path
}

/// Deliver a `kind` event originating at `target`.
///
/// Listeners added during dispatch wait for the next event; listeners
/// removed during dispatch are skipped. Returns how many listeners ran.
pub fn dispatch(target: EventTarget, kind: EventKind) -> usize {
    let mut invoked = 0;

    for current_target in propagation_path(target, kind) {
        let listeners = LISTENERS.with(|registry| registry.borrow().matching(current_target, kind));
        let event = Event {
            kind,
            target,
            current_target,
        };

        for (id, callback) in listeners {
            if !LISTENERS.with(|registry| registry.borrow().is_registered(id)) {
                continue;
            }
            callback(&event);
            invoked += 1;
        }
    }

    trace!(event = kind.name(), ?target, invoked, "dispatched event");
    invoked
}
