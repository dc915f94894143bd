//! The host environment hooks bind to.
//!
//! A browser gives hooks a window, a document tree, a clock and a location.
//! This module models that environment for a single thread: an embedder (or
//! a test) configures it, mutates it through the functions below, and every
//! mutation is announced through [`crate::events`] the way the platform
//! would announce it.

use crate::events::{self, EventKind, EventTarget, NodeId};
use crate::timers;
use std::cell::RefCell;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Initial state of the host.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Whether the window starts with input focus.
    pub focused: bool,
    /// `None` models a host without a location API.
    pub location: Option<Url>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 768,
            focused: true,
            location: None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

struct NodeState {
    parent: Option<NodeId>,
}

struct HostState {
    window: WindowSize,
    focused: bool,
    location: Option<Url>,
    nodes: Vec<Option<NodeState>>,
    focused_node: Option<NodeId>,
}

impl HostState {
    fn new(config: HostConfig) -> Self {
        Self {
            window: WindowSize {
                width: config.window_width,
                height: config.window_height,
            },
            focused: config.focused,
            location: config.location,
            nodes: Vec::new(),
            focused_node: None,
        }
    }

    fn is_live(&self, node: NodeId) -> bool {
        matches!(self.nodes.get(node.0), Some(Some(_)))
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.as_ref()?.parent
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_live(ancestor) || !self.is_live(node) {
            return false;
        }
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent_of(candidate);
        }
        false
    }
}

thread_local! {
    static HOST: RefCell<HostState> = RefCell::new(HostState::new(HostConfig::default()));
}

/// Replace the host state with `config`; nodes, listeners and timers are
/// dropped.
pub fn configure(config: HostConfig) {
    debug!(?config, "configuring host");
    HOST.with(|host| *host.borrow_mut() = HostState::new(config));
    events::clear_listeners();
    timers::clear_timers();
}

/// Restore the default host.
pub fn reset() {
    configure(HostConfig::default());
}

// ============================================================================
// Window
// ============================================================================

pub fn window_size() -> WindowSize {
    HOST.with(|host| host.borrow().window)
}

/// Resize the window and dispatch `Resize`.
pub fn set_window_size(width: u32, height: u32) {
    HOST.with(|host| host.borrow_mut().window = WindowSize { width, height });
    events::dispatch(EventTarget::Window, EventKind::Resize);
}

/// Swap the window's dimensions and dispatch `OrientationChange`.
pub fn rotate() {
    HOST.with(|host| {
        let mut host = host.borrow_mut();
        let WindowSize { width, height } = host.window;
        host.window = WindowSize {
            width: height,
            height: width,
        };
    });
    events::dispatch(EventTarget::Window, EventKind::OrientationChange);
}

pub fn has_focus() -> bool {
    HOST.with(|host| host.borrow().focused)
}

/// Give or take window focus, dispatching `Focus`/`Blur` on a change.
pub fn set_focus(focused: bool) {
    let changed = HOST.with(|host| {
        let mut host = host.borrow_mut();
        std::mem::replace(&mut host.focused, focused) != focused
    });
    if changed {
        let kind = if focused { EventKind::Focus } else { EventKind::Blur };
        events::dispatch(EventTarget::Window, kind);
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// Create a node under `parent` (or a detached root).
pub fn create_node(parent: Option<NodeId>) -> NodeId {
    HOST.with(|host| {
        let mut host = host.borrow_mut();
        let id = NodeId(host.nodes.len());
        host.nodes.push(Some(NodeState { parent }));
        id
    })
}

/// Remove `node` and its descendants, along with their listeners.
pub fn remove_node(node: NodeId) {
    let removed: Vec<NodeId> = HOST.with(|host| {
        let mut host = host.borrow_mut();
        let doomed: Vec<NodeId> = (0..host.nodes.len())
            .map(NodeId)
            .filter(|&candidate| host.contains(node, candidate))
            .collect();
        for id in &doomed {
            host.nodes[id.0] = None;
            if host.focused_node == Some(*id) {
                host.focused_node = None;
            }
        }
        doomed
    });

    for id in removed {
        events::remove_target_listeners(EventTarget::Node(id));
    }
}

pub fn parent_of(node: NodeId) -> Option<NodeId> {
    HOST.with(|host| host.borrow().parent_of(node))
}

/// Whether `node` is `ancestor` or one of its descendants.
pub fn contains(ancestor: NodeId, node: NodeId) -> bool {
    HOST.with(|host| host.borrow().contains(ancestor, node))
}

pub fn focused_node() -> Option<NodeId> {
    HOST.with(|host| host.borrow().focused_node)
}

/// Move element focus to `node`, blurring the previously focused node.
pub fn focus_node(node: NodeId) {
    let previous = HOST.with(|host| {
        let mut host = host.borrow_mut();
        if !host.is_live(node) {
            return None;
        }
        host.focused_node.replace(node)
    });
    if previous == Some(node) {
        return;
    }
    if let Some(previous) = previous {
        events::dispatch(EventTarget::Node(previous), EventKind::Blur);
    }
    if focused_node() == Some(node) {
        events::dispatch(EventTarget::Node(node), EventKind::Focus);
    }
}

/// Clear element focus, dispatching `Blur` to the node that had it.
pub fn blur_node() {
    if let Some(previous) = HOST.with(|host| host.borrow_mut().focused_node.take()) {
        events::dispatch(EventTarget::Node(previous), EventKind::Blur);
    }
}

/// The pointer moved onto `node`.
pub fn pointer_enter(node: NodeId) {
    events::dispatch(EventTarget::Node(node), EventKind::MouseEnter);
}

/// The pointer moved off `node`.
pub fn pointer_leave(node: NodeId) {
    events::dispatch(EventTarget::Node(node), EventKind::MouseLeave);
}

/// A mouse button went down over `node`.
pub fn mouse_down(node: NodeId) {
    events::dispatch(EventTarget::Node(node), EventKind::MouseDown);
}

// ============================================================================
// Location
// ============================================================================

pub fn location() -> Option<Url> {
    HOST.with(|host| host.borrow().location.clone())
}

/// Point the location at `url`.
pub fn navigate(url: &str) -> Result<(), HostError> {
    let url = Url::parse(url)?;
    replace_state(url);
    Ok(())
}

/// Rewrite the current location without navigating.
pub fn replace_state(url: Url) {
    debug!(%url, "replacing location");
    HOST.with(|host| host.borrow_mut().location = Some(url));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn configure_installs_window_and_location() {
        configure(HostConfig {
            window_width: 375,
            window_height: 812,
            focused: false,
            location: Some(Url::parse("https://shop.test/items?page=2").unwrap()),
        });

        assert_eq!(
            window_size(),
            WindowSize {
                width: 375,
                height: 812
            }
        );
        assert!(!has_focus());
        assert_eq!(location().unwrap().query(), Some("page=2"));
    }

    #[test]
    fn rotate_swaps_dimensions() {
        configure(HostConfig {
            window_width: 375,
            window_height: 812,
            ..HostConfig::default()
        });
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        events::add_event_listener(EventTarget::Window, EventKind::OrientationChange, move |_| {
            flag.set(true)
        });

        rotate();
        assert_eq!(window_size().width, 812);
        assert!(fired.get());
    }

    #[test]
    fn set_focus_only_dispatches_on_change() {
        reset();
        let blurs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&blurs);
        events::add_event_listener(EventTarget::Window, EventKind::Blur, move |_| {
            counter.set(counter.get() + 1)
        });

        set_focus(true);
        set_focus(false);
        set_focus(false);
        assert_eq!(blurs.get(), 1);
    }

    #[test]
    fn containment_follows_parents() {
        reset();
        let menu = create_node(None);
        let item = create_node(Some(menu));
        let label = create_node(Some(item));
        let other = create_node(None);

        assert!(contains(menu, label));
        assert!(contains(item, item));
        assert!(!contains(label, menu));
        assert!(!contains(menu, other));
    }

    #[test]
    fn removing_a_node_removes_descendants() {
        reset();
        let menu = create_node(None);
        let item = create_node(Some(menu));
        events::add_event_listener(EventTarget::Node(item), EventKind::MouseEnter, |_| {});

        remove_node(menu);
        assert!(!contains(item, item));
        assert_eq!(events::listener_count(), 0);
    }

    #[test]
    fn focus_moves_between_nodes() {
        reset();
        let first = create_node(None);
        let second = create_node(None);
        let log = Rc::new(RefCell::new(Vec::new()));
        for (node, kind) in [
            (first, EventKind::Focus),
            (first, EventKind::Blur),
            (second, EventKind::Focus),
        ] {
            let log = Rc::clone(&log);
            events::add_event_listener(EventTarget::Node(node), kind, move |event| {
                log.borrow_mut().push((node, event.kind))
            });
        }

        focus_node(first);
        focus_node(second);
        assert_eq!(
            *log.borrow(),
            [
                (first, EventKind::Focus),
                (first, EventKind::Blur),
                (second, EventKind::Focus)
            ]
        );
        assert_eq!(focused_node(), Some(second));
    }

    #[test]
    fn navigate_rejects_garbage() {
        reset();
        assert!(matches!(
            navigate("not a url"),
            Err(HostError::InvalidUrl(_))
        ));
        navigate("https://shop.test/?q=shoes").unwrap();
        assert_eq!(location().unwrap().query(), Some("q=shoes"));
    }
}
