//! Runtime for usekit hooks: shared state, the hook registry, and the
//! single-threaded host environment hooks bind to.

pub mod events;
pub mod hooks;
pub mod host;
pub mod reactive;
pub mod timers;

pub use reactive::Signal;

pub use hooks::{
    begin_render, clear_hooks, end_render, render, render_count, unmount, use_effect_cleanup,
    use_memo, use_mount, use_ref, use_signal, RefHandle,
};

pub use events::{
    add_event_listener, dispatch, remove_event_listener, Event, EventKind, EventTarget,
    ListenerId, NodeId,
};

pub use host::{HostConfig, HostError, WindowSize};

pub use timers::{advance_time, clear_timeout, set_timeout, TimerId};
