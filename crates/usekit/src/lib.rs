//! usekit - small React-style hooks for component state.
//!
//! Each hook is a few lines of state logic over the runtime in
//! [`usekit_core`]: signals for state, the hook registry for persistence
//! across renders, and the host environment for events, timers and the
//! location.
//!
//! # Quick Start
//!
//! ```
//! use usekit::prelude::*;
//!
//! fn pager(current_page: i64) -> String {
//!     let range = use_pagination(95, 10, current_page).expect("valid page size");
//!     range
//!         .items
//!         .iter()
//!         .map(ToString::to_string)
//!         .collect::<Vec<_>>()
//!         .join(" ")
//! }
//!
//! assert_eq!(render(|| pager(1)), "1 2 3 ... 10");
//! assert_eq!(render(|| pager(5)), "4 5 6 ... 10");
//! ```
//!
//! ## Available Hooks
//!
//! | Hook | Purpose |
//! |------|---------|
//! | [`use_pagination`] | Pager labels with ellipses for a page count |
//! | [`use_array`] | List state with `push`/`remove_by_index` |
//! | [`use_toggle`] | Boolean state with a flip function |
//! | [`use_debounce`] | Value that settles after a quiet period |
//! | [`use_timeout`] | Callback run once after a delay |
//! | [`use_previous`] | Value from the previous render |
//! | [`use_is_first_render`] | `true` on the first render only |
//! | [`use_is_mounted`] | Function reporting whether still mounted |
//! | [`use_effect_once`] | Effect run on the first render only |
//! | [`use_update_effect`] | Effect that skips the first render |
//! | [`use_device_detection`] | Mobile/desktop classification of the window |
//! | [`use_focus`] | Whether the window has focus |
//! | [`use_focus_ref`] | Whether an attached element has focus |
//! | [`use_hover`] | Whether the pointer is over an element |
//! | [`use_click_outside`] | Callback for presses outside an element |
//! | [`use_query_param`] | State synced to a query-string parameter |
//! | [`use_swr`] | Data fetched once per key |
//!
//! The hook rules of [`usekit_core::hooks`] apply: call hooks in the same
//! order on every render.
//!
//! [`use_pagination`]: pagination::use_pagination
//! [`use_array`]: array::use_array
//! [`use_toggle`]: toggle::use_toggle
//! [`use_debounce`]: debounce::use_debounce
//! [`use_timeout`]: timeout::use_timeout
//! [`use_previous`]: previous::use_previous
//! [`use_is_first_render`]: lifecycle::use_is_first_render
//! [`use_is_mounted`]: lifecycle::use_is_mounted
//! [`use_effect_once`]: lifecycle::use_effect_once
//! [`use_update_effect`]: lifecycle::use_update_effect
//! [`use_device_detection`]: device::use_device_detection
//! [`use_focus`]: focus::use_focus
//! [`use_focus_ref`]: focus::use_focus_ref
//! [`use_hover`]: hover::use_hover
//! [`use_click_outside`]: click_outside::use_click_outside
//! [`use_query_param`]: query_param::use_query_param
//! [`use_swr`]: swr::use_swr

pub mod array;
pub mod click_outside;
pub mod debounce;
pub mod device;
pub mod focus;
pub mod hover;
pub mod lifecycle;
pub mod pagination;
pub mod previous;
pub mod query_param;
pub mod swr;
pub mod timeout;
pub mod toggle;

pub mod prelude {
    //! Common imports for components using usekit.
    pub use crate::array::{use_array, UseArray};
    pub use crate::click_outside::use_click_outside;
    pub use crate::debounce::use_debounce;
    pub use crate::device::{
        use_device_detection, use_device_detection_with, Device, DeviceBreakpoints,
    };
    pub use crate::focus::{use_focus, use_focus_ref, FocusRef};
    pub use crate::hover::use_hover;
    pub use crate::lifecycle::{
        use_effect_once, use_is_first_render, use_is_mounted, use_update_effect,
    };
    pub use crate::pagination::{
        compute, use_pagination, PageItem, PaginationError, PaginationRange, ELLIPSIS,
    };
    pub use crate::previous::use_previous;
    pub use crate::query_param::use_query_param;
    pub use crate::swr::{use_swr, Fetch, SwrResponse};
    pub use crate::timeout::use_timeout;
    pub use crate::toggle::use_toggle;

    pub use usekit_core::{
        render, unmount, use_effect_cleanup, use_memo, use_mount, use_ref, use_signal, RefHandle,
        Signal,
    };
    pub use usekit_core::{host, timers, HostConfig, NodeId};
}

pub use pagination::{compute, PageItem, PaginationError, PaginationRange};
pub use usekit_core;
