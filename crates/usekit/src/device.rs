//! Viewport classification.

use usekit_core::host::{self, WindowSize};
use usekit_core::{add_event_listener, remove_event_listener, use_mount, use_signal};
use usekit_core::{EventKind, EventTarget};

/// Width thresholds used to classify the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceBreakpoints {
    /// Windows narrower than this are mobile.
    pub mobile_max_width: u32,
}

impl Default for DeviceBreakpoints {
    fn default() -> Self {
        Self {
            mobile_max_width: 800,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Device {
    pub is_mobile: bool,
    pub is_desktop: bool,
}

impl Device {
    pub fn classify(width: u32, breakpoints: DeviceBreakpoints) -> Self {
        let is_mobile = width < breakpoints.mobile_max_width;
        Self {
            is_mobile,
            is_desktop: !is_mobile,
        }
    }
}

/// [`use_device_detection_with`] using the default breakpoints.
pub fn use_device_detection() -> Device {
    use_device_detection_with(DeviceBreakpoints::default())
}

/// Classify the window, re-reading its size on resize and orientation
/// changes.
pub fn use_device_detection_with(breakpoints: DeviceBreakpoints) -> Device {
    let size = use_signal(|| WindowSize {
        width: 0,
        height: 0,
    });

    let tracked = size.clone();
    use_mount(move || {
        tracked.set(host::window_size());
        let listeners: Vec<_> = [EventKind::Resize, EventKind::OrientationChange]
            .into_iter()
            .map(|kind| {
                let tracked = tracked.clone();
                add_event_listener(EventTarget::Window, kind, move |_| {
                    tracked.set_if_changed(host::window_size());
                })
            })
            .collect();
        move || {
            for id in listeners {
                remove_event_listener(id);
            }
        }
    });

    Device::classify(size.get().width, breakpoints)
}
