//! Shared state cells.
//!
//! A [`Signal`] is the state hooks hand out: a value behind an `Rc`, so the
//! copy returned from a render and the copies captured by listeners, timers
//! and setters all see the same value.
//!
//! ```
//! use usekit_core::reactive::Signal;
//!
//! let width = Signal::new(320);
//! let resize = width.clone();
//! resize.set(1024);
//! assert_eq!(width.get(), 1024);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A shared, mutable value.
///
/// Cloning a signal yields another handle to the same value.
pub struct Signal<T> {
    value: Rc<RefCell<T>>,
}

impl<T> Signal<T> {
    /// Create a signal holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Replace the value.
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
    }

    /// Mutate the value in place.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
    }
}

impl<T: Clone> Signal<T> {
    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T: PartialEq> Signal<T> {
    /// Set the value only if it differs; returns whether it changed.
    pub fn set_if_changed(&self, value: T) -> bool {
        let mut current = self.value.borrow_mut();
        if *current == value {
            return false;
        }
        *current = value;
        true
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("value", &*self.value.borrow())
            .finish()
    }
}
