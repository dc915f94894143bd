//! List state with push/remove helpers.

use usekit_core::{use_signal, Signal};

/// Returned by [`use_array`].
#[derive(Debug)]
pub struct UseArray<T> {
    /// The list as of this render.
    pub value: Vec<T>,
    state: Signal<Vec<T>>,
}

impl<T> UseArray<T> {
    /// Append `item`.
    pub fn push(&self, item: T) {
        self.state.update(|items| items.push(item));
    }

    /// Remove the item at `index`; an out-of-range index changes nothing.
    pub fn remove_by_index(&self, index: usize) {
        self.state.update(|items| {
            if index < items.len() {
                items.remove(index);
            }
        });
    }

    /// The live list, including changes made since this render.
    pub fn signal(&self) -> Signal<Vec<T>> {
        self.state.clone()
    }
}

impl<T> Clone for UseArray<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            state: self.state.clone(),
        }
    }
}

/// Keep a list across renders, starting from `initial`.
pub fn use_array<T: Clone + 'static>(initial: impl FnOnce() -> Vec<T>) -> UseArray<T> {
    let state = use_signal(initial);
    UseArray {
        value: state.get(),
        state,
    }
}
