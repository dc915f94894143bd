//! Remember what a value was on the previous render.

use usekit_core::use_ref;

/// Returns the `value` passed on the previous render, or `None` on the first.
pub fn use_previous<T: Clone + 'static>(value: T) -> Option<T> {
    let last = use_ref(|| None::<T>);
    last.replace(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use usekit_core::{clear_hooks, render};

    #[test]
    fn lags_one_render_behind() {
        clear_hooks();

        assert_eq!(render(|| use_previous(1)), None);
        assert_eq!(render(|| use_previous(2)), Some(1));
        assert_eq!(render(|| use_previous(2)), Some(2));
        assert_eq!(render(|| use_previous(5)), Some(2));
    }
}
