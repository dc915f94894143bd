//! Positional hook registry and the base hooks every utility builds on.
//!
//! A component is a plain function called once per render. Hooks called from
//! it keep their state in a thread-local registry, identified by the order in
//! which they are called:
//!
//! ```
//! use usekit_core::hooks::{render, use_signal};
//!
//! fn pager() -> u32 {
//!     let page = use_signal(|| 1);
//!     page.update(|p| *p += 1);
//!     page.get()
//! }
//!
//! assert_eq!(render(pager), 2);
//! assert_eq!(render(pager), 3);
//! ```
//!
//! # Available Hooks
//!
//! | Hook | Purpose |
//! |------|---------|
//! | [`use_signal`] | State shared with event handlers and timers |
//! | [`use_ref`] | Mutable cell that survives renders |
//! | [`use_effect_cleanup`] | Side effect, with a cleanup, re-run when dependencies change |
//! | [`use_mount`] | Side effect run on the first render only |
//! | [`use_memo`] | Cached computation keyed by dependencies |
//!
//! # Rules of Hooks
//!
//! Hooks must be called in the same order on every render: not inside
//! conditionals, loops, after early returns, or from event handlers. The
//! registry panics when it detects a hook called outside a render, a changed
//! hook count, or a changed hook order.
//!
//! # Lifecycle
//!
//! Effects run synchronously, in call order, during the render that
//! scheduled them. [`unmount`] runs every outstanding cleanup and forgets all
//! hook state, as if the component left the tree.

use crate::reactive::Signal;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

type Cleanup = Box<dyn FnOnce()>;
type CleanupSlot = Rc<RefCell<Option<Cleanup>>>;

// ============================================================================
// Hook Registry
// ============================================================================

/// What was stored at a hook position, for mismatch messages.
struct HookMeta {
    /// Hook function name, e.g. `"use_signal"`.
    hook_type: &'static str,
    /// Stored value type, from [`std::any::type_name`].
    value_type: &'static str,
}

struct HookEntry {
    value: Box<dyn Any>,
    meta: HookMeta,
}

/// Hook state for one component tree.
#[derive(Default)]
struct HookRegistry {
    hooks: Vec<HookEntry>,
    /// Position of the next hook in the current render.
    current_index: usize,
    is_rendering: bool,
    /// Hook count of the previous render.
    expected_count: Option<usize>,
    render_count: usize,
    /// Cleanup slots of every effect hook, in creation order.
    cleanups: Vec<CleanupSlot>,
}

impl HookRegistry {
    fn begin_render(&mut self) {
        self.current_index = 0;
        self.is_rendering = true;
    }

    fn end_render(&mut self) {
        if let Some(expected) = self.expected_count
            && self.current_index != expected
        {
            self.is_rendering = false;
            panic!(
                "\n\nusekit hooks error: Hook count mismatch!\n\
                Previous render had {} hooks, current render has {} hooks.\n\
                Render number: {}\n\n\
                This usually happens when:\n\
                - A hook is called inside a conditional (if/match)\n\
                - A hook is called inside a loop with varying iterations\n\
                - A hook is called after an early return\n\n\
                Hooks must be called in the exact same order every render.\n",
                expected, self.current_index, self.render_count
            );
        }

        self.expected_count = Some(self.current_index);
        self.is_rendering = false;
        self.render_count += 1;
    }

    /// Fetch the hook at the current position, creating it with `init` on
    /// the first render.
    fn use_hook<T: Clone + 'static>(
        &mut self,
        hook_type: &'static str,
        init: impl FnOnce() -> T,
    ) -> T {
        if !self.is_rendering {
            panic!(
                "\n\nusekit hooks error: `{}` called outside of render!\n\
                Hooks can only be called while a component renders.\n\
                Make sure you're not calling hooks in:\n\
                - Event listeners\n\
                - Timer callbacks\n\
                - Effect bodies\n",
                hook_type
            );
        }

        let index = self.current_index;
        self.current_index += 1;

        if let Some(entry) = self.hooks.get(index) {
            if entry.meta.hook_type != hook_type {
                panic!(
                    "\n\nusekit hooks error: Hook order mismatch at index {}!\n\
                    Previous render: `{}`\n\
                    Current render: `{}`\n\n\
                    Hooks must be called in the exact same order every render.\n",
                    index, entry.meta.hook_type, hook_type
                );
            }

            return match entry.value.downcast_ref::<T>() {
                Some(value) => value.clone(),
                None => panic!(
                    "\n\nusekit hooks error: Hook type mismatch at index {}!\n\
                    Previous render stored `{}`, current render expects `{}`.\n",
                    index,
                    entry.meta.value_type,
                    std::any::type_name::<T>()
                ),
            };
        }

        let value = init();
        let meta = HookMeta {
            hook_type,
            value_type: std::any::type_name::<T>(),
        };
        trace!(index, hook_type, value_type = meta.value_type, "created hook");
        self.hooks.push(HookEntry {
            value: Box::new(value.clone()),
            meta,
        });
        value
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

thread_local! {
    static HOOK_REGISTRY: RefCell<HookRegistry> = RefCell::new(HookRegistry::default());
}

// ============================================================================
// Public API - Lifecycle functions
// ============================================================================

/// Start a render: the next hook call binds to position 0.
pub fn begin_render() {
    HOOK_REGISTRY.with(|registry| registry.borrow_mut().begin_render());
}

/// Finish a render, checking the hook count against the previous render.
pub fn end_render() {
    HOOK_REGISTRY.with(|registry| registry.borrow_mut().end_render());
}

/// Run `component` as one render cycle and return what it produced.
pub fn render<R>(component: impl FnOnce() -> R) -> R {
    begin_render();
    let output = component();
    end_render();
    output
}

/// Number of completed renders since the last reset.
pub fn render_count() -> usize {
    HOOK_REGISTRY.with(|registry| registry.borrow().render_count)
}

/// Tear the component down: run every pending effect cleanup, most recent
/// first, then forget all hook state.
pub fn unmount() {
    let slots = HOOK_REGISTRY.with(|registry| std::mem::take(&mut registry.borrow_mut().cleanups));
    debug!(effects = slots.len(), "unmounting hooks");

    for slot in slots.iter().rev() {
        let cleanup = slot.borrow_mut().take();
        if let Some(cleanup) = cleanup {
            cleanup();
        }
    }

    clear_hooks();
}

/// Forget all hook state without running cleanups.
pub fn clear_hooks() {
    HOOK_REGISTRY.with(|registry| registry.borrow_mut().clear());
}

// ============================================================================
// Public API - Hook functions
// ============================================================================

/// Persistent shared state; `init` runs on the first render only.
pub fn use_signal<T: 'static>(init: impl FnOnce() -> T) -> Signal<T> {
    HOOK_REGISTRY.with(|registry| {
        registry
            .borrow_mut()
            .use_hook("use_signal", || Signal::new(init()))
    })
}

/// A mutable cell that survives renders.
pub fn use_ref<T: 'static>(init: impl FnOnce() -> T) -> RefHandle<T> {
    let inner = HOOK_REGISTRY.with(|registry| {
        registry
            .borrow_mut()
            .use_hook("use_ref", || Rc::new(RefCell::new(init())))
    });
    RefHandle { inner }
}

/// Handle returned by [`use_ref`].
pub struct RefHandle<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> RefHandle<T> {
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.inner.borrow_mut()
    }

    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
    }

    /// Swap in `value`, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        self.inner.replace(value)
    }
}

impl<T: Clone> RefHandle<T> {
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }
}

impl<T> Clone for RefHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct EffectState<D> {
    deps: Option<D>,
    cleanup: CleanupSlot,
}

/// Fetch the effect state at the current position, registering its cleanup
/// slot with the registry when the hook is new.
fn effect_state<D: 'static>(hook_type: &'static str) -> Rc<RefCell<EffectState<D>>> {
    HOOK_REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        let mut created = None;
        let state = registry.use_hook(hook_type, || {
            let cleanup: CleanupSlot = Rc::default();
            created = Some(Rc::clone(&cleanup));
            Rc::new(RefCell::new(EffectState::<D> {
                deps: None,
                cleanup,
            }))
        });
        if let Some(slot) = created {
            registry.cleanups.push(slot);
        }
        state
    })
}

/// Run `effect` when `deps` differ from the previous render's, first running
/// the cleanup the previous invocation left behind.
fn run_effect<D: PartialEq>(
    state: &RefCell<EffectState<D>>,
    deps: D,
    effect: impl FnOnce() -> Cleanup,
) {
    let previous = {
        let mut state = state.borrow_mut();
        if state.deps.as_ref() == Some(&deps) {
            return;
        }
        state.deps = Some(deps);
        state.cleanup.borrow_mut().take()
    };

    if let Some(cleanup) = previous {
        trace!("running effect cleanup");
        cleanup();
    }

    let cleanup = effect();
    let slot = Rc::clone(&state.borrow().cleanup);
    *slot.borrow_mut() = Some(cleanup);
}

/// Run `effect` during render whenever `deps` change.
///
/// The cleanup `effect` returns runs before the next invocation or on
/// [`unmount`].
///
/// ```ignore
/// use_effect_cleanup(
///     move || {
///         let id = timers::set_timeout(delay, move || settled.set(value));
///         move || { timers::clear_timeout(id); }
///     },
///     (value, delay),
/// );
/// ```
pub fn use_effect_cleanup<F, C, D>(effect: F, deps: D)
where
    F: FnOnce() -> C + 'static,
    C: FnOnce() + 'static,
    D: PartialEq + 'static,
{
    let state = effect_state::<D>("use_effect_cleanup");
    run_effect(&state, deps, || Box::new(effect()) as Cleanup);
}

/// Run `effect` on the first render only; its cleanup runs on [`unmount`].
pub fn use_mount<F, C>(effect: F)
where
    F: FnOnce() -> C + 'static,
    C: FnOnce() + 'static,
{
    use_effect_cleanup(effect, ());
}

struct MemoState<T, D> {
    value: Option<T>,
    deps: Option<D>,
}

/// Cache `compute`'s result until `deps` change.
pub fn use_memo<T, F, D>(compute: F, deps: D) -> T
where
    T: Clone + 'static,
    F: FnOnce() -> T,
    D: PartialEq + 'static,
{
    let state = HOOK_REGISTRY.with(|registry| {
        registry.borrow_mut().use_hook("use_memo", || {
            Rc::new(RefCell::new(MemoState::<T, D> {
                value: None,
                deps: None,
            }))
        })
    });

    let mut state = state.borrow_mut();
    if state.deps.as_ref() == Some(&deps)
        && let Some(value) = &state.value
    {
        return value.clone();
    }

    let value = compute();
    state.value = Some(value.clone());
    state.deps = Some(deps);
    value
}
