//! Minimal data fetching keyed by a string.
//!
//! The fetcher runs once per key. Asynchronous results are polled on each
//! render until they settle; there is no retry, no request deduplication and
//! no cache shared between components.

use futures_util::future::{FutureExt, LocalBoxFuture};
use futures_util::task::noop_waker_ref;
use std::future::Future;
use std::task::{Context, Poll};
use tracing::{debug, warn};
use usekit_core::use_ref;

/// What a fetcher hands back.
pub enum Fetch<T, E> {
    /// The data is available immediately.
    Ready(T),
    /// The data arrives later.
    Pending(LocalBoxFuture<'static, Result<T, E>>),
}

impl<T, E> Fetch<T, E> {
    pub fn pending(future: impl Future<Output = Result<T, E>> + 'static) -> Self {
        Fetch::Pending(future.boxed_local())
    }
}

/// The state of a [`use_swr`] request as of this render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwrResponse<T, E> {
    pub data: Option<T>,
    pub error: Option<E>,
    /// A fetch for the current key has not settled yet.
    pub is_loading: bool,
}

struct SwrState<T, E> {
    key: Option<String>,
    data: Option<T>,
    error: Option<E>,
    pending: Option<LocalBoxFuture<'static, Result<T, E>>>,
}

/// Fetch data for `key`, re-running `fetcher` only when `key` changes.
///
/// While a new key loads, the previous key's data stays visible.
pub fn use_swr<T, E, F>(key: &str, fetcher: F) -> SwrResponse<T, E>
where
    T: Clone + 'static,
    E: Clone + std::fmt::Debug + 'static,
    F: FnOnce() -> Fetch<T, E>,
{
    let state = use_ref(|| SwrState::<T, E> {
        key: None,
        data: None,
        error: None,
        pending: None,
    });
    let mut state = state.borrow_mut();

    if state.key.as_deref() != Some(key) {
        debug!(key, "fetching");
        state.key = Some(key.to_owned());
        state.pending = None;
        match fetcher() {
            Fetch::Ready(data) => {
                state.data = Some(data);
                state.error = None;
            }
            Fetch::Pending(future) => state.pending = Some(future),
        }
    }

    if let Some(future) = state.pending.as_mut() {
        let mut cx = Context::from_waker(noop_waker_ref());
        if let Poll::Ready(result) = future.poll_unpin(&mut cx) {
            state.pending = None;
            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.error = None;
                }
                Err(error) => {
                    warn!(key, ?error, "fetch failed");
                    state.error = Some(error);
                }
            }
        }
    }

    SwrResponse {
        data: state.data.clone(),
        error: state.error.clone(),
        is_loading: state.pending.is_some(),
    }
}
