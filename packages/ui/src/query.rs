//! Shared load-state hook for page containers.
//!
//! [`use_query`] runs a service call against the context client and exposes
//! its progress as a [`LoadState`]. Calling [`Query::refresh`] starts a new
//! load; a response that arrives after a newer load started, or after the
//! view unmounted, is dropped.

use std::future::Future;
use std::rc::Rc;

use api::{ApiError, RequestTracker};
use dioxus::prelude::*;

use crate::session::{use_api, AppClient};

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Idle | LoadState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Outcome of a finished call.
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) => LoadState::Failed(e.user_message()),
        }
    }
}

/// Handle returned by [`use_query`].
pub struct Query<T: 'static> {
    state: Signal<LoadState<T>>,
    revision: Signal<u64>,
}

impl<T: 'static> Clone for Query<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Query<T> {}

impl<T: Clone + 'static> Query<T> {
    /// Current state, subscribing the caller to changes.
    pub fn state(&self) -> LoadState<T> {
        self.state.read().clone()
    }

    pub fn refresh(&self) {
        let mut revision = self.revision;
        *revision.write() += 1;
    }

    /// Edit the loaded value in place, e.g. after an optimistic mutation.
    /// Does nothing unless the query is `Ready`.
    pub fn update(&self, edit: impl FnOnce(&mut T)) {
        let mut state = self.state;
        let mut guard = state.write();
        if let LoadState::Ready(value) = &mut *guard {
            edit(value);
        }
    }

    pub fn set(&self, value: T) {
        let mut state = self.state;
        state.set(LoadState::Ready(value));
    }
}

/// Run `fetch` on mount and on every [`Query::refresh`]. Signals read
/// synchronously inside `fetch` (before its future starts) also trigger a
/// reload when they change.
pub fn use_query<T, F, Fut>(fetch: F) -> Query<T>
where
    T: 'static,
    F: Fn(Rc<AppClient>) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let api = use_api();
    let mut state = use_signal(|| LoadState::Idle);
    let revision = use_signal(|| 0u64);
    let tracker = use_hook(RequestTracker::new);
    let fetch = use_hook(|| Rc::new(fetch));

    use_drop({
        let tracker = tracker.clone();
        move || tracker.retire()
    });

    use_effect(move || {
        let _ = revision();
        let ticket = tracker.begin();
        let pending = (*fetch)(api.clone());
        state.set(LoadState::Loading);
        spawn(async move {
            let result = pending.await;
            if !ticket.is_current() {
                tracing::debug!("dropping stale response #{}", ticket.generation());
                return;
            }
            if let Err(e) = &result {
                tracing::warn!("load failed: {e}");
            }
            state.set(LoadState::from_result(result));
        });
    });

    Query { state, revision }
}
