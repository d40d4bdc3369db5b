// ── Route-to-entity binding ──
//
// A `RouteBinder` follows a stream of route parameter maps and keeps a
// `ViewState` in step with it: every emission immediately updates the
// source URL and starts a fetch, and only the newest fetch may write the
// entity. Superseded fetch tasks are aborted, and a generation check under
// the state lock discards any result that still slips through.

mod state;
mod stream;

use std::sync::Arc;

use futures_core::Stream;
use futures_util::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::route::ParamMap;
use crate::source::EntitySource;

pub use state::ViewState;
pub use stream::{ViewStream, ViewWatchStream};

type StateTx<T> = Arc<watch::Sender<ViewState<T>>>;

// ── RouteBinder ──────────────────────────────────────────────────

/// Binds a route parameter to an [`EntitySource`].
pub struct RouteBinder<S: EntitySource> {
    source: Arc<S>,
    key: String,
}

impl<S: EntitySource> RouteBinder<S> {
    /// Bind `source` to its own [`route_key`](EntitySource::route_key).
    pub fn new(source: S) -> Self {
        let key = source.route_key().to_owned();
        Self {
            source: Arc::new(source),
            key,
        }
    }

    /// Read the identifier from `key` instead of the source's default.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Subscribe to `params` and start binding.
    ///
    /// Must be called from within a tokio runtime. The returned handle
    /// owns the subscription: [`stop`](BinderHandle::stop) it (or drop it)
    /// when the view goes away.
    pub fn start<P>(self, params: P) -> BinderHandle<S::Entity>
    where
        P: Stream<Item = ParamMap> + Send + Unpin + 'static,
    {
        let (tx, _) = watch::channel(ViewState::default());
        let state = Arc::new(tx);
        let cancel = CancellationToken::new();

        info!(key = %self.key, "route binder started");
        let task = tokio::spawn(bind_task(
            self.source,
            self.key,
            params,
            Arc::clone(&state),
            cancel.clone(),
        ));

        BinderHandle {
            state,
            cancel,
            task: Some(task),
        }
    }
}

// ── BinderHandle ─────────────────────────────────────────────────

/// Owner of a running binding.
///
/// Dropping the handle cancels the binding without waiting for it;
/// [`stop`](Self::stop) cancels and waits, after which no fetch result can
/// reach the view state.
pub struct BinderHandle<T: Send + Sync + 'static> {
    state: StateTx<T>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + Sync + 'static> BinderHandle<T> {
    /// Current view state.
    pub fn snapshot(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    /// Follow view state changes.
    pub fn subscribe(&self) -> ViewStream<T> {
        ViewStream::new(self.state.subscribe())
    }

    /// The binding stopped, either by request or because its task ended.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled() || self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the binding to end on its own: the parameter stream is
    /// exhausted and the last fetch has settled. Does not cancel.
    pub async fn finished(&mut self) {
        if let Some(task) = self.task.as_mut() {
            if let Err(e) = task.await {
                warn!(error = %e, "route binder task ended abnormally");
            }
            self.task = None;
        }
    }

    /// Cancel the binding and wait for its tasks to wind down.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "route binder task ended abnormally");
            }
        }
        debug!("route binder stopped");
    }
}

impl<T: Send + Sync + 'static> Drop for BinderHandle<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ── Background task ──────────────────────────────────────────────

async fn bind_task<S, P>(
    source: Arc<S>,
    key: String,
    mut params: P,
    state: StateTx<S::Entity>,
    cancel: CancellationToken,
) where
    S: EntitySource,
    P: Stream<Item = ParamMap> + Send + Unpin + 'static,
{
    let mut in_flight: Option<JoinHandle<()>> = None;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            next = params.next() => {
                let Some(map) = next else {
                    debug!("route parameter stream ended");
                    break;
                };
                if let Some(previous) = in_flight.take() {
                    previous.abort();
                }
                in_flight = dispatch(&source, &key, &map, &state, &cancel);
            }
        }
    }

    // The last request is allowed to finish unless the binding is cancelled.
    if let Some(mut handle) = in_flight {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                handle.abort();
                let _ = handle.await;
            }
            _ = &mut handle => {}
        }
    }
}

/// Start a new request generation for one route emission.
///
/// The source URL is written before any fetch is spawned, so observers see
/// it as soon as the route changes.
fn dispatch<S: EntitySource>(
    source: &Arc<S>,
    key: &str,
    params: &ParamMap,
    state: &StateTx<S::Entity>,
    cancel: &CancellationToken,
) -> Option<JoinHandle<()>> {
    let id = params.get(key).map(str::to_owned);
    let mut generation = 0;

    state.send_modify(|s| {
        s.generation += 1;
        generation = s.generation;
        s.requested_id.clone_from(&id);
        if let Some(id) = &id {
            s.source_url = Some(source.resource_url(id));
            s.loading = true;
            s.error = None;
        } else {
            s.source_url = None;
            s.loading = false;
            s.error = Some(Arc::new(CoreError::MissingParameter {
                key: key.to_owned(),
            }));
        }
    });

    let Some(id) = id else {
        warn!(key, generation, "route parameter missing");
        return None;
    };

    debug!(%id, generation, "route changed, fetching entity");
    let source = Arc::clone(source);
    let state = Arc::clone(state);
    let cancel = cancel.clone();

    Some(tokio::spawn(async move {
        let result = source.fetch_by_id(&id).await;
        if let Err(e) = &result {
            warn!(%id, generation, error = %e, "entity fetch failed");
        }
        if !apply_result(&state, generation, &cancel, result) {
            debug!(%id, generation, "discarding superseded result");
        }
    }))
}

/// Write a fetch result if `generation` is still current.
///
/// The check and the write happen under the watch channel's lock, so a
/// newer emission cannot interleave between them. Returns whether the
/// result was applied.
fn apply_result<T>(
    state: &watch::Sender<ViewState<T>>,
    generation: u64,
    cancel: &CancellationToken,
    result: Result<T, CoreError>,
) -> bool {
    state.send_if_modified(|s| {
        if cancel.is_cancelled() || s.generation != generation {
            return false;
        }
        s.loading = false;
        match result {
            Ok(entity) => {
                s.entity = Some(Arc::new(entity));
                s.error = None;
            }
            Err(e) => s.error = Some(Arc::new(e)),
        }
        true
    })
}

#[cfg(test)]
mod tests;
