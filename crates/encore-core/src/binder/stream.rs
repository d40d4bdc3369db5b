// ── Reactive view state subscription ──

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::state::ViewState;

/// A subscription to a binder's view state.
///
/// Provides point-in-time access and change notification via
/// [`changed`](Self::changed), or a `Stream` via
/// [`into_stream`](Self::into_stream).
pub struct ViewStream<T: Send + Sync + 'static> {
    current: ViewState<T>,
    receiver: watch::Receiver<ViewState<T>>,
}

impl<T: Send + Sync + 'static> ViewStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<ViewState<T>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The state captured at creation or at the last `changed()`.
    pub fn current(&self) -> &ViewState<T> {
        &self.current
    }

    /// The latest state (may have changed since the last `changed()`).
    pub fn latest(&self) -> ViewState<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new state.
    /// Returns `None` once the binder has been torn down.
    pub async fn changed(&mut self) -> Option<ViewState<T>> {
        self.receiver.changed().await.ok()?;
        let state = self.receiver.borrow_and_update().clone();
        self.current = state.clone();
        Some(state)
    }

    /// Wait until `predicate` holds, checking the latest state first.
    /// Returns `None` if the binder is torn down before that happens.
    pub async fn wait_for(
        &mut self,
        mut predicate: impl FnMut(&ViewState<T>) -> bool,
    ) -> Option<ViewState<T>> {
        let state = self.receiver.wait_for(|s| predicate(s)).await.ok()?.clone();
        self.current = state.clone();
        Some(state)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> ViewWatchStream<T> {
        ViewWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields the current state first, then every subsequent change.
pub struct ViewWatchStream<T: Send + Sync + 'static> {
    inner: WatchStream<ViewState<T>>,
}

impl<T: Send + Sync + 'static> Stream for ViewWatchStream<T> {
    type Item = ViewState<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
