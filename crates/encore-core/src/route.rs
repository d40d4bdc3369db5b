// ── Route parameters ──
//
// `ParamMap` is the explicit key → value map a navigation carries.
// `Router` publishes the current map to any number of subscribers.

use std::collections::BTreeMap;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

/// Parameters extracted from the current navigation path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap(BTreeMap<String, String>);

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value for `key`, or `None` when the navigation did not carry it.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ── Router ───────────────────────────────────────────────────────────

/// Holds the current route parameters and notifies subscribers.
///
/// Backed by a `watch` channel: a subscriber that falls behind sees only
/// the newest map, never a backlog. That matches "latest wins" binding.
#[derive(Debug)]
pub struct Router {
    params: watch::Sender<ParamMap>,
}

impl Router {
    pub fn new(initial: ParamMap) -> Self {
        let (params, _) = watch::channel(initial);
        Self { params }
    }

    /// Publish a new set of parameters.
    pub fn navigate(&self, params: ParamMap) {
        debug!(keys = params.len(), "navigate");
        self.params.send_replace(params);
    }

    /// Snapshot of the current parameters.
    pub fn current(&self) -> ParamMap {
        self.params.borrow().clone()
    }

    /// Stream of parameter maps, starting with the current one.
    pub fn param_map(&self) -> ParamStream {
        ParamStream {
            inner: WatchStream::new(self.params.subscribe()),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(ParamMap::new())
    }
}

/// `Stream` of route parameter maps backed by a `watch::Receiver`.
///
/// Ends when the owning [`Router`] is dropped.
pub struct ParamStream {
    inner: WatchStream<ParamMap>,
}

impl Stream for ParamStream {
    type Item = ParamMap;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
