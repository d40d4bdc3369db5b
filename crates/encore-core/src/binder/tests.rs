#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::{Notify, mpsc};
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::*;
use crate::route::Router;

// ── Stub source ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
struct Record {
    id: String,
    name: String,
}

/// Source whose fetches block until the test releases them.
#[derive(Clone, Default)]
struct GatedSource {
    gates: Arc<Mutex<HashMap<String, Arc<Notify>>>>,
    failing: Arc<HashSet<String>>,
}

impl GatedSource {
    fn failing(ids: &[&str]) -> Self {
        Self {
            failing: Arc::new(ids.iter().map(|s| (*s).to_owned()).collect()),
            ..Self::default()
        }
    }

    fn gate(&self, id: &str) -> Arc<Notify> {
        let mut gates = self.gates.lock().unwrap();
        Arc::clone(gates.entry(id.to_owned()).or_default())
    }

    fn release(&self, id: &str) {
        self.gate(id).notify_one();
    }
}

impl EntitySource for GatedSource {
    type Entity = Record;

    fn route_key(&self) -> &str {
        "artistId"
    }

    fn resource_url(&self, id: &str) -> String {
        format!("/api/artists/{id}")
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Record, CoreError> {
        let gate = self.gate(id);
        gate.notified().await;
        if self.failing.contains(id) {
            return Err(CoreError::Api {
                message: format!("lookup of {id} failed"),
                status: Some(500),
            });
        }
        Ok(Record {
            id: id.to_owned(),
            name: "X".into(),
        })
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn artist(id: &str) -> ParamMap {
    ParamMap::new().with("artistId", id)
}

fn start(
    source: &GatedSource,
) -> (mpsc::UnboundedSender<ParamMap>, BinderHandle<Record>, ViewStream<Record>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = RouteBinder::new(source.clone()).start(UnboundedReceiverStream::new(rx));
    let view = handle.subscribe();
    (tx, handle, view)
}

async fn wait(
    view: &mut ViewStream<Record>,
    predicate: impl FnMut(&ViewState<Record>) -> bool,
) -> ViewState<Record> {
    tokio::time::timeout(Duration::from_secs(5), view.wait_for(predicate))
        .await
        .expect("timed out waiting for view state")
        .expect("binder torn down")
}

fn entity_id(state: &ViewState<Record>) -> Option<&str> {
    state.entity.as_deref().map(|r| r.id.as_str())
}

// ── Binding ─────────────────────────────────────────────────────────

#[tokio::test]
async fn source_url_is_set_before_fetch_resolves() {
    let source = GatedSource::default();
    let (tx, _handle, mut view) = start(&source);

    tx.send(artist("42")).unwrap();
    let state = wait(&mut view, |s| s.generation == 1).await;

    assert_eq!(state.source_url.as_deref(), Some("/api/artists/42"));
    assert_eq!(state.requested_id.as_deref(), Some("42"));
    assert!(state.loading);
    assert!(state.entity.is_none());

    source.release("42");
    let state = wait(&mut view, |s| !s.loading).await;

    assert_eq!(
        state.entity.as_deref(),
        Some(&Record {
            id: "42".into(),
            name: "X".into()
        })
    );
    assert!(state.error.is_none());
    assert!(state.is_current());
}

#[tokio::test]
async fn superseded_fetch_never_overwrites_latest() {
    let source = GatedSource::default();
    let (tx, _handle, mut view) = start(&source);

    tx.send(artist("1")).unwrap();
    wait(&mut view, |s| s.generation == 1).await;
    tx.send(artist("2")).unwrap();
    let state = wait(&mut view, |s| s.generation == 2).await;
    assert_eq!(state.source_url.as_deref(), Some("/api/artists/2"));

    source.release("2");
    let state = wait(&mut view, |s| s.entity.is_some()).await;
    assert_eq!(entity_id(&state), Some("2"));

    // The first request completes late; its result must not land.
    source.release("1");
    tokio::time::sleep(Duration::from_millis(50)).await;

    let state = view.latest();
    assert_eq!(entity_id(&state), Some("2"));
    assert_eq!(state.generation, 2);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_entity() {
    let source = GatedSource::failing(&["bad"]);
    let (tx, _handle, mut view) = start(&source);

    tx.send(artist("1")).unwrap();
    source.release("1");
    wait(&mut view, |s| s.entity.is_some()).await;

    tx.send(artist("bad")).unwrap();
    source.release("bad");
    let state = wait(&mut view, |s| s.generation == 2 && !s.loading).await;

    assert_eq!(entity_id(&state), Some("1"));
    assert_eq!(state.requested_id.as_deref(), Some("bad"));
    assert!(matches!(
        state.error.as_deref(),
        Some(CoreError::Api { status: Some(500), .. })
    ));
    assert!(!state.is_current());

    // A later success clears the error.
    tx.send(artist("3")).unwrap();
    source.release("3");
    let state = wait(&mut view, |s| s.generation == 3 && !s.loading).await;
    assert_eq!(entity_id(&state), Some("3"));
    assert!(state.error.is_none());
}

#[tokio::test]
async fn missing_parameter_supersedes_in_flight_request() {
    let source = GatedSource::default();
    let (tx, _handle, mut view) = start(&source);

    tx.send(artist("1")).unwrap();
    wait(&mut view, |s| s.generation == 1).await;

    tx.send(ParamMap::new().with("albumId", "9")).unwrap();
    let state = wait(&mut view, |s| s.generation == 2).await;

    assert_eq!(state.source_url, None);
    assert_eq!(state.requested_id, None);
    assert!(!state.loading);
    assert!(matches!(
        state.error.as_deref(),
        Some(CoreError::MissingParameter { key }) if key == "artistId"
    ));

    source.release("1");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(view.latest().entity.is_none());
}

#[tokio::test]
async fn custom_key_overrides_source_default() {
    let source = GatedSource::default();
    let (tx, rx) = mpsc::unbounded_channel();
    let binder = RouteBinder::new(source.clone()).with_key("id");
    assert_eq!(binder.key(), "id");
    let handle = binder.start(UnboundedReceiverStream::new(rx));
    let mut view = handle.subscribe();

    tx.send(ParamMap::new().with("id", "7")).unwrap();
    source.release("7");
    let state = wait(&mut view, |s| s.entity.is_some()).await;
    assert_eq!(entity_id(&state), Some("7"));
}

// ── Lifecycle ───────────────────────────────────────────────────────

#[tokio::test]
async fn stop_prevents_late_results() {
    let source = GatedSource::default();
    let (tx, handle, mut view) = start(&source);

    tx.send(artist("1")).unwrap();
    wait(&mut view, |s| s.generation == 1).await;

    handle.stop().await;
    source.release("1");

    // Every sender is gone once stop returns, so no change can follow.
    assert!(view.changed().await.is_none());
    assert!(view.latest().entity.is_none());
}

#[tokio::test]
async fn dropping_handle_cancels_binding() {
    let source = GatedSource::default();
    let (tx, handle, mut view) = start(&source);

    tx.send(artist("1")).unwrap();
    wait(&mut view, |s| s.generation == 1).await;

    drop(handle);
    source.release("1");

    let next = tokio::time::timeout(Duration::from_secs(5), view.changed())
        .await
        .expect("binder did not wind down");
    assert!(next.is_none());
    assert!(view.latest().entity.is_none());
}

#[tokio::test]
async fn last_request_completes_after_stream_ends() {
    let source = GatedSource::default();
    let (tx, handle, mut view) = start(&source);

    tx.send(artist("5")).unwrap();
    drop(tx);
    wait(&mut view, |s| s.generation == 1).await;

    source.release("5");
    let state = wait(&mut view, |s| s.entity.is_some()).await;
    assert_eq!(entity_id(&state), Some("5"));

    tokio::time::timeout(Duration::from_secs(5), async {
        while !handle.is_stopped() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("binder task should finish once the stream ends");
}

#[tokio::test]
async fn finished_waits_for_last_fetch() {
    let source = GatedSource::default();
    let router = Router::new(artist("8"));
    let mut handle = RouteBinder::new(source.clone()).start(router.param_map());
    let mut view = handle.subscribe();

    wait(&mut view, |s| s.generation == 1).await;
    drop(router);
    source.release("8");

    tokio::time::timeout(Duration::from_secs(5), handle.finished())
        .await
        .expect("binder should finish once the router is gone");

    assert!(handle.is_stopped());
    assert_eq!(entity_id(&handle.snapshot()), Some("8"));
}

#[tokio::test]
async fn follows_router_navigation() {
    let source = GatedSource::default();
    let router = Router::default();
    let handle = RouteBinder::new(source.clone()).start(router.param_map());
    let mut view = handle.subscribe();

    // The router's initial (empty) map counts as the first emission.
    let state = wait(&mut view, |s| s.generation == 1).await;
    assert!(matches!(
        state.error.as_deref(),
        Some(CoreError::MissingParameter { .. })
    ));

    router.navigate(artist("42"));
    let state = wait(&mut view, |s| s.requested_id.as_deref() == Some("42")).await;
    assert_eq!(state.source_url.as_deref(), Some("/api/artists/42"));

    source.release("42");
    let state = wait(&mut view, |s| s.entity.is_some()).await;
    assert_eq!(entity_id(&state), Some("42"));

    handle.stop().await;
}

// ── Generation check ────────────────────────────────────────────────

#[test]
fn stale_generation_is_rejected() {
    let (tx, _rx) = watch::channel(ViewState::<Record>::default());
    tx.send_modify(|s| {
        s.generation = 2;
        s.loading = true;
    });
    let cancel = CancellationToken::new();
    let stale = Record {
        id: "1".into(),
        name: "old".into(),
    };

    assert!(!apply_result(&tx, 1, &cancel, Ok(stale)));
    assert!(tx.borrow().entity.is_none());
    assert!(tx.borrow().loading);

    let fresh = Record {
        id: "2".into(),
        name: "new".into(),
    };
    assert!(apply_result(&tx, 2, &cancel, Ok(fresh)));
    assert_eq!(tx.borrow().entity.as_deref().map(|r| r.id.as_str()), Some("2"));
    assert!(!tx.borrow().loading);
}

#[test]
fn cancelled_binding_rejects_current_generation() {
    let (tx, _rx) = watch::channel(ViewState::<Record>::default());
    tx.send_modify(|s| s.generation = 1);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = Err(CoreError::Internal("late".into()));
    assert!(!apply_result(&tx, 1, &cancel, result));
    assert!(tx.borrow().error.is_none());
}
