//! `watch` command: drive a route binder from identifiers on stdin.
//!
//! Each input line is one navigation. An empty line navigates to a route
//! without the parameter. Every view state change is printed as it
//! happens; EOF lets the last request settle, Ctrl-C stops immediately.

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use encore_core::{Album, Artist, Catalog, EntitySource, ParamMap, RouteBinder, Router, ViewState};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs, WatchTarget};
use crate::error::CliError;
use crate::output;

// ── Printed event ───────────────────────────────────────────────────

#[derive(Serialize)]
struct ViewEvent<'a, T> {
    generation: u64,
    requested_id: Option<&'a str>,
    source_url: Option<&'a str>,
    loading: bool,
    error: Option<String>,
    entity: Option<&'a T>,
}

impl<'a, T> From<&'a ViewState<T>> for ViewEvent<'a, T> {
    fn from(s: &'a ViewState<T>) -> Self {
        Self {
            generation: s.generation,
            requested_id: s.requested_id.as_deref(),
            source_url: s.source_url.as_deref(),
            loading: s.loading,
            error: s.error.as_ref().map(ToString::to_string),
            entity: s.entity.as_deref(),
        }
    }
}

/// One-line description of a view state for table/plain output.
fn summary_line<T>(state: &ViewState<T>, describe: impl Fn(&T) -> String) -> String {
    let generation = state.generation;
    let url = state.source_url.as_deref().unwrap_or("-");
    if state.loading {
        return format!("[{generation}] loading {url}");
    }
    match (&state.error, &state.entity) {
        (Some(err), Some(entity)) => {
            format!("[{generation}] error: {err} (showing {})", describe(entity))
        }
        (Some(err), None) => format!("[{generation}] error: {err}"),
        (None, Some(entity)) => format!("[{generation}] {} <- {url}", describe(entity)),
        (None, None) => format!("[{generation}] idle"),
    }
}

fn render_event<T: Serialize>(
    state: &ViewState<T>,
    format: &OutputFormat,
    describe: impl Fn(&T) -> String,
) -> String {
    let event = ViewEvent::from(state);
    match format {
        // One JSON document per line, so the output can be streamed.
        OutputFormat::Json | OutputFormat::JsonCompact => {
            output::render_single(&OutputFormat::JsonCompact, &event, |_| String::new(), |_| {
                String::new()
            })
        }
        OutputFormat::Yaml => format!(
            "---\n{}",
            output::render_single(format, &event, |_| String::new(), |_| String::new())
        ),
        OutputFormat::Table | OutputFormat::Plain => summary_line(state, describe),
    }
}

fn params_for(key: &str, line: &str) -> ParamMap {
    let id = line.trim();
    if id.is_empty() {
        ParamMap::new()
    } else {
        ParamMap::new().with(key, id)
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.target {
        WatchTarget::Artist => {
            let binder = keyed(RouteBinder::new(catalog.artist_source()), args.key);
            follow(binder, global, |a: &Artist| a.name.clone()).await
        }
        WatchTarget::Album => {
            let binder = keyed(RouteBinder::new(catalog.album_source()), args.key);
            follow(binder, global, |a: &Album| {
                if a.artists.is_empty() {
                    a.name.clone()
                } else {
                    format!("{} / {}", a.artist_names(), a.name)
                }
            })
            .await
        }
    }
}

fn keyed<S: EntitySource>(binder: RouteBinder<S>, key: Option<String>) -> RouteBinder<S> {
    match key {
        Some(key) => binder.with_key(key),
        None => binder,
    }
}

async fn follow<S>(
    binder: RouteBinder<S>,
    global: &GlobalOpts,
    describe: impl Fn(&S::Entity) -> String,
) -> Result<(), CliError>
where
    S: EntitySource,
    S::Entity: Serialize,
{
    let key = binder.key().to_owned();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Bind only once there is a first route to show.
    let Some(first) = lines.next_line().await? else {
        return Ok(());
    };
    let initial = Router::new(params_for(&key, &first));
    let mut handle = binder.start(initial.param_map());
    let mut view = handle.subscribe();
    let mut router = Some(initial);

    let print = |state: &ViewState<S::Entity>| {
        output::print_output(&render_event(state, &global.output, &describe), global.quiet);
    };

    loop {
        tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                handle.stop().await;
                return Ok(());
            }
            line = lines.next_line(), if router.is_some() => {
                match line? {
                    Some(line) => {
                        if let Some(router) = &router {
                            router.navigate(params_for(&key, &line));
                        }
                    }
                    // Dropping the router ends the parameter stream.
                    None => router = None,
                }
            }
            state = view.changed() => match state {
                Some(state) => print(&state),
                None => break,
            },
            () = handle.finished(), if router.is_none() => break,
        }
    }

    // The final state may land between the last `changed()` and the end.
    let last = view.latest();
    let seen = view.current();
    if (last.generation, last.loading) != (seen.generation, seen.loading) {
        print(&last);
    }
    handle.stop().await;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use encore_core::CoreError;

    #[derive(Serialize)]
    struct Named {
        name: &'static str,
    }

    fn state() -> ViewState<Named> {
        ViewState {
            generation: 2,
            requested_id: Some("42".into()),
            source_url: Some("http://catalog/api/1.0/artists/42".into()),
            ..ViewState::default()
        }
    }

    #[test]
    fn summary_reports_loading_url() {
        let mut s = state();
        s.loading = true;
        assert_eq!(
            summary_line(&s, |n| n.name.into()),
            "[2] loading http://catalog/api/1.0/artists/42"
        );
    }

    #[test]
    fn summary_keeps_previous_entity_on_error() {
        let mut s = state();
        s.entity = Some(Arc::new(Named { name: "X" }));
        s.error = Some(Arc::new(CoreError::Timeout { timeout_secs: 3 }));
        assert_eq!(
            summary_line(&s, |n| n.name.into()),
            "[2] error: Catalog request timed out after 3s (showing X)"
        );
    }

    #[test]
    fn json_event_is_single_line() {
        let mut s = state();
        s.entity = Some(Arc::new(Named { name: "X" }));
        let out = render_event(&s, &OutputFormat::Json, |n| n.name.into());
        assert!(!out.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["entity"]["name"], "X");
        assert_eq!(value["requested_id"], "42");
        assert!(value["error"].is_null());
    }

    #[test]
    fn blank_line_drops_parameter() {
        assert!(params_for("artistId", "  ").is_empty());
        assert_eq!(params_for("artistId", " 7 ").get("artistId"), Some("7"));
    }
}
