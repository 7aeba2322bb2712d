//! Live filter sessions
//!
//! The list page upgrades to a WebSocket for type-ahead filtering: the
//! browser forwards raw input events, the session runs them through the
//! [`TableController`] state machine, and committed queries come back as
//! a URL update plus a re-rendered table fragment. The debounce timer and
//! the stale-response guard live here on the server, so the client side
//! stays logic-free.

use crate::components::pagination::render_pagination;
use crate::components::table::render_table;
use crate::controller::{Commit, Msg, TableController};
use crate::extractors::ListQueryParams;
use crate::resources::{ResourceDef, resource};
use crate::state::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fleetdeck_core::{ListQuery, ListResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Input events forwarded by the browser.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientEvent {
    /// Free-text search keystroke.
    Search {
        /// Current input value.
        value: String,
    },
    /// Field-filter change.
    Filter {
        /// Filter key.
        key: String,
        /// Current value; empty clears.
        value: String,
    },
    /// Date-range change.
    DateRange {
        /// Start date, possibly empty.
        from: String,
        /// End date, possibly empty.
        to: String,
    },
    /// Page-size selection.
    PageSize {
        /// Requested size.
        value: u32,
    },
    /// Explicit apply button.
    Apply,
    /// Explicit reset button.
    Reset,
    /// Pagination click.
    Page {
        /// Requested page, 1-based.
        page: u32,
    },
}

/// Events pushed back to the browser.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerEvent {
    /// Update the address bar to the committed query.
    Navigate {
        /// Full list URL.
        url: String,
    },
    /// Replace the table fragment.
    Table {
        /// Rendered markup.
        html: String,
    },
}

/// Upgrade handler for `GET /r/{resource}/live`.
///
/// The session picks up where the rendered page left off: the upgrade
/// URL carries the same query string as the page, and it seeds the
/// controller so the first keystroke edits the user's current filters
/// instead of a blank query.
pub async fn live_table(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    ListQueryParams(raw): ListQueryParams,
) -> Response {
    let Some(def) = resource(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let initial = session_query(def, raw);
    ws.on_upgrade(move |socket| run_session(socket, state, def, initial))
        .into_response()
}

/// Restrict a decoded query to what the resource's table declares, the
/// same narrowing the list page applies.
fn session_query(def: &ResourceDef, raw: ListQuery) -> ListQuery {
    let mut query = raw.retain_filters(def.filter_keys);
    if !def.date_filtered {
        query.date_from = None;
        query.date_to = None;
    }
    query
}

/// One table's live session: socket events and fetch completions in, URL
/// updates and table fragments out.
async fn run_session(
    mut socket: WebSocket,
    state: Arc<AppState>,
    def: &'static ResourceDef,
    initial: ListQuery,
) {
    let mut controller: TableController<Value> = TableController::new(initial);
    let (completions_tx, mut completions_rx) = mpsc::channel::<(u64, ListResult<Value>)>(8);

    debug!(resource = def.name, "live session opened");

    loop {
        let deadline = controller.next_deadline();
        let quiet_period_elapsed = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            incoming = socket.recv() => {
                let Some(Ok(message)) = incoming else {
                    break;
                };
                let Message::Text(text) = message else {
                    continue;
                };
                let Ok(event) = serde_json::from_str::<ClientEvent>(&text) else {
                    warn!(resource = def.name, "unparseable live event: {text}");
                    continue;
                };

                let Some(msg) = event_to_msg(def, event) else {
                    continue;
                };
                let commit = controller.handle(msg, Instant::now());
                if let Some(commit) = commit {
                    if dispatch_commit(&mut socket, &state, def, &completions_tx, commit)
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
            }

            () = quiet_period_elapsed => {
                if let Some(commit) = controller.poll(Instant::now()) {
                    if dispatch_commit(&mut socket, &state, def, &completions_tx, commit)
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
            }

            completed = completions_rx.recv() => {
                let Some((seq, result)) = completed else {
                    break;
                };
                // The controller discards responses older than the newest
                // issued fetch; only an accepted one re-renders the table.
                let accepted = seq >= controller.newest_issued();
                controller.handle(Msg::FetchCompleted { seq, result }, Instant::now());
                if accepted && let Some(result) = controller.result() {
                    let html = render_fragment(def, controller.applied(), result);
                    if send(&mut socket, &ServerEvent::Table { html }).await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    debug!(resource = def.name, "live session closed");
}

/// Announce the navigation and start the fetch for a committed query.
async fn dispatch_commit(
    socket: &mut WebSocket,
    state: &Arc<AppState>,
    def: &'static ResourceDef,
    completions: &mpsc::Sender<(u64, ListResult<Value>)>,
    commit: Commit,
) -> Result<(), ()> {
    let url = format!("/r/{}?{}", def.name, commit.query.encode());
    send(socket, &ServerEvent::Navigate { url }).await?;

    let client = state.api_client.clone();
    let completions = completions.clone();
    let Commit { seq, query } = commit;
    tokio::spawn(async move {
        let result = client.fetch_list(def.name, &query).await;
        // A dropped session just abandons the late result.
        let _ = completions.send((seq, result)).await;
    });

    Ok(())
}

/// Map a browser event onto a controller message, dropping events that
/// reach past what the resource's table declares: undeclared filter keys
/// never become backend query parameters, matching the list page's
/// narrowing.
fn event_to_msg(def: &ResourceDef, event: ClientEvent) -> Option<Msg<Value>> {
    match event {
        ClientEvent::Search { value } => Some(Msg::SetSearch(value)),
        ClientEvent::Filter { key, value } => {
            if !def.filter_keys.contains(&key.as_str()) {
                debug!(resource = def.name, key, "ignoring undeclared filter key");
                return None;
            }
            Some(Msg::SetFilter { key, value })
        }
        ClientEvent::DateRange { from, to } => {
            if !def.date_filtered {
                return None;
            }
            Some(Msg::SetDateRange { from, to })
        }
        ClientEvent::PageSize { value } => Some(Msg::SetPageSize(value)),
        ClientEvent::Apply => Some(Msg::Apply),
        ClientEvent::Reset => Some(Msg::Reset),
        ClientEvent::Page { page } => Some(Msg::PageChange(page)),
    }
}

fn render_fragment(
    def: &ResourceDef,
    query: &ListQuery,
    result: &ListResult<Value>,
) -> String {
    let mut html = render_table(def, query, result);
    if !result.is_empty() {
        html.push_str(&render_pagination(&format!("/r/{}", def.name), query, result));
    }
    html
}

async fn send(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), ()> {
    let Ok(text) = serde_json::to_string(event) else {
        return Err(());
    };
    socket.send(Message::Text(text)).await.map_err(|_| ())
}
