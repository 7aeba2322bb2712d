//! Action handlers: form-posted mutations
//!
//! Each action runs through the mutation dispatcher and redirects back to
//! the list page it came from, carrying a flash notice. The current list
//! query rides along in a hidden `_list_query` field so the redirect
//! lands on the right page (delete may decrement it).

use crate::resources::resource;
use crate::state::AppState;
use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use fleetdeck_core::{ListQuery, NoticeLevel};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dispatcher::MutationFeedback;

/// Form fields for a mutation: payload fields plus `_`-prefixed control
/// fields.
type ActionForm = BTreeMap<String, String>;

/// Create a row from posted form fields.
pub async fn create_action(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Form(form): Form<ActionForm>,
) -> Response {
    let Some(def) = resource(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let current = current_query(&form);
    let payload = payload_from(&form);
    let feedback = state.dispatcher.create(def.name, &payload, &current).await;

    redirect_with_feedback(def.name, &current, feedback)
}

/// Update a row from posted form fields.
pub async fn update_action(
    State(state): State<Arc<AppState>>,
    Path((name, id)): Path<(String, String)>,
    Form(form): Form<ActionForm>,
) -> Response {
    let Some(def) = resource(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let current = current_query(&form);
    let payload = payload_from(&form);
    let feedback = state
        .dispatcher
        .update(def.name, &id, &payload, &current)
        .await;

    redirect_with_feedback(def.name, &current, feedback)
}

/// Delete a row; the page-decrement rule applies when this was the last
/// row on a non-first page.
pub async fn delete_action(
    State(state): State<Arc<AppState>>,
    Path((name, id)): Path<(String, String)>,
    Form(form): Form<ActionForm>,
) -> Response {
    let Some(def) = resource(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let current = current_query(&form);
    // When the row count did not make it through, assume the page is not
    // about to empty out; never decrement on a guess.
    let rows_on_page = form
        .get("_page_rows")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(2);
    let feedback = state
        .dispatcher
        .delete(def.name, &id, &current, rows_on_page)
        .await;

    redirect_with_feedback(def.name, &current, feedback)
}

/// The list query the action originated from.
fn current_query(form: &ActionForm) -> ListQuery {
    form.get("_list_query")
        .map(|raw| ListQuery::decode_str(raw))
        .unwrap_or_default()
}

/// JSON payload from the non-control form fields.
fn payload_from(form: &ActionForm) -> Value {
    let mut object = Map::new();
    for (key, value) in form {
        if !key.starts_with('_') {
            object.insert(key.clone(), Value::String(value.clone()));
        }
    }
    Value::Object(object)
}

/// Redirect back to the list page with the feedback's refresh query (on
/// success) or the unchanged current query (on failure), plus the flash
/// notice.
fn redirect_with_feedback(
    resource_name: &str,
    current: &ListQuery,
    feedback: MutationFeedback,
) -> Response {
    let query = feedback.refresh.as_ref().unwrap_or(current);
    let ok = feedback.notice.level == NoticeLevel::Success;

    let mut url = format!("/r/{resource_name}?{}", query.encode());
    url.push_str(&format!(
        "&notice={}&ok={ok}",
        urlencoding::encode(&feedback.notice.message)
    ));

    Redirect::to(&url).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payload_skips_control_fields() {
        let mut form = ActionForm::new();
        form.insert("name".to_string(), "Anvil".to_string());
        form.insert("_list_query".to_string(), "limit=10".to_string());
        form.insert("_page_rows".to_string(), "3".to_string());

        let payload = payload_from(&form);

        assert_eq!(payload, serde_json::json!({"name": "Anvil"}));
    }

    #[test]
    fn test_current_query_decodes_hidden_field() {
        let mut form = ActionForm::new();
        form.insert(
            "_list_query".to_string(),
            "search=anvil&limit=20&page=3".to_string(),
        );

        let query = current_query(&form);

        assert_eq!(query.page, 3);
        assert_eq!(query.page_size, 20);
        assert_eq!(query.search.as_deref(), Some("anvil"));
    }

    #[test]
    fn test_current_query_defaults_when_missing() {
        assert_eq!(current_query(&ActionForm::new()), ListQuery::default());
    }
}
