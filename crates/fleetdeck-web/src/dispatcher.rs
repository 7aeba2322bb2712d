//! Mutation dispatcher: create/update/delete with user-visible outcomes
//!
//! Wraps the backend client's mutation calls and turns their results into
//! uniform feedback: a notice, whether the originating dialog closes, and
//! which query to re-fetch. Failures change no local state (the dialog
//! stays open, the table is not refreshed) and are never retried
//! automatically; recovery is the user trying again.

use fleetdeck_client::ApiClient;
use fleetdeck_core::{ListQuery, Notice};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Mutex;

/// Uniform result of a dispatched mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationFeedback {
    /// Whether the backend accepted the mutation.
    pub success: bool,
    /// The transient notice to show.
    pub notice: Notice,
    /// Whether the dialog tied to the action should close.
    pub close_dialog: bool,
    /// Query to re-fetch so the table reflects the mutation; `None` on
    /// failure.
    pub refresh: Option<ListQuery>,
}

impl MutationFeedback {
    fn succeeded(message: &str, refresh: ListQuery) -> Self {
        Self {
            success: true,
            notice: Notice::success(message),
            close_dialog: true,
            refresh: Some(refresh),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            notice: Notice::error(message),
            close_dialog: false,
            refresh: None,
        }
    }
}

/// The refresh query after a successful delete.
///
/// Deleting the last row of a non-first page decrements the page so the
/// user is not left staring at an empty page; otherwise the current query
/// is re-fetched in place.
#[must_use]
pub fn refresh_after_delete(current: &ListQuery, rows_on_page: usize) -> ListQuery {
    if rows_on_page <= 1 && current.page > 1 {
        current.clone().with_page(current.page - 1)
    } else {
        current.clone()
    }
}

/// Dispatches mutations against the backend, one in flight per row.
#[derive(Debug)]
pub struct MutationDispatcher {
    client: ApiClient,
    /// Row ids with a mutation in flight. Keyed per row, not globally:
    /// actions on other rows stay available.
    busy: Mutex<HashSet<String>>,
}

impl MutationDispatcher {
    /// New dispatcher over the given client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            busy: Mutex::new(HashSet::new()),
        }
    }

    /// Create a row; on success the current page is re-fetched in place.
    pub async fn create(
        &self,
        resource: &str,
        payload: &Value,
        current: &ListQuery,
    ) -> MutationFeedback {
        match self.client.create(resource, payload).await {
            Ok(_) => MutationFeedback::succeeded("Created successfully", current.clone()),
            Err(e) => MutationFeedback::failed(e.notice_text()),
        }
    }

    /// Update a row; on success the current page is re-fetched in place.
    pub async fn update(
        &self,
        resource: &str,
        id: &str,
        payload: &Value,
        current: &ListQuery,
    ) -> MutationFeedback {
        let Some(_claim) = self.claim_row(id) else {
            return MutationFeedback::failed(busy_message());
        };
        match self.client.update(resource, id, payload).await {
            Ok(_) => MutationFeedback::succeeded("Updated successfully", current.clone()),
            Err(e) => MutationFeedback::failed(e.notice_text()),
        }
    }

    /// Delete a row, applying the page-decrement rule when the deleted row
    /// was the last one on a non-first page.
    pub async fn delete(
        &self,
        resource: &str,
        id: &str,
        current: &ListQuery,
        rows_on_page: usize,
    ) -> MutationFeedback {
        let Some(_claim) = self.claim_row(id) else {
            return MutationFeedback::failed(busy_message());
        };
        match self.client.delete(resource, id).await {
            Ok(()) => MutationFeedback::succeeded(
                "Deleted successfully",
                refresh_after_delete(current, rows_on_page),
            ),
            Err(e) => MutationFeedback::failed(e.notice_text()),
        }
    }

    /// Claim a row for the duration of a mutation; `None` when the row is
    /// already busy. The claim releases on drop.
    fn claim_row(&self, id: &str) -> Option<RowClaim<'_>> {
        let mut busy = lock(&self.busy);
        if busy.contains(id) {
            return None;
        }
        busy.insert(id.to_string());
        Some(RowClaim {
            busy: &self.busy,
            id: id.to_string(),
        })
    }
}

fn busy_message() -> String {
    "Another action on this row is still in progress".to_string()
}

fn lock(busy: &Mutex<HashSet<String>>) -> std::sync::MutexGuard<'_, HashSet<String>> {
    busy.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// RAII claim on one row's busy flag.
struct RowClaim<'a> {
    busy: &'a Mutex<HashSet<String>>,
    id: String,
}

impl Drop for RowClaim<'_> {
    fn drop(&mut self) {
        lock(self.busy).remove(&self.id);
    }
}
