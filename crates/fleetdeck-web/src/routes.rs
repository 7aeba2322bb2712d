//! Route definitions for the dashboard

use crate::handlers::{actions, pages};
use crate::live;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Build the complete application router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(pages::health))
        // Generic resource list surface
        .route("/r/:resource", get(pages::list_page).post(actions::create_action))
        .route("/r/:resource/live", get(live::live_table))
        .route("/r/:resource/:id", post(actions::update_action))
        .route("/r/:resource/:id/delete", post(actions::delete_action))
}
