//! FleetDeck web interface
//!
//! Server-rendered admin dashboard over the remote backend. Every
//! resource table is the same generic list surface: decode the URL's
//! list query, fetch the page fail-open, render the table; mutations
//! post back through the dispatcher and redirect. The live session
//! module adds debounced type-ahead filtering on top of the same state
//! machine.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]

pub mod components;
pub mod controller;
pub mod dispatcher;
pub mod extractors;
pub mod handlers;
pub mod live;
pub mod resources;
pub mod routes;
pub mod server;
pub mod state;

// Re-export the main entry points
pub use server::build_app;
pub use state::AppState;
