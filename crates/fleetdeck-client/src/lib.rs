//! HTTP client for the FleetDeck backend API
//!
//! A thin authenticated shim over the backend's conventional REST
//! surface. The list path is deliberately fail-open: a read that cannot
//! be served yields a safe empty page instead of an error.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod session;

pub use api_client::ApiClient;
pub use session::Session;
