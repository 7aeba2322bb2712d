//! Application state management

use crate::dispatcher::MutationDispatcher;
use fleetdeck_client::ApiClient;
use fleetdeck_core::{Config, Result};

/// Application state holding configuration and backend clients
#[derive(Debug)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// API client for backend communication
    pub api_client: ApiClient,
    /// Mutation dispatcher shared by the action handlers
    pub dispatcher: MutationDispatcher,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built from the
    /// configuration.
    pub fn new(config: Config) -> Result<Self> {
        let api_client = ApiClient::from_config(&config.backend)?;
        let dispatcher = MutationDispatcher::new(api_client.clone());

        Ok(Self {
            config,
            api_client,
            dispatcher,
        })
    }
}
