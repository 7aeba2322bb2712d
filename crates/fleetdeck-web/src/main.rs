//! FleetDeck dashboard server entry point
#![forbid(unsafe_code)]

use fleetdeck_web::build_app;
use std::net::{IpAddr, SocketAddr};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration before logging so the format setting applies.
    let config = fleetdeck_core::Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        fleetdeck_core::Config::default()
    });

    fleetdeck_core::init_logging(&config.logging)?;

    let host: IpAddr = config.webserver.host.parse().map_err(|e| {
        format!("Invalid web server host '{}': {e}", config.webserver.host)
    })?;
    let addr = SocketAddr::new(host, config.webserver.port);

    if config.backend.api_token.is_none() {
        warn!("no static API token configured; backend requests rely on per-session credentials");
    }

    let app = build_app(config)?;

    info!("Starting FleetDeck dashboard on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
