//! # Dukaan POS Server
//!
//! HTTP+JSON API for the store's billing and inventory screens.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Dukaan POS Server                            │
//! │                                                                     │
//! │  Browser ───► HTTP (8080) ───► axum handlers ───► dukaan-db ───►    │
//! │                                      │              SQLite          │
//! │                                      ▼                              │
//! │                              dukaan-core (validation, money)        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod routes;
mod state;
mod xlsx;

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;
use dukaan_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Dukaan POS server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        port = config.http_port,
        db_path = %config.database_path,
        "Configuration loaded"
    );

    // Open the database (creates the file and runs migrations)
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database ready");

    let state = AppState { db };
    let app = routes::build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
