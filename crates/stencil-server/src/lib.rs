//! Stencil Server
//!
//! HTTP front end for schema-constrained text extraction. Exposes health
//! and schema-discovery endpoints plus the extraction endpoint itself;
//! everything else (provider transport, schema validation) lives in the
//! lower crates.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the extraction HTTP server
///
/// Initializes tracing, builds the application state, and serves until
/// the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    tracing_subscriber::fmt::init();

    info!("Starting Stencil extraction server");
    info!("Bind address: {}", config.bind_addr());
    info!("Default model: {}", config.default_model);

    let bind_addr = config.bind_addr();
    let state = AppState::new(config);
    let app = create_router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_test_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }
}
