//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use tracing::info;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Repository, SeaRepository};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    info!("Starting server...");

    let db = Database::connect(&config.database_url).await?;
    let users: Arc<dyn Repository<User>> =
        Arc::new(SeaRepository::<User>::new(db.get_connection()));

    if !config.auth_bypass_enabled {
        info!("Bypass account disabled");
    }

    let app = create_router(AppState::from_config(users, &config));

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    let addr = config.server_addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C; in-flight requests are drained before exit.
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
