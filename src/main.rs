//! DO助手 focus timer - one authoritative countdown shared by every tab
//!
//! This is the main entry point for the do-helper daemon.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use do_helper::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("do_helper={},tower_http=info", config.log_level()))
        .init();

    info!("Starting do-helper server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, max timer={}min",
          config.host, config.port, config.max_minutes);

    // Create application state; the timer starts idle
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.max_minutes));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /message          - Extension message (startTimer, stopTimer, getTimerState)");
    info!("  POST /timer/start      - Start the focus timer");
    info!("  POST /timer/stop       - Stop the focus timer");
    info!("  GET  /timer            - Current timer state");
    info!("  GET  /tabs/:tab_id/ws  - Tab display connection");
    info!("  GET  /status           - Timer diagnostics");
    info!("  GET  /health           - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Clear any countdown still on screen in connected tabs
    state.coordinator.stop().await;

    info!("Server shutdown complete");
    Ok(())
}
