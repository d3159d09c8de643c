//! Tomato Timer - A work/break interval timer
//! 
//! This is the main entry point for the tomato-timer server.

use std::sync::Arc;
use anyhow::anyhow;
use tokio::net::TcpListener;
use tracing::info;

use tomato_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::display_log_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tomato_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting tomato-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, cue={:?}", 
          config.host, config.port, config.cue);

    let cues = config.cue_signals().map_err(|e| anyhow!(e))?;

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), cues));

    // Log every published timer snapshot
    let display_state = Arc::clone(&state);
    tokio::spawn(async move {
        display_log_task(display_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;
    
    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /interval/{{session|break}}/{{increment|decrement}} - Adjust an interval");
    info!("  POST /start      - Start the countdown");
    info!("  POST /pause      - Pause the countdown");
    info!("  POST /start-stop - Start or pause depending on status");
    info!("  POST /reset      - Reset to 25/5 and stop");
    info!("  GET  /status     - Check current timer");
    info!("  GET  /health     - Health check");

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

    if let Err(e) = state.cancel_countdown() {
        tracing::warn!("Failed to cancel countdown on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
