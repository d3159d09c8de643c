//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{AppState, Direction, IntervalType, TimerSnapshot};
use super::responses::{ApiResponse, StatusResponse, HealthResponse};

fn respond(
    action: &str,
    result: Result<TimerSnapshot, String>,
    message: impl FnOnce(&TimerSnapshot) -> String,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(snapshot) => {
            let message = message(&snapshot);
            info!("{} endpoint called - {}", action, message);
            Ok(Json(ApiResponse::new(message, snapshot)))
        }
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /interval/:interval_type/:direction - Adjust an interval length
pub async fn adjust_handler(
    Path((interval_type, direction)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let (interval, direction) = match (interval_type.parse::<IntervalType>(), direction.parse::<Direction>()) {
        (Ok(interval), Ok(direction)) => (interval, direction),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Rejected adjustment: {}", e);
            return Err(StatusCode::NOT_FOUND);
        }
    };

    respond("adjust", state.adjust(interval, direction), |timer| {
        let length = match interval {
            IntervalType::Session => timer.session_length,
            IntervalType::Break => timer.break_length,
        };
        format!("{} length is {} minutes", interval, length)
    })
}

/// Handle POST /start - Begin or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("start", state.start(), |timer| {
        format!("{} counting down from {}", timer.phase, timer.display_time)
    })
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("pause", state.pause(), |timer| {
        format!("{} paused at {}", timer.phase, timer.display_time)
    })
}

/// Handle POST /start-stop - Start when paused, pause when running
pub async fn start_stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("start-stop", state.start_stop(), |timer| {
        if timer.is_paused {
            format!("{} paused at {}", timer.phase, timer.display_time)
        } else {
            format!("{} counting down from {}", timer.phase, timer.display_time)
        }
    })
}

/// Handle POST /reset - Restore default intervals and stop the countdown
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("reset", state.reset(), |timer| {
        format!("Timer reset to {}", timer.display_time)
    })
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();
    
    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
