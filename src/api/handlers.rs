//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    error::TimerError,
    protocol::{Command, TimerStateReply},
    services::RouterReply,
    state::{AppState, TimerState},
};
use super::responses::{ApiResponse, HealthResponse, StartTimerRequest, StatusResponse};

fn invalid_input(state: &AppState, e: TimerError) -> (StatusCode, Json<ApiResponse>) {
    warn!("Rejected timer command: {}", e);
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(e.to_string(), state.coordinator.get_state())),
    )
}

/// Handle POST /message - Extension message entry point
///
/// Queries answer with `{timerState}`; fire-and-forget commands and unknown
/// actions close the exchange with 204.
pub async fn message_handler(
    State(state): State<Arc<AppState>>,
    Json(message): Json<Value>,
) -> Response {
    match state.router.dispatch(message).await {
        Ok(RouterReply::TimerState(timer_state)) => {
            Json(TimerStateReply { timer_state }).into_response()
        }
        Ok(RouterReply::NoReply) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => invalid_input(&state, e).into_response(),
    }
}

/// Handle POST /timer/start - Start or replace the focus timer
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartTimerRequest>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    state
        .router
        .execute(Command::StartTimer { minutes: request.minutes })
        .await
        .map_err(|e| invalid_input(&state, e))?;

    let timer = state.coordinator.get_state();
    info!("Start endpoint called - {} minute timer running", timer.total_minutes());
    Ok(Json(ApiResponse::active(
        format!("Focus timer started for {} minutes", timer.total_minutes()),
        timer,
    )))
}

/// Handle POST /timer/stop - Stop the focus timer
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    state
        .router
        .execute(Command::StopTimer)
        .await
        .map_err(|e| invalid_input(&state, e))?;

    info!("Stop endpoint called - focus timer stopped");
    Ok(Json(ApiResponse::inactive(
        "Focus timer stopped".to_string(),
        state.coordinator.get_state(),
    )))
}

/// Handle GET /timer - Authoritative snapshot for reconciliation pulls
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Json<TimerState> {
    Json(state.coordinator.get_state())
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timer = state.coordinator.get_state();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer,
        remaining_display: timer.format_remaining(),
        drift_seconds: timer.drift_seconds(Utc::now().timestamp_millis()),
        max_minutes: state.coordinator.max_minutes(),
        connected_tabs: state.tabs.len(),
        active_tab: state.tabs.focused(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
