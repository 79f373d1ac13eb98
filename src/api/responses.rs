//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{protocol::RequestedMinutes, state::TimerState, transport::TabId};

/// Body of `POST /timer/start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartTimerRequest {
    pub minutes: RequestedMinutes,
}

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create an active response
    pub fn active(message: String, timer: TimerState) -> Self {
        Self::new("active".to_string(), message, timer)
    }

    /// Create an inactive response
    pub fn inactive(message: String, timer: TimerState) -> Self {
        Self::new("inactive".to_string(), message, timer)
    }

    /// Create an error response
    pub fn error(message: String, timer: TimerState) -> Self {
        Self::new("error".to_string(), message, timer)
    }
}

/// Status response with timer diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub remaining_display: String,
    /// Wall clock minus tick count, while a timer runs
    pub drift_seconds: Option<i64>,
    pub max_minutes: u64,
    pub connected_tabs: usize,
    pub active_tab: Option<TabId>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
