//! Main application state management

use std::{sync::Arc, time::Instant};

use chrono::{DateTime, Utc};

use crate::{
    services::{CommandRouter, TimerCoordinator},
    transport::{DisplayTransport, TabRegistry},
};

/// Everything the HTTP and WebSocket handlers share
pub struct AppState {
    /// Single owner of the countdown
    pub coordinator: Arc<TimerCoordinator>,
    pub router: CommandRouter,
    /// Connected tab displays; also the coordinator's transport
    pub tabs: Arc<TabRegistry>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Wire a coordinator to a fresh tab registry
    pub fn new(port: u16, host: String, max_minutes: u64) -> Self {
        let tabs = Arc::new(TabRegistry::new());
        let transport: Arc<dyn DisplayTransport> = tabs.clone();
        let coordinator = Arc::new(TimerCoordinator::new(transport, max_minutes));
        let router = CommandRouter::new(Arc::clone(&coordinator));

        Self {
            coordinator,
            router,
            tabs,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        self.router.last_action()
    }
}
