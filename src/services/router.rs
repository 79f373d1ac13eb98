//! Command routing from UI surfaces to the coordinator

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use super::TimerCoordinator;
use crate::{error::TimerError, protocol::Command, state::TimerState};

/// What the sender gets back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterReply {
    /// Fire-and-forget command, or an ignored message; the reply channel is
    /// closed without a payload
    NoReply,
    /// Answer to a state query
    TimerState(TimerState),
}

/// Adapts inbound commands into coordinator calls and tracks the last one
pub struct CommandRouter {
    coordinator: Arc<TimerCoordinator>,
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl CommandRouter {
    pub fn new(coordinator: Arc<TimerCoordinator>) -> Self {
        Self {
            coordinator,
            last_action: Mutex::new(None),
        }
    }

    /// Route a raw extension message. Unknown actions are ignored.
    pub async fn dispatch(&self, message: Value) -> Result<RouterReply, TimerError> {
        match Command::from_message(message) {
            Some(command) => self.execute(command).await,
            None => Ok(RouterReply::NoReply),
        }
    }

    /// Run a parsed command
    pub async fn execute(&self, command: Command) -> Result<RouterReply, TimerError> {
        debug!("Routing '{}' command", command.action());

        let reply = match command {
            Command::StartTimer { ref minutes } => {
                let whole = minutes.whole().ok_or_else(|| TimerError::InvalidDuration {
                    minutes: minutes.to_string(),
                    max: self.coordinator.max_minutes(),
                })?;
                self.coordinator.start(whole).await?;
                RouterReply::NoReply
            }
            Command::StopTimer => {
                self.coordinator.stop().await;
                RouterReply::NoReply
            }
            Command::GetTimerState => RouterReply::TimerState(self.coordinator.get_state()),
        };

        if !command.expects_reply() {
            info!("Command '{}' applied", command.action());
            self.record(command.action());
        }
        Ok(reply)
    }

    fn record(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), Utc::now()));
        }
    }

    /// Last state-changing command and when it was applied
    pub fn last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, at)) => (Some(action), Some(at)),
            None => (None, None),
        }
    }
}
