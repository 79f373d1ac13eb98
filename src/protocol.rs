//! Message shapes exchanged with extension pages
//!
//! Both directions are tagged by an `action` field, matching the
//! `chrome.runtime` messages the extension already sends.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

use crate::state::TimerState;

/// Coordinator → display messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum DisplayMessage {
    #[serde(rename_all = "camelCase")]
    TimerUpdate { timer_state: TimerState },
    #[serde(rename_all = "camelCase")]
    TimerComplete { total_minutes: u64 },
    TimerStopped,
}

/// UI → coordinator commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    /// Fire-and-forget
    StartTimer { minutes: RequestedMinutes },
    /// Fire-and-forget
    StopTimer,
    /// Query; answered with a `TimerStateReply`
    GetTimerState,
}

impl Command {
    /// Parse an inbound extension message.
    ///
    /// Unknown actions and malformed payloads are logged and yield `None`.
    pub fn from_message(message: Value) -> Option<Self> {
        let action = message
            .get("action")
            .and_then(Value::as_str)
            .map(str::to_owned);

        match serde_json::from_value::<Command>(message) {
            Ok(command) => Some(command),
            Err(e) => {
                match action {
                    Some(action) if Self::is_known(&action) => {
                        warn!("Ignoring malformed '{}' message: {}", action, e);
                    }
                    Some(action) => warn!("Ignoring unknown action: {}", action),
                    None => warn!("Ignoring message without an action field"),
                }
                None
            }
        }
    }

    /// Wire name of the command
    pub fn action(&self) -> &'static str {
        match self {
            Command::StartTimer { .. } => "startTimer",
            Command::StopTimer => "stopTimer",
            Command::GetTimerState => "getTimerState",
        }
    }

    /// Whether the sender expects a reply
    pub fn expects_reply(&self) -> bool {
        matches!(self, Command::GetTimerState)
    }

    fn is_known(action: &str) -> bool {
        matches!(action, "startTimer" | "stopTimer" | "getTimerState")
    }
}

/// A duration exactly as the page sent it.
///
/// Any JSON number is accepted here so that out-of-range and fractional
/// values reach the coordinator's validation instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestedMinutes(Number);

impl RequestedMinutes {
    /// The value as a whole number of minutes, if it is one that fits `i64`
    pub fn whole(&self) -> Option<i64> {
        if let Some(minutes) = self.0.as_i64() {
            return Some(minutes);
        }
        match self.0.as_f64() {
            Some(minutes)
                if minutes.fract() == 0.0
                    && minutes >= i64::MIN as f64
                    && minutes < i64::MAX as f64 =>
            {
                Some(minutes as i64)
            }
            _ => None,
        }
    }
}

impl From<i64> for RequestedMinutes {
    fn from(minutes: i64) -> Self {
        Self(Number::from(minutes))
    }
}

impl std::fmt::Display for RequestedMinutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Reply to `getTimerState`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStateReply {
    pub timer_state: TimerState,
}
