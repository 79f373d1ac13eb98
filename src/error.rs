//! Error types shared across the coordinator, transport and displays

use thiserror::Error;

use crate::transport::TabId;

/// Errors surfaced to whoever asked the coordinator to do something
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("timer duration must be between 1 and {max} minutes, got {minutes}")]
    InvalidDuration { minutes: String, max: u64 },
}

/// A single failed delivery to one tab. Routine; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("tab {0} has no receiving context")]
    TabClosed(TabId),
    #[error("tab {0} is not registered")]
    UnknownTab(TabId),
}

/// A display failed to paint into its page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("display is detached from its page")]
    Detached,
}
