//! What a tab paints

use serde::{Deserialize, Serialize};

use crate::state::TimerState;

/// Rendered frame sent to a tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum DisplayView {
    /// No countdown element on the page
    Hidden,
    #[serde(rename_all = "camelCase")]
    Countdown {
        remaining_seconds: u64,
        total_duration_seconds: u64,
        /// `MM:SS` label
        display: String,
        progress_percent: u8,
    },
    #[serde(rename_all = "camelCase")]
    Completed { total_minutes: u64 },
}

impl DisplayView {
    pub fn countdown(state: &TimerState) -> Self {
        Self::Countdown {
            remaining_seconds: state.remaining_seconds,
            total_duration_seconds: state.total_duration_seconds,
            display: state.format_remaining(),
            progress_percent: state.progress_percent(),
        }
    }
}
