//! Timer state structure and management

use serde::{Deserialize, Serialize};

/// Snapshot of the focus countdown.
///
/// Owned by the coordinator; every other component only ever holds a copy.
/// Serialized in camelCase because that is the shape the extension pages read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub is_active: bool,
    /// Requested duration; zero while idle
    pub total_duration_seconds: u64,
    pub remaining_seconds: u64,
    /// Wall-clock anchor of the run, diagnostics only
    pub started_at_epoch_millis: Option<i64>,
}

impl TimerState {
    /// Create the idle state
    pub fn idle() -> Self {
        Self {
            is_active: false,
            total_duration_seconds: 0,
            remaining_seconds: 0,
            started_at_epoch_millis: None,
        }
    }

    /// Create a freshly started state for `minutes`
    pub fn started(minutes: u64, now_epoch_millis: i64) -> Self {
        let total = minutes.saturating_mul(60);
        Self {
            is_active: true,
            total_duration_seconds: total,
            remaining_seconds: total,
            started_at_epoch_millis: Some(now_epoch_millis),
        }
    }

    /// Check if the countdown is running
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whole minutes of the requested duration
    pub fn total_minutes(&self) -> u64 {
        self.total_duration_seconds / 60
    }

    /// Seconds counted down so far, according to the tick loop
    pub fn elapsed_seconds(&self) -> u64 {
        self.total_duration_seconds
            .saturating_sub(self.remaining_seconds)
    }

    /// Wall-clock elapsed minus tick-counted elapsed, in seconds.
    ///
    /// A positive value means the tick loop is running behind the clock.
    /// `None` while idle.
    pub fn drift_seconds(&self, now_epoch_millis: i64) -> Option<i64> {
        if !self.is_active {
            return None;
        }
        let started = self.started_at_epoch_millis?;
        let wall_elapsed = (now_epoch_millis - started) / 1000;
        Some(wall_elapsed - self.elapsed_seconds() as i64)
    }

    /// Completed fraction of the run as a whole percentage
    pub fn progress_percent(&self) -> u8 {
        if self.total_duration_seconds == 0 {
            return 0;
        }
        (self.elapsed_seconds().saturating_mul(100) / self.total_duration_seconds) as u8
    }

    /// Remaining time as `MM:SS`, or `H:MM:SS` from one hour up
    pub fn format_remaining(&self) -> String {
        let hours = self.remaining_seconds / 3600;
        let minutes = (self.remaining_seconds % 3600) / 60;
        let seconds = self.remaining_seconds % 60;

        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{:02}:{:02}", minutes, seconds)
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_state_spans_full_duration() {
        let state = TimerState::started(2, 1_000);
        assert!(state.is_active());
        assert_eq!(state.total_duration_seconds, 120);
        assert_eq!(state.remaining_seconds, 120);
        assert_eq!(state.started_at_epoch_millis, Some(1_000));
        assert_eq!(state.total_minutes(), 2);
    }

    #[test]
    fn oversized_durations_saturate() {
        let state = TimerState::started(u64::MAX, 0);
        assert_eq!(state.total_duration_seconds, u64::MAX);
        assert_eq!(state.progress_percent(), 0);
    }

    #[test]
    fn idle_state_has_no_anchor() {
        let state = TimerState::default();
        assert!(!state.is_active());
        assert_eq!(state.remaining_seconds, 0);
        assert_eq!(state.drift_seconds(5_000), None);
        assert_eq!(state.progress_percent(), 0);
    }

    #[test]
    fn format_remaining_switches_to_hours() {
        let mut state = TimerState::started(90, 0);
        assert_eq!(state.format_remaining(), "1:30:00");
        state.remaining_seconds = 65;
        assert_eq!(state.format_remaining(), "01:05");
        state.remaining_seconds = 0;
        assert_eq!(state.format_remaining(), "00:00");
    }

    #[test]
    fn drift_compares_wall_clock_against_ticks() {
        let mut state = TimerState::started(1, 10_000);
        state.remaining_seconds = 50;
        // 10s counted, 12.4s on the wall clock
        assert_eq!(state.drift_seconds(22_400), Some(2));
        assert_eq!(state.progress_percent(), 16);
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_value(TimerState::started(1, 42)).unwrap();
        assert_eq!(json["isActive"], true);
        assert_eq!(json["totalDurationSeconds"], 60);
        assert_eq!(json["remainingSeconds"], 60);
        assert_eq!(json["startedAtEpochMillis"], 42);
    }
}
