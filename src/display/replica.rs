//! Display replica state machine

use tracing::{debug, warn};

use super::{DisplayView, Renderer, TimerStateSource};
use crate::{protocol::DisplayMessage, state::TimerState, transport::TabId};

/// Visual state of one tab's countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicaPhase {
    Hidden,
    Counting,
}

/// Last-known coordinator state for one tab, plus what is on screen.
///
/// Render failures are logged and contained; the phase still advances so
/// the next message is handled against the right state.
pub struct DisplayReplica<R: Renderer> {
    tab: TabId,
    renderer: R,
    phase: ReplicaPhase,
    last_known: Option<TimerState>,
}

impl<R: Renderer> DisplayReplica<R> {
    pub fn new(tab: TabId, renderer: R) -> Self {
        Self {
            tab,
            renderer,
            phase: ReplicaPhase::Hidden,
            last_known: None,
        }
    }

    pub fn tab(&self) -> TabId {
        self.tab
    }

    pub fn phase(&self) -> ReplicaPhase {
        self.phase
    }

    /// Snapshot received most recently, by broadcast or by pull
    pub fn last_known(&self) -> Option<TimerState> {
        self.last_known
    }

    /// Apply a coordinator broadcast
    pub fn on_broadcast(&mut self, message: &DisplayMessage) {
        match message {
            DisplayMessage::TimerUpdate { timer_state } => self.apply(*timer_state),
            DisplayMessage::TimerStopped => {
                self.last_known = Some(TimerState::idle());
                self.hide();
            }
            DisplayMessage::TimerComplete { total_minutes } => {
                self.last_known = Some(TimerState::idle());
                self.phase = ReplicaPhase::Hidden;
                self.paint(&DisplayView::Completed {
                    total_minutes: *total_minutes,
                });
            }
        }
    }

    /// Re-pull the authoritative state; recovers from any missed broadcasts
    pub async fn on_tab_became_visible<S>(&mut self, source: &S)
    where
        S: TimerStateSource + ?Sized,
    {
        let state = source.current_state().await;
        debug!(
            "Tab {} reconciled: active={}, remaining={}s",
            self.tab, state.is_active, state.remaining_seconds
        );
        self.apply(state);
    }

    /// The user stopped the timer from this tab; hide without waiting for
    /// the coordinator's broadcast
    pub fn on_user_stop(&mut self) {
        self.hide();
    }

    fn apply(&mut self, state: TimerState) {
        self.last_known = Some(state);
        if state.is_active {
            self.phase = ReplicaPhase::Counting;
            self.paint(&DisplayView::countdown(&state));
        } else {
            self.hide();
        }
    }

    fn hide(&mut self) {
        if self.phase == ReplicaPhase::Hidden {
            return;
        }
        self.phase = ReplicaPhase::Hidden;
        self.paint(&DisplayView::Hidden);
    }

    fn paint(&mut self, view: &DisplayView) {
        if let Err(e) = self.renderer.render(view) {
            warn!("Tab {} render failed: {}", self.tab, e);
        }
    }
}
