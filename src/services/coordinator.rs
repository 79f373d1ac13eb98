//! The authoritative focus countdown

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex as AsyncMutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    display::TimerStateSource,
    error::TimerError,
    protocol::DisplayMessage,
    state::TimerState,
    tasks::countdown_task,
    transport::{multicast, DisplayTransport},
};

/// Upper bound on a single run when none is configured (one day)
pub const DEFAULT_MAX_MINUTES: u64 = 1440;

/// One armed tick loop. Replacing or stopping a run cancels its token.
#[derive(Debug)]
struct Run {
    id: u64,
    cancel: CancellationToken,
}

#[derive(Debug)]
struct Inner {
    state: TimerState,
    run: Option<Run>,
    next_run_id: u64,
}

/// What a tick did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    /// The tick belonged to a run that was replaced or stopped
    Stale,
    Running(TimerState),
    Completed { total_minutes: u64 },
}

/// Single owner of the countdown.
///
/// `state.is_active` and `run.is_some()` always change together under the
/// same lock, so an idle coordinator never has a tick loop armed.
///
/// Every state change and its fan-out happen while holding `broadcast`, so
/// tabs receive messages in the order the state changed.
pub struct TimerCoordinator {
    inner: Mutex<Inner>,
    broadcast: AsyncMutex<()>,
    transport: Arc<dyn DisplayTransport>,
    max_minutes: u64,
}

impl TimerCoordinator {
    pub fn new(transport: Arc<dyn DisplayTransport>, max_minutes: u64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: TimerState::idle(),
                run: None,
                next_run_id: 0,
            }),
            broadcast: AsyncMutex::new(()),
            transport,
            max_minutes,
        }
    }

    /// Largest accepted duration in minutes
    pub fn max_minutes(&self) -> u64 {
        self.max_minutes
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn validate(&self, minutes: i64) -> Result<u64, TimerError> {
        match u64::try_from(minutes) {
            Ok(m) if (1..=self.max_minutes).contains(&m) => Ok(m),
            _ => Err(TimerError::InvalidDuration {
                minutes: minutes.to_string(),
                max: self.max_minutes,
            }),
        }
    }

    /// Start a countdown of `minutes`, replacing any running one.
    ///
    /// Out-of-range durations are rejected before the state is touched.
    pub async fn start(self: &Arc<Self>, minutes: i64) -> Result<TimerState, TimerError> {
        let minutes = self.validate(minutes)?;
        let _sequence = self.broadcast.lock().await;

        let (snapshot, run_id, cancel) = {
            let mut inner = self.lock();
            if let Some(previous) = inner.run.take() {
                previous.cancel.cancel();
                debug!("Replacing running timer (run {})", previous.id);
            }

            inner.next_run_id += 1;
            let run = Run {
                id: inner.next_run_id,
                cancel: CancellationToken::new(),
            };
            let run_id = run.id;
            let cancel = run.cancel.clone();
            inner.run = Some(run);
            inner.state = TimerState::started(minutes, Utc::now().timestamp_millis());
            (inner.state, run_id, cancel)
        };

        info!("Focus timer started for {} minutes (run {})", minutes, run_id);

        multicast(
            &*self.transport,
            &DisplayMessage::TimerUpdate { timer_state: snapshot },
            None,
        )
        .await;

        tokio::spawn(countdown_task(Arc::clone(self), run_id, cancel));
        Ok(snapshot)
    }

    /// Stop the running countdown. A no-op while idle.
    pub async fn stop(&self) {
        let _sequence = self.broadcast.lock().await;

        let run = {
            let mut inner = self.lock();
            let run = inner.run.take();
            if run.is_some() {
                inner.state = TimerState::idle();
            }
            run
        };

        let Some(run) = run else {
            debug!("Stop requested with no active timer");
            return;
        };

        run.cancel.cancel();
        info!("Focus timer stopped (run {})", run.id);
        multicast(&*self.transport, &DisplayMessage::TimerStopped, None).await;
    }

    /// Current snapshot
    pub fn get_state(&self) -> TimerState {
        self.lock().state
    }

    /// Advance run `run_id` by one second and broadcast the result
    pub(crate) async fn tick(&self, run_id: u64) -> TickOutcome {
        let _sequence = self.broadcast.lock().await;

        let outcome = {
            let mut inner = self.lock();
            match &inner.run {
                Some(run) if run.id == run_id => {}
                _ => return TickOutcome::Stale,
            }

            inner.state.remaining_seconds = inner.state.remaining_seconds.saturating_sub(1);
            if inner.state.remaining_seconds > 0 {
                TickOutcome::Running(inner.state)
            } else {
                let total_minutes = inner.state.total_minutes();
                inner.run = None;
                inner.state = TimerState::idle();
                TickOutcome::Completed { total_minutes }
            }
        };

        match outcome {
            TickOutcome::Running(snapshot) => {
                multicast(
                    &*self.transport,
                    &DisplayMessage::TimerUpdate { timer_state: snapshot },
                    None,
                )
                .await;
            }
            TickOutcome::Completed { total_minutes } => {
                info!("Focus timer completed after {} minutes (run {})", total_minutes, run_id);
                self.announce_completion(total_minutes).await;
            }
            TickOutcome::Stale => {}
        }

        outcome
    }

    /// Celebrate in the focused tab only; everyone else just sees the timer end.
    /// Callers hold the broadcast sequence.
    async fn announce_completion(&self, total_minutes: u64) {
        let active = self.transport.active_tab().await;

        if let Some(tab) = active {
            let message = DisplayMessage::TimerComplete { total_minutes };
            if let Err(e) = self.transport.send(tab, &message).await {
                debug!("Completion notice for tab {} dropped: {}", tab, e);
            }
        } else {
            debug!("No focused tab to receive the completion notice");
        }

        multicast(&*self.transport, &DisplayMessage::TimerStopped, active).await;
    }
}

#[async_trait]
impl TimerStateSource for TimerCoordinator {
    async fn current_state(&self) -> TimerState {
        self.get_state()
    }
}
