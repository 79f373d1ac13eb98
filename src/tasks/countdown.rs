//! Countdown tick loop

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::services::{coordinator::TickOutcome, TimerCoordinator};

/// Interval between two ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Drive one run of the coordinator until it completes, is replaced, or is
/// stopped. Cancellation always wins over a tick that is ready at the same
/// time.
pub async fn countdown_task(
    coordinator: Arc<TimerCoordinator>,
    run_id: u64,
    cancel: CancellationToken,
) {
    debug!("Countdown loop armed (run {})", run_id);

    let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!("Countdown loop cancelled (run {})", run_id);
                break;
            }

            _ = interval.tick() => {
                match coordinator.tick(run_id).await {
                    TickOutcome::Running(_) => {}
                    TickOutcome::Completed { .. } => break,
                    TickOutcome::Stale => {
                        debug!("Countdown loop superseded (run {})", run_id);
                        break;
                    }
                }
            }
        }
    }
}
