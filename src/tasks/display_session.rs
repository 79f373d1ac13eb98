//! Per-tab display session

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use crate::{
    display::{DisplayReplica, Renderer, TimerStateSource},
    transport::TabEvent,
};

/// Feed one tab's events into its replica until the tab's channel closes
pub async fn display_session_task<R, S>(
    mut replica: DisplayReplica<R>,
    mut events: mpsc::UnboundedReceiver<TabEvent>,
    source: Arc<S>,
) where
    R: Renderer,
    S: TimerStateSource + ?Sized,
{
    debug!("Display session started for tab {}", replica.tab());

    while let Some(event) = events.recv().await {
        match event {
            TabEvent::Broadcast(message) => replica.on_broadcast(&message),
            TabEvent::BecameVisible => replica.on_tab_became_visible(&*source).await,
            TabEvent::UserStop => replica.on_user_stop(),
        }
    }

    debug!("Display session ended for tab {}", replica.tab());
}
