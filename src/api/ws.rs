//! Per-tab WebSocket display connection
//!
//! Each tab's content script opens one socket. Outbound frames are rendered
//! `DisplayView`s; inbound frames report visibility, focus and user stops.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    display::{ChannelRenderer, DisplayReplica, DisplayView},
    protocol::Command,
    state::AppState,
    tasks::display_session_task,
    transport::{TabEvent, TabId},
};

/// Frames a tab sends to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TabFrame {
    /// The tab became visible; it is now the active tab and re-pulls state
    Visible,
    /// The tab gained focus
    Focus,
    /// The user pressed stop on the in-page countdown
    Stop,
}

/// Handle GET /tabs/:tab_id/ws - Upgrade to a display connection
pub async fn tab_socket_handler(
    ws: WebSocketUpgrade,
    Path(tab): Path<TabId>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_tab_socket(socket, tab, state))
}

async fn handle_tab_socket(socket: WebSocket, tab: TabId, state: Arc<AppState>) {
    let (connection, events) = state.tabs.register(tab);
    let (mut sender, mut receiver) = socket.split();
    let (views_tx, mut views_rx) = mpsc::unbounded_channel::<DisplayView>();

    let replica = DisplayReplica::new(tab, ChannelRenderer::new(views_tx));
    tokio::spawn(display_session_task(
        replica,
        events,
        Arc::clone(&state.coordinator),
    ));

    // A freshly loaded page starts blank; catch it up right away
    if let Err(e) = state.tabs.notify(tab, TabEvent::BecameVisible) {
        debug!("Initial sync for tab {} skipped: {}", tab, e);
    }

    let writer = tokio::spawn(async move {
        while let Some(view) = views_rx.recv().await {
            if let Ok(json) = serde_json::to_string(&view) {
                if sender.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
        }
    });

    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<TabFrame>(&text) {
                Ok(frame) => handle_frame(&state, tab, frame).await,
                Err(e) => warn!("Tab {} sent an unreadable frame: {}", tab, e),
            },
            Ok(Message::Close(_)) => break,
            Err(e) => {
                debug!("Tab {} socket error: {}", tab, e);
                break;
            }
            _ => {}
        }
    }

    state.tabs.unregister(tab, connection);
    writer.abort();
}

async fn handle_frame(state: &AppState, tab: TabId, frame: TabFrame) {
    match frame {
        TabFrame::Visible => {
            state.tabs.focus(tab);
            if let Err(e) = state.tabs.notify(tab, TabEvent::BecameVisible) {
                debug!("Reconciliation for tab {} skipped: {}", tab, e);
            }
        }
        TabFrame::Focus => state.tabs.focus(tab),
        TabFrame::Stop => {
            if let Err(e) = state.tabs.notify(tab, TabEvent::UserStop) {
                debug!("Local stop for tab {} skipped: {}", tab, e);
            }
            if let Err(e) = state.router.execute(Command::StopTimer).await {
                warn!("Stop from tab {} failed: {}", tab, e);
            }
        }
    }
}
