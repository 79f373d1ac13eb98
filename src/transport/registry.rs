//! Registry of connected tab displays

use std::{
    collections::HashMap,
    sync::Mutex,
};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{DisplayTransport, TabId};
use crate::{error::DeliveryError, protocol::DisplayMessage};

/// Events delivered to one tab's display session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    /// A coordinator broadcast
    Broadcast(DisplayMessage),
    /// The tab came back into view and should re-pull the timer state
    BecameVisible,
    /// The user stopped the timer from this tab
    UserStop,
}

#[derive(Debug)]
struct TabEntry {
    connection: u64,
    events_tx: mpsc::UnboundedSender<TabEvent>,
}

/// In-process transport: one unbounded channel per connected tab.
///
/// Also remembers which tab the browser last reported as focused; that is
/// the tab that receives the completion notice.
#[derive(Debug, Default)]
pub struct TabRegistry {
    tabs: Mutex<HashMap<TabId, TabEntry>>,
    active: Mutex<Option<TabId>>,
    next_connection: Mutex<u64>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a display context for `tab`.
    ///
    /// A reloaded tab registers again under the same id; the newer
    /// connection replaces the older one. The returned connection id is
    /// needed to unregister.
    pub fn register(&self, tab: TabId) -> (u64, mpsc::UnboundedReceiver<TabEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let connection = match self.next_connection.lock() {
            Ok(mut next) => {
                *next += 1;
                *next
            }
            Err(_) => 0,
        };

        if let Ok(mut tabs) = self.tabs.lock() {
            if tabs.insert(tab, TabEntry { connection, events_tx }).is_some() {
                debug!("Tab {} reconnected, replacing previous display", tab);
            }
        }
        info!("Tab {} display connected", tab);
        (connection, events_rx)
    }

    /// Remove `tab` if it is still owned by `connection`
    pub fn unregister(&self, tab: TabId, connection: u64) {
        let removed = match self.tabs.lock() {
            Ok(mut tabs) => match tabs.get(&tab) {
                Some(entry) if entry.connection == connection => tabs.remove(&tab).is_some(),
                _ => false,
            },
            Err(_) => false,
        };

        if removed {
            if let Ok(mut active) = self.active.lock() {
                if *active == Some(tab) {
                    *active = None;
                }
            }
            info!("Tab {} display disconnected", tab);
        }
    }

    /// Record `tab` as the focused tab
    pub fn focus(&self, tab: TabId) {
        if let Ok(mut active) = self.active.lock() {
            if *active != Some(tab) {
                debug!("Active tab is now {}", tab);
            }
            *active = Some(tab);
        }
    }

    /// Push a local event to one tab's session
    pub fn notify(&self, tab: TabId, event: TabEvent) -> Result<(), DeliveryError> {
        let tabs = self.tabs.lock().map_err(|_| DeliveryError::UnknownTab(tab))?;
        let entry = tabs.get(&tab).ok_or(DeliveryError::UnknownTab(tab))?;
        entry
            .events_tx
            .send(event)
            .map_err(|_| DeliveryError::TabClosed(tab))
    }

    /// Number of connected tabs
    pub fn len(&self) -> usize {
        self.tabs.lock().map(|tabs| tabs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Currently focused tab
    pub fn focused(&self) -> Option<TabId> {
        self.active.lock().ok().and_then(|active| *active)
    }
}

#[async_trait]
impl DisplayTransport for TabRegistry {
    async fn tabs(&self) -> Vec<TabId> {
        let mut ids: Vec<TabId> = self
            .tabs
            .lock()
            .map(|tabs| tabs.keys().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    async fn active_tab(&self) -> Option<TabId> {
        self.focused()
    }

    async fn send(&self, tab: TabId, message: &DisplayMessage) -> Result<(), DeliveryError> {
        self.notify(tab, TabEvent::Broadcast(message.clone()))
    }
}
