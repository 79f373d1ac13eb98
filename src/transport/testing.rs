//! In-memory transport for tests

use std::{
    collections::HashSet,
    sync::Mutex,
};

use async_trait::async_trait;
use tokio::sync::{oneshot, Notify};

use super::{DisplayTransport, TabId};
use crate::{error::DeliveryError, protocol::DisplayMessage};

/// Records every delivered message; tabs marked as failing always error
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    tabs: Vec<TabId>,
    failing: HashSet<TabId>,
    active: Mutex<Option<TabId>>,
    sent: Mutex<Vec<(TabId, DisplayMessage)>>,
    attempts: Mutex<usize>,
}

impl RecordingTransport {
    pub(crate) fn new(tabs: &[TabId]) -> Self {
        Self {
            tabs: tabs.to_vec(),
            ..Self::default()
        }
    }

    pub(crate) fn failing(mut self, tab: TabId) -> Self {
        self.failing.insert(tab);
        self
    }

    pub(crate) fn with_active(self, tab: TabId) -> Self {
        *self.active.lock().unwrap() = Some(tab);
        self
    }

    pub(crate) fn sent(&self) -> Vec<(TabId, DisplayMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn sent_to(&self, tab: TabId) -> Vec<DisplayMessage> {
        self.sent()
            .into_iter()
            .filter(|(t, _)| *t == tab)
            .map(|(_, message)| message)
            .collect()
    }

    pub(crate) fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    pub(crate) fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl DisplayTransport for RecordingTransport {
    async fn tabs(&self) -> Vec<TabId> {
        self.tabs.clone()
    }

    async fn active_tab(&self) -> Option<TabId> {
        *self.active.lock().unwrap()
    }

    async fn send(&self, tab: TabId, message: &DisplayMessage) -> Result<(), DeliveryError> {
        *self.attempts.lock().unwrap() += 1;
        if self.failing.contains(&tab) {
            return Err(DeliveryError::TabClosed(tab));
        }
        self.sent.lock().unwrap().push((tab, message.clone()));
        Ok(())
    }
}

/// Wraps a `RecordingTransport`. Once armed, the next fan-out parks in
/// `tabs()` until the test releases it.
#[derive(Debug, Default)]
pub(crate) struct GatedTransport {
    recorded: RecordingTransport,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    parked: Notify,
}

impl GatedTransport {
    pub(crate) fn new(recorded: RecordingTransport) -> Self {
        Self {
            recorded,
            ..Self::default()
        }
    }

    pub(crate) fn recorded(&self) -> &RecordingTransport {
        &self.recorded
    }

    /// Park the next fan-out; sending on the returned handle releases it
    pub(crate) fn arm(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(gate);
        release
    }

    /// Resolves once a fan-out is parked at the gate
    pub(crate) async fn wait_parked(&self) {
        self.parked.notified().await;
    }
}

#[async_trait]
impl DisplayTransport for GatedTransport {
    async fn tabs(&self) -> Vec<TabId> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            self.parked.notify_one();
            let _ = gate.await;
        }
        self.recorded.tabs().await
    }

    async fn active_tab(&self) -> Option<TabId> {
        self.recorded.active_tab().await
    }

    async fn send(&self, tab: TabId, message: &DisplayMessage) -> Result<(), DeliveryError> {
        self.recorded.send(tab, message).await
    }
}
