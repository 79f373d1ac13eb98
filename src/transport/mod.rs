//! Best-effort delivery from the coordinator to tab displays
//!
//! Every tab is an independent receiver that may vanish at any moment
//! (closed, reloading, privileged page with no listener). A send to one tab
//! is an isolated attempt: its failure is logged and dropped, and the loop
//! moves on. Nothing is retried; displays recover by pulling state when they
//! become visible again.

pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use tracing::debug;

use crate::{error::DeliveryError, protocol::DisplayMessage};

pub use registry::{TabEvent, TabRegistry};

/// Browser tab identifier
pub type TabId = u32;

/// Point-to-point channel from the coordinator to each display context
#[async_trait]
pub trait DisplayTransport: Send + Sync {
    /// Every tab currently known to the transport
    async fn tabs(&self) -> Vec<TabId>;

    /// The tab the user is looking at, if the browser reported one
    async fn active_tab(&self) -> Option<TabId>;

    /// Deliver one message to one tab
    async fn send(&self, tab: TabId, message: &DisplayMessage) -> Result<(), DeliveryError>;
}

/// Send `message` to every known tab except `except`.
///
/// Per-tab failures are swallowed so one dead tab never costs the others
/// their update.
pub async fn multicast(
    transport: &dyn DisplayTransport,
    message: &DisplayMessage,
    except: Option<TabId>,
) {
    for tab in transport.tabs().await {
        if Some(tab) == except {
            continue;
        }
        if let Err(e) = transport.send(tab, message).await {
            debug!("Dropped display message for tab {}: {}", tab, e);
        }
    }
}
