//! Per-tab display of the coordinator's countdown
//!
//! A replica is a pure cache: it renders whatever the coordinator last
//! broadcast and, when its tab becomes visible again, pulls the
//! authoritative state instead of waiting for the next tick.

pub mod renderer;
pub mod replica;
pub mod view;

use async_trait::async_trait;

use crate::state::TimerState;

pub use renderer::{ChannelRenderer, Renderer};
pub use replica::{DisplayReplica, ReplicaPhase};
pub use view::DisplayView;

/// Where a replica pulls authoritative state from
#[async_trait]
pub trait TimerStateSource: Send + Sync {
    async fn current_state(&self) -> TimerState;
}
