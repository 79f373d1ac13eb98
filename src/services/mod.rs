//! Timer services module
//!
//! This module contains the countdown coordinator and the router that feeds
//! it commands from the extension's UI surfaces.

pub mod coordinator;
pub mod router;

// Re-export main types
pub use coordinator::TimerCoordinator;
pub use router::{CommandRouter, RouterReply};
