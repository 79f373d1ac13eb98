//! DO助手 focus timer - one authoritative countdown shared by every tab
//!
//! This library provides the timer coordinator, the best-effort tab
//! transport, per-tab display replicas and the HTTP/WebSocket surface the
//! extension pages talk to.

pub mod config;
pub mod error;
pub mod protocol;
pub mod state;
pub mod transport;
pub mod display;
pub mod services;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{DeliveryError, RenderError, TimerError};
pub use state::{AppState, TimerState};
pub use services::{CommandRouter, TimerCoordinator};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
