//! Background tasks module
//!
//! This module contains the tasks that run alongside the HTTP server: the
//! countdown tick loop and one display session per connected tab.

pub mod countdown;
pub mod display_session;

// Re-export main functions
pub use countdown::countdown_task;
pub use display_session::display_session_task;
