//! Configuration and CLI argument handling

use clap::Parser;

use crate::services::coordinator::DEFAULT_MAX_MINUTES;

/// Ceiling for `--max-minutes` (one year)
pub const MAX_CONFIGURABLE_MINUTES: u64 = 525_600;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "do-helper")]
#[command(about = "Focus-timer coordinator that keeps one countdown in sync across browser tabs")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Longest focus timer accepted, in minutes
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_MAX_MINUTES,
        value_parser = clap::value_parser!(u64).range(1..=MAX_CONFIGURABLE_MINUTES)
    )]
    pub max_minutes: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
