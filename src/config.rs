//! Configuration Module
//!
//! Command-line flags for the server binary. Every value has a default, so
//! the server starts with no arguments; `RUST_LOG` still overrides
//! `--log-level` for fine-grained filtering.

use clap::Parser;

/// Server configuration parameters.
#[derive(Debug, Clone, Parser)]
#[command(name = "image_relay", about = "Remote image access server")]
pub struct Config {
    /// Address to bind the HTTP listener to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP listener to
    #[arg(long, default_value_t = 9909)]
    pub port: u16,

    /// Maximum number of decoded images kept resident
    #[arg(long = "cache-len", default_value_t = 10)]
    pub cache_len: usize,

    /// Number of async runtime worker threads
    #[arg(long, default_value_t = 4)]
    pub workers: usize,

    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9909,
            cache_len: 10,
            workers: 4,
            log_level: "info".to_string(),
        }
    }
}
