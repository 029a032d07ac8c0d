//! Server configuration, resolved from CLI flags and environment variables.

use std::time::Duration;

use clap::Parser;

/// Roomchat server configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "roomchat-server", version, about = "Chat room server with participant presence")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Seconds between liveness sweeps
    #[arg(
        long,
        env = "SWEEP_INTERVAL_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub sweep_interval_secs: u64,

    /// Seconds without a heartbeat before a participant is removed
    #[arg(
        long,
        env = "PARTICIPANT_TTL_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub participant_ttl_secs: u64,

    /// SQLite database URL (e.g. `sqlite://roomchat.db`). The store is in-memory when unset
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Keep participants from a previous run instead of starting with an empty room
    #[arg(long, env = "KEEP_PARTICIPANTS")]
    pub keep_participants: bool,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn sweeper_settings(&self) -> SweeperSettings {
        SweeperSettings {
            interval: Duration::from_secs(self.sweep_interval_secs),
            ttl: Duration::from_secs(self.participant_ttl_secs),
        }
    }
}

/// Timing of the liveness sweeper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweeperSettings {
    /// Time between two sweeps. Must be non-zero.
    pub interval: Duration,
    /// Inactivity allowed before a participant expires
    pub ttl: Duration,
}

impl Default for SweeperSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            ttl: Duration::from_secs(10),
        }
    }
}
