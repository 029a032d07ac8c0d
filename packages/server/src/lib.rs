//! Chat room server library.
//!
//! Participants register a name, post public or private messages, and are
//! removed by a background sweeper once they stop sending heartbeats.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub use config::{ServerConfig, SweeperSettings};
pub use error::ServerError;

/// Run the server with the given configuration.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    ui::run(config).await
}
