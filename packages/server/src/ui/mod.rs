//! HTTP server implementation.

pub mod error;
mod handler;
pub mod router;
mod runner;
mod signal;
pub mod state;
pub mod sweeper;

pub use handler::http::USER_HEADER;
pub use router::create_router;
pub use runner::run;
pub use state::AppState;
pub use sweeper::spawn_sweeper;
