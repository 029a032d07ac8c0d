//! Handler modules for HTTP endpoints.

pub mod http;

// Re-export HTTP handlers
pub use http::{
    debug_state, health_check, heartbeat, list_messages, list_participants, post_message,
    register_participant,
};
