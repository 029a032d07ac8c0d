//! Shared utilities for Roomchat binaries and tests.

pub mod logger;
pub mod time;
