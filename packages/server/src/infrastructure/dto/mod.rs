//! Data transfer objects exchanged with the HTTP layer.

pub mod http;
