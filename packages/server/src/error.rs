//! Server startup and runtime errors.

use thiserror::Error;

use crate::domain::RepositoryError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store configuration error: {0}")]
    Store(#[from] RepositoryError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
