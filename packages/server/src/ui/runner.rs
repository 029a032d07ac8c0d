//! Server runner: wires the store, the sweeper and the HTTP listener.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::{
    config::ServerConfig, error::ServerError, infrastructure::repository::sqlite,
    usecase::ExpireParticipantsUseCase,
};

use super::{router::create_router, signal::shutdown_signal, state::AppState, sweeper};

/// Run the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = prepare_state(&config).await?;

    let sweeper = sweeper::spawn_sweeper(state.clone(), config.sweeper_settings());

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    tracing::info!("Server listening on http://{}", address);

    let result = axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    sweeper.abort();
    tracing::info!("Server stopped");
    result.map_err(ServerError::from)
}

/// Open the configured store and apply the startup reset.
///
/// Only a malformed database URL aborts startup. Connection, schema and reset
/// failures are logged; requests then fail with a store error until the
/// database becomes reachable.
async fn prepare_state(config: &ServerConfig) -> Result<Arc<AppState>, ServerError> {
    let state = match &config.database_url {
        Some(url) => {
            let pool = sqlite::connect_lazy(url)?;
            if let Err(e) = sqlite::init_schema(&pool).await {
                tracing::error!("Failed to initialize database schema: {}", e);
            }
            tracing::info!("Using SQLite store at {}", url);
            AppState::sqlite(pool)
        }
        None => {
            tracing::info!("Using in-memory store");
            AppState::in_memory()
        }
    };

    if config.keep_participants {
        tracing::info!("Keeping participants from previous run");
    } else {
        let usecase =
            ExpireParticipantsUseCase::new(state.participants.clone(), state.messages.clone());
        match usecase.reset().await {
            Ok(cleared) => tracing::info!("Cleared {} participant(s) on startup", cleared),
            Err(e) => tracing::error!("Failed to clear participants on startup: {}", e),
        }
    }

    Ok(Arc::new(state))
}
