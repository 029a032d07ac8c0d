//! Liveness sweeper: a background task that periodically expires
//! participants whose last heartbeat is older than the TTL.

use std::sync::Arc;

use roomchat_shared::time::now_millis;
use tokio::{
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

use crate::{
    config::SweeperSettings,
    domain::Timestamp,
    ui::state::AppState,
    usecase::ExpireParticipantsUseCase,
};

/// Run one sweep. Failures are logged and never propagate.
pub async fn sweep_once(usecase: &ExpireParticipantsUseCase, settings: SweeperSettings) {
    let now = Timestamp::new(now_millis());
    match usecase.execute(now, settings.ttl).await {
        Ok(removed) if removed.is_empty() => {}
        Ok(removed) => {
            tracing::info!("Sweep removed {} inactive participant(s)", removed.len());
        }
        Err(e) => {
            tracing::error!("Sweep failed, retrying on next tick: {}", e);
        }
    }
}

/// Spawn the sweeper on the current runtime.
///
/// The first sweep happens one full interval after start. Abort the returned
/// handle to stop it.
pub fn spawn_sweeper(state: Arc<AppState>, settings: SweeperSettings) -> JoinHandle<()> {
    tokio::spawn(async move {
        let usecase =
            ExpireParticipantsUseCase::new(state.participants.clone(), state.messages.clone());
        let mut ticker = interval(settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // `interval` completes its first tick immediately.
        ticker.tick().await;

        tracing::info!(
            "Sweeper started (interval: {:?}, ttl: {:?})",
            settings.interval,
            settings.ttl
        );
        loop {
            ticker.tick().await;
            sweep_once(&usecase, settings).await;
        }
    })
}
