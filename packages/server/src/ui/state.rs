//! Shared application state.

use std::sync::Arc;

use sqlx::sqlite::SqlitePool;

use crate::{
    domain::{MessageRepository, ParticipantRepository},
    infrastructure::repository::{
        InMemoryMessageRepository, InMemoryParticipantRepository, SqliteMessageRepository,
        SqliteParticipantRepository,
    },
};

/// Shared application state
///
/// Holds the store handles only; each request builds the usecase it needs.
#[derive(Clone)]
pub struct AppState {
    /// `participants` コレクション
    pub participants: Arc<dyn ParticipantRepository>,
    /// `messages` コレクション
    pub messages: Arc<dyn MessageRepository>,
}

impl AppState {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            participants,
            messages,
        }
    }

    /// State backed by fresh in-memory collections
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryParticipantRepository::default()),
            Arc::new(InMemoryMessageRepository::default()),
        )
    }

    /// State backed by the two tables of one SQLite pool
    pub fn sqlite(pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(SqliteParticipantRepository::new(pool.clone())),
            Arc::new(SqliteMessageRepository::new(pool)),
        )
    }
}
