//! SQLite Participant Repository 実装

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use crate::domain::{
    Participant, ParticipantName, ParticipantRepository, RepositoryError, Timestamp,
};

use super::{corrupt_row, storage_error};

type ParticipantRow = (String, i64);

fn to_participant((name, last_status): ParticipantRow) -> Result<Participant, RepositoryError> {
    let name = ParticipantName::new(name).map_err(|e| corrupt_row("participants", e))?;
    Ok(Participant::new(name, Timestamp::new(last_status)))
}

fn to_participants(rows: Vec<ParticipantRow>) -> Result<Vec<Participant>, RepositoryError> {
    rows.into_iter().map(to_participant).collect()
}

/// SQLite Participant Repository 実装
#[derive(Clone)]
pub struct SqliteParticipantRepository {
    pool: SqlitePool,
}

impl SqliteParticipantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for SqliteParticipantRepository {
    async fn insert_if_absent(&self, participant: Participant) -> Result<(), RepositoryError> {
        let inserted =
            sqlx::query("INSERT OR IGNORE INTO participants (name, last_status) VALUES (?, ?)")
                .bind(participant.name.as_str())
                .bind(participant.last_status.value())
                .execute(&self.pool)
                .await
                .map_err(storage_error)?
                .rows_affected();

        if inserted == 0 {
            return Err(RepositoryError::AlreadyExists(
                participant.name.into_string(),
            ));
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Participant>, RepositoryError> {
        let rows: Vec<ParticipantRow> =
            sqlx::query_as("SELECT name, last_status FROM participants ORDER BY rowid")
                .fetch_all(&self.pool)
                .await
                .map_err(storage_error)?;
        to_participants(rows)
    }

    async fn find_by_name(
        &self,
        name: &ParticipantName,
    ) -> Result<Option<Participant>, RepositoryError> {
        let row: Option<ParticipantRow> =
            sqlx::query_as("SELECT name, last_status FROM participants WHERE name = ?")
                .bind(name.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error)?;
        row.map(to_participant).transpose()
    }

    async fn touch(
        &self,
        name: &ParticipantName,
        at: Timestamp,
    ) -> Result<Participant, RepositoryError> {
        let row: Option<ParticipantRow> = sqlx::query_as(
            "UPDATE participants SET last_status = MAX(last_status, ?)
             WHERE name = ?
             RETURNING name, last_status",
        )
        .bind(at.value())
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        match row {
            Some(row) => to_participant(row),
            None => Err(RepositoryError::NotFound(name.to_string())),
        }
    }

    async fn find_inactive_since(
        &self,
        cutoff: Timestamp,
    ) -> Result<Vec<Participant>, RepositoryError> {
        let rows: Vec<ParticipantRow> = sqlx::query_as(
            "SELECT name, last_status FROM participants WHERE last_status < ? ORDER BY rowid",
        )
        .bind(cutoff.value())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;
        to_participants(rows)
    }

    async fn remove_if_inactive(
        &self,
        name: &ParticipantName,
        cutoff: Timestamp,
    ) -> Result<bool, RepositoryError> {
        let removed = sqlx::query("DELETE FROM participants WHERE name = ? AND last_status < ?")
            .bind(name.as_str())
            .bind(cutoff.value())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?
            .rows_affected();
        Ok(removed > 0)
    }

    async fn clear(&self) -> Result<usize, RepositoryError> {
        let removed = sqlx::query("DELETE FROM participants")
            .execute(&self.pool)
            .await
            .map_err(storage_error)?
            .rows_affected();
        Ok(usize::try_from(removed).unwrap_or(usize::MAX))
    }
}
