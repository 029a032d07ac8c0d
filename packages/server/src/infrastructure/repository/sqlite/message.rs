//! SQLite Message Repository 実装
//!
//! 挿入順は `seq`（AUTOINCREMENT）で保持します。可視性の判定は
//! `ChatMessage::is_visible_to` と同じ規則を SQL で表現しています。

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use crate::domain::{
    ChatMessage, MessageId, MessageRepository, MessageText, MessageType, ParticipantName,
    Recipient, RepositoryError, Timestamp,
};

use super::{corrupt_row, storage_error};

/// (id, from_name, to_name, text, kind, sent_at)
type MessageRow = (String, String, String, String, String, i64);

const SELECT_COLUMNS: &str = "SELECT id, from_name, to_name, text, kind, sent_at FROM messages";

fn invalid(detail: impl std::fmt::Display) -> RepositoryError {
    corrupt_row("messages", detail)
}

fn to_message(
    (id, from, to, text, kind, sent_at): MessageRow,
) -> Result<ChatMessage, RepositoryError> {
    let id = uuid::Uuid::parse_str(&id)
        .map(MessageId::from_uuid)
        .map_err(invalid)?;
    let from = ParticipantName::new(from).map_err(invalid)?;
    let to = Recipient::parse(to).map_err(invalid)?;
    let text = MessageText::new(text).map_err(invalid)?;
    let kind = kind.parse::<MessageType>().map_err(invalid)?;

    Ok(ChatMessage::new(
        id,
        from,
        to,
        text,
        kind,
        Timestamp::new(sent_at),
    ))
}

fn to_messages(rows: Vec<MessageRow>) -> Result<Vec<ChatMessage>, RepositoryError> {
    rows.into_iter().map(to_message).collect()
}

/// SQLite Message Repository 実装
#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn append(&self, message: ChatMessage) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO messages (id, from_name, to_name, text, kind, sent_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(message.id.as_str())
        .bind(message.from.as_str())
        .bind(message.to.as_str())
        .bind(message.text.as_str())
        .bind(message.kind.as_str())
        .bind(message.sent_at.value())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }

    async fn find_visible_to(
        &self,
        viewer: Option<ParticipantName>,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        // NULL の閲覧者は from/to のどちらとも一致しない
        let viewer = viewer.map(ParticipantName::into_string);
        let rows: Vec<MessageRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS}
             WHERE kind = ? OR (kind = ? AND (from_name = ? OR to_name = ?))
             ORDER BY seq"
        ))
        .bind(MessageType::Message.as_str())
        .bind(MessageType::PrivateMessage.as_str())
        .bind(viewer.clone())
        .bind(viewer)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;
        to_messages(rows)
    }

    async fn find_all(&self) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows: Vec<MessageRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} ORDER BY seq"))
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;
        to_messages(rows)
    }
}
