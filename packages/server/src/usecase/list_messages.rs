//! UseCase: メッセージ一覧取得
//!
//! 閲覧者から見えるメッセージを挿入順で返し、`limit` 指定時は末尾の
//! `limit` 件のみに絞り込みます（相対順は維持）。

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageLimit, MessageRepository, ParticipantName};

use super::error::ListMessagesError;

/// メッセージ一覧取得のユースケース
pub struct ListMessagesUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl ListMessagesUseCase {
    /// 新しい ListMessagesUseCase を作成
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// # Arguments
    ///
    /// * `viewer` - 閲覧者（`None` の場合は公開メッセージのみ）
    /// * `limit` - 返す件数の上限
    pub async fn execute(
        &self,
        viewer: Option<ParticipantName>,
        limit: Option<MessageLimit>,
    ) -> Result<Vec<ChatMessage>, ListMessagesError> {
        let mut visible = self.messages.find_visible_to(viewer).await?;
        if let Some(limit) = limit {
            let start = visible.len().saturating_sub(limit.value());
            visible.drain(..start);
        }
        Ok(visible)
    }
}
