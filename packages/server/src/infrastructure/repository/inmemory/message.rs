//! InMemory Message Repository 実装
//!
//! メッセージログは追記のみで、更新・削除は行いません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageRepository, ParticipantName, RepositoryError};

/// インメモリ Message Repository 実装
pub struct InMemoryMessageRepository {
    messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new(messages: Arc<Mutex<Vec<ChatMessage>>>) -> Self {
        Self { messages }
    }
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Vec::new())))
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: ChatMessage) -> Result<(), RepositoryError> {
        let mut messages = self.messages.lock().await;
        messages.push(message);
        Ok(())
    }

    async fn find_visible_to(
        &self,
        viewer: Option<ParticipantName>,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| m.is_visible_to(viewer.as_ref()))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages.clone())
    }
}
