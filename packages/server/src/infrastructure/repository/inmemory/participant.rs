//! InMemory Participant Repository 実装
//!
//! ドメイン層が定義する ParticipantRepository trait の具体的な実装。
//! `Vec` をインメモリ DB として使用し、挿入順を保持します。
//!
//! 一意性チェックと挿入、期限切れ判定と削除はどちらも同一のロック内で行うため、
//! 同名の同時登録やハートビートとの競合は発生しません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Participant, ParticipantName, ParticipantRepository, RepositoryError, Timestamp,
};

/// インメモリ Participant Repository 実装
pub struct InMemoryParticipantRepository {
    participants: Arc<Mutex<Vec<Participant>>>,
}

impl InMemoryParticipantRepository {
    /// 新しい InMemoryParticipantRepository を作成
    pub fn new(participants: Arc<Mutex<Vec<Participant>>>) -> Self {
        Self { participants }
    }
}

impl Default for InMemoryParticipantRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Vec::new())))
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn insert_if_absent(&self, participant: Participant) -> Result<(), RepositoryError> {
        let mut participants = self.participants.lock().await;
        if participants.iter().any(|p| p.name == participant.name) {
            return Err(RepositoryError::AlreadyExists(
                participant.name.into_string(),
            ));
        }
        participants.push(participant);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Participant>, RepositoryError> {
        let participants = self.participants.lock().await;
        Ok(participants.clone())
    }

    async fn find_by_name(
        &self,
        name: &ParticipantName,
    ) -> Result<Option<Participant>, RepositoryError> {
        let participants = self.participants.lock().await;
        Ok(participants.iter().find(|p| &p.name == name).cloned())
    }

    async fn touch(
        &self,
        name: &ParticipantName,
        at: Timestamp,
    ) -> Result<Participant, RepositoryError> {
        let mut participants = self.participants.lock().await;
        let participant = participants
            .iter_mut()
            .find(|p| &p.name == name)
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))?;
        participant.touch(at);
        Ok(participant.clone())
    }

    async fn find_inactive_since(
        &self,
        cutoff: Timestamp,
    ) -> Result<Vec<Participant>, RepositoryError> {
        let participants = self.participants.lock().await;
        Ok(participants
            .iter()
            .filter(|p| p.is_inactive_since(cutoff))
            .cloned()
            .collect())
    }

    async fn remove_if_inactive(
        &self,
        name: &ParticipantName,
        cutoff: Timestamp,
    ) -> Result<bool, RepositoryError> {
        let mut participants = self.participants.lock().await;
        let before = participants.len();
        participants.retain(|p| !(&p.name == name && p.is_inactive_since(cutoff)));
        Ok(participants.len() < before)
    }

    async fn clear(&self) -> Result<usize, RepositoryError> {
        let mut participants = self.participants.lock().await;
        let removed = participants.len();
        participants.clear();
        Ok(removed)
    }
}
