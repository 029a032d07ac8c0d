//! UseCase: 参加者一覧取得

use std::sync::Arc;

use crate::domain::{Participant, ParticipantRepository};

use super::error::ListParticipantsError;

/// 参加者一覧取得のユースケース
pub struct ListParticipantsUseCase {
    participants: Arc<dyn ParticipantRepository>,
}

impl ListParticipantsUseCase {
    /// 新しい ListParticipantsUseCase を作成
    pub fn new(participants: Arc<dyn ParticipantRepository>) -> Self {
        Self { participants }
    }

    /// 現在の参加者をストアの走査順で返す（順序は保証しない）
    pub async fn execute(&self) -> Result<Vec<Participant>, ListParticipantsError> {
        Ok(self.participants.find_all().await?)
    }
}
