//! UseCase: ハートビート（在室状態の更新）

use std::sync::Arc;

use roomchat_shared::time::now_millis;

use crate::domain::{
    Participant, ParticipantName, ParticipantRepository, RepositoryError, Timestamp,
};

use super::error::HeartbeatError;

/// ハートビートのユースケース
pub struct HeartbeatUseCase {
    participants: Arc<dyn ParticipantRepository>,
}

impl HeartbeatUseCase {
    /// 新しい HeartbeatUseCase を作成
    pub fn new(participants: Arc<dyn ParticipantRepository>) -> Self {
        Self { participants }
    }

    /// 参加者の `last_status` を現在時刻に更新する
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 更新後の参加者
    /// * `Err(HeartbeatError::NotFound)` - 未登録の参加者
    pub async fn execute(&self, name: &ParticipantName) -> Result<Participant, HeartbeatError> {
        let now = Timestamp::new(now_millis());
        self.participants
            .touch(name, now)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound(name) => HeartbeatError::NotFound(name),
                other => HeartbeatError::Store(other),
            })
    }
}
