//! UseCase: 期限切れ参加者の掃除
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ExpireParticipantsUseCase::execute() / reset() メソッド
//! - 期限切れ参加者の削除と退室メッセージの追加
//!
//! ### なぜこのテストが必要か
//! - 1 人分の削除・メッセージ追加の失敗が他の参加者の処理を止めないことを保証
//! - 走査後にハートビートした参加者を誤って削除しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：期限切れ参加者のみ削除
//! - 異常系：個別の削除失敗、退室メッセージの追加失敗、走査自体の失敗

use std::{sync::Arc, time::Duration};

use roomchat_shared::time::timestamp_to_local_rfc3339;

use crate::domain::{
    ChatMessage, MessageIdFactory, MessageRepository, ParticipantName, ParticipantRepository,
    Timestamp,
};

use super::error::ExpireParticipantsError;

/// 期限切れ参加者掃除のユースケース
pub struct ExpireParticipantsUseCase {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl ExpireParticipantsUseCase {
    /// 新しい ExpireParticipantsUseCase を作成
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            participants,
            messages,
        }
    }

    /// `last_status < now - ttl` の参加者を削除し、1 人につき 1 件の退室メッセージを追加する
    ///
    /// 個別の失敗はログに記録して残りの参加者の処理を続けます。削除に失敗した
    /// 参加者は次回の実行で再度対象になります。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ParticipantName>)` - 削除された参加者
    /// * `Err(ExpireParticipantsError)` - 期限切れ参加者の走査に失敗
    pub async fn execute(
        &self,
        now: Timestamp,
        ttl: Duration,
    ) -> Result<Vec<ParticipantName>, ExpireParticipantsError> {
        let ttl_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let cutoff = now.minus_millis(ttl_millis);

        let stale = self.participants.find_inactive_since(cutoff).await?;

        let mut removed = Vec::with_capacity(stale.len());
        for participant in stale {
            let last_status = participant.last_status;
            let name = participant.name;
            match self.participants.remove_if_inactive(&name, cutoff).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!("Participant '{}' refreshed or already gone; skipped", name);
                    continue;
                }
                Err(e) => {
                    tracing::error!("Failed to remove expired participant '{}': {}", name, e);
                    continue;
                }
            }

            tracing::info!(
                "Participant '{}' expired (last heartbeat at {})",
                name,
                timestamp_to_local_rfc3339(last_status.value())
            );
            let left = ChatMessage::left(MessageIdFactory::generate(), name.clone(), now);
            if let Err(e) = self.messages.append(left).await {
                tracing::error!("Failed to append left message for '{}': {}", name, e);
            }
            removed.push(name);
        }

        Ok(removed)
    }

    /// 全参加者を削除する（起動時のリセット用）。退室メッセージは追加しない。
    pub async fn reset(&self) -> Result<usize, ExpireParticipantsError> {
        Ok(self.participants.clear().await?)
    }
}
