//! UseCase: 参加者登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterParticipantUseCase::execute() メソッド
//! - 参加者の登録処理（重複チェック、入室メッセージの追加）
//!
//! ### なぜこのテストが必要か
//! - 参加者名の一意性を保証する
//! - 登録と同時に入室メッセージがログに残ることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の登録
//! - 異常系：同名での再登録、ストア障害

use std::sync::Arc;

use roomchat_shared::time::now_millis;

use crate::domain::{
    ChatMessage, MessageIdFactory, MessageRepository, Participant, ParticipantName,
    ParticipantRepository, RepositoryError, Timestamp,
};

use super::error::RegisterParticipantError;

/// 参加者登録のユースケース
pub struct RegisterParticipantUseCase {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl RegisterParticipantUseCase {
    /// 新しい RegisterParticipantUseCase を作成
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            participants,
            messages,
        }
    }

    /// 参加者登録を実行
    ///
    /// 参加者の追加は条件付き書き込み 1 回で行うため、同名の同時登録は
    /// 片方のみ成功します。入室メッセージの追加に失敗した場合でも
    /// 参加者は登録済みのまま残ります。
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 登録された参加者
    /// * `Err(RegisterParticipantError)` - 登録失敗
    pub async fn execute(
        &self,
        name: ParticipantName,
    ) -> Result<Participant, RegisterParticipantError> {
        let now = Timestamp::new(now_millis());
        let participant = Participant::new(name.clone(), now);

        // 1. 参加者を追加（同名が存在すれば Conflict）
        self.participants
            .insert_if_absent(participant.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::AlreadyExists(name) => RegisterParticipantError::Conflict(name),
                other => RegisterParticipantError::Store(other),
            })?;

        // 2. 入室メッセージを追加
        self.messages
            .append(ChatMessage::joined(MessageIdFactory::generate(), name, now))
            .await
            .map_err(RegisterParticipantError::Store)?;

        Ok(participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{JOINED_TEXT, MessageType, Recipient, repository::MockMessageRepository},
        infrastructure::repository::{InMemoryMessageRepository, InMemoryParticipantRepository},
    };

    fn create_test_repositories() -> (
        Arc<InMemoryParticipantRepository>,
        Arc<InMemoryMessageRepository>,
    ) {
        (
            Arc::new(InMemoryParticipantRepository::default()),
            Arc::new(InMemoryMessageRepository::default()),
        )
    }

    fn name(s: &str) -> ParticipantName {
        ParticipantName::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_participant_success() {
        // テスト項目: 参加者を登録すると入室メッセージが追加される
        // given (前提条件):
        let (participants, messages) = create_test_repositories();
        let usecase = RegisterParticipantUseCase::new(participants.clone(), messages.clone());
        let before = now_millis();

        // when (操作):
        let result = usecase.execute(name("Ana")).await;

        // then (期待する結果):
        let participant = result.unwrap();
        assert_eq!(participant.name, name("Ana"));
        assert!(participant.last_status.value() >= before);

        let stored = participants.find_all().await.unwrap();
        assert_eq!(stored, vec![participant]);

        let log = messages.find_all().await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].from, name("Ana"));
        assert_eq!(log[0].to, Recipient::Everyone);
        assert_eq!(log[0].kind, MessageType::Status);
        assert_eq!(log[0].text.as_str(), JOINED_TEXT);
    }

    #[tokio::test]
    async fn test_register_duplicate_name_conflicts() {
        // テスト項目: 同名の 2 回目の登録は Conflict になり、最初の登録は残る
        // given (前提条件):
        let (participants, messages) = create_test_repositories();
        let usecase = RegisterParticipantUseCase::new(participants.clone(), messages.clone());
        let first = usecase.execute(name("Ana")).await.unwrap();

        // when (操作):
        let result = usecase.execute(name("Ana")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegisterParticipantError::Conflict("Ana".to_string()))
        );
        assert_eq!(participants.find_all().await.unwrap(), vec![first]);
        // 入室メッセージは 1 件のみ
        assert_eq!(messages.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_message_store_failure_keeps_participant() {
        // テスト項目: 入室メッセージの追加に失敗してもロールバックしない
        // given (前提条件):
        let participants = Arc::new(InMemoryParticipantRepository::default());
        let mut messages = MockMessageRepository::new();
        messages
            .expect_append()
            .times(1)
            .returning(|_| Err(RepositoryError::Storage("disk full".to_string())));
        let usecase = RegisterParticipantUseCase::new(participants.clone(), Arc::new(messages));

        // when (操作):
        let result = usecase.execute(name("Ana")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegisterParticipantError::Store(RepositoryError::Storage(
                "disk full".to_string()
            )))
        );
        assert_eq!(participants.find_all().await.unwrap().len(), 1);
    }
}
