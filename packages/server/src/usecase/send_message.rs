//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者の在室確認とメッセージログへの追加
//!
//! ### なぜこのテストが必要か
//! - 未登録の送信者からのメッセージはログに残してはならない
//! - サーバー側で付与する時刻・ID が正しく設定されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：公開メッセージ・非公開メッセージの送信
//! - 異常系：未登録の送信者、status 型の指定、ストア障害

use std::sync::Arc;

use roomchat_shared::time::now_millis;

use crate::domain::{
    ChatMessage, MessageIdFactory, MessageRepository, MessageText, MessageType, ParticipantName,
    ParticipantRepository, Recipient, Timestamp, ValueObjectError,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            participants,
            messages,
        }
    }

    /// メッセージ送信を実行
    ///
    /// 宛先の参加者が現在在室しているかは確認しません。
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者（現在登録されている参加者であること）
    /// * `to` - 宛先
    /// * `text` - 本文
    /// * `kind` - `message` または `private_message`
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - ログに追加されたメッセージ
    /// * `Err(SendMessageError)` - 送信失敗（ログは変化しない）
    pub async fn execute(
        &self,
        from: ParticipantName,
        to: Recipient,
        text: MessageText,
        kind: MessageType,
    ) -> Result<ChatMessage, SendMessageError> {
        // 1. status はサーバーのみが生成する
        if kind == MessageType::Status {
            return Err(ValueObjectError::MessageTypeInvalid(kind.to_string()).into());
        }

        // 2. 送信者の在室確認
        let sender = self
            .participants
            .find_by_name(&from)
            .await
            .map_err(SendMessageError::Store)?;
        if sender.is_none() {
            return Err(SendMessageError::SenderNotFound(from.into_string()));
        }

        // 3. メッセージログに追加
        let message = ChatMessage::new(
            MessageIdFactory::generate(),
            from,
            to,
            text,
            kind,
            Timestamp::new(now_millis()),
        );
        self.messages
            .append(message.clone())
            .await
            .map_err(SendMessageError::Store)?;

        Ok(message)
    }
}
