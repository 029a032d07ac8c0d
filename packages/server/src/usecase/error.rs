//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// 参加者登録のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterParticipantError {
    /// 同名の参加者が既に存在する
    #[error("participant '{0}' already exists")]
    Conflict(String),

    #[error(transparent)]
    Store(RepositoryError),
}

/// 参加者一覧取得のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListParticipantsError {
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// ハートビートのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeartbeatError {
    /// 未登録の参加者
    #[error("participant '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Store(RepositoryError),
}

/// メッセージ投稿のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// 入力値が不正
    #[error(transparent)]
    Validation(#[from] ValueObjectError),

    /// 送信者が現在登録されていない
    #[error("sender '{0}' is not a registered participant")]
    SenderNotFound(String),

    #[error(transparent)]
    Store(RepositoryError),
}

/// メッセージ一覧取得のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListMessagesError {
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// 期限切れ参加者の掃除・一括リセットのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpireParticipantsError {
    #[error(transparent)]
    Store(#[from] RepositoryError),
}
