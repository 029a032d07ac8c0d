//! Repository trait 定義（ストアアダプタの抽象化）
//!
//! UseCase 層はこの trait にのみ依存し、具体的な実装（インメモリ等）は
//! Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, Participant},
    error::RepositoryError,
    value_object::{ParticipantName, Timestamp},
};

/// `participants` コレクションへのアクセス
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// 同名の参加者が存在しなければ追加する（アトミックな条件付き書き込み）
    ///
    /// 既に存在する場合は `RepositoryError::AlreadyExists` を返す。
    async fn insert_if_absent(&self, participant: Participant) -> Result<(), RepositoryError>;

    /// 全参加者を挿入順で取得
    async fn find_all(&self) -> Result<Vec<Participant>, RepositoryError>;

    /// 名前で参加者を取得
    async fn find_by_name(
        &self,
        name: &ParticipantName,
    ) -> Result<Option<Participant>, RepositoryError>;

    /// `last_status` を更新し、更新後の参加者を返す
    ///
    /// 存在しない場合は `RepositoryError::NotFound` を返す。
    async fn touch(
        &self,
        name: &ParticipantName,
        at: Timestamp,
    ) -> Result<Participant, RepositoryError>;

    /// `last_status < cutoff` の参加者を取得
    async fn find_inactive_since(
        &self,
        cutoff: Timestamp,
    ) -> Result<Vec<Participant>, RepositoryError>;

    /// 参加者が存在し、かつ `last_status < cutoff` の場合のみ削除する
    ///
    /// 削除した場合は `true`、既に削除済み・直前にハートビートがあった場合は `false`。
    async fn remove_if_inactive(
        &self,
        name: &ParticipantName,
        cutoff: Timestamp,
    ) -> Result<bool, RepositoryError>;

    /// 全参加者を削除し、削除件数を返す
    async fn clear(&self) -> Result<usize, RepositoryError>;
}

/// `messages` コレクションへのアクセス
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// メッセージを末尾に追加
    async fn append(&self, message: ChatMessage) -> Result<(), RepositoryError>;

    /// `viewer` から見えるメッセージを挿入順で取得
    async fn find_visible_to(
        &self,
        viewer: Option<ParticipantName>,
    ) -> Result<Vec<ChatMessage>, RepositoryError>;

    /// 全メッセージ（status を含む）を挿入順で取得
    async fn find_all(&self) -> Result<Vec<ChatMessage>, RepositoryError>;
}
