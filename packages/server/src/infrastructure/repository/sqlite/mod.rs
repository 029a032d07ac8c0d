//! SQLite 実装
//!
//! `participants` / `messages` の 2 テーブルを sqlx の接続プール経由で扱います。
//! 条件付き書き込み・削除は 1 文で行うため、インメモリ実装と同じく
//! 同名の同時登録やハートビートとの競合は発生しません。

mod message;
mod participant;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::domain::RepositoryError;

pub use message::SqliteMessageRepository;
pub use participant::SqliteParticipantRepository;

const MAX_CONNECTIONS: u32 = 4;

/// 接続プールを作成する（接続は最初の利用時まで遅延）
///
/// URL が不正な場合のみエラーを返します。`sqlite::memory:` の場合は
/// プールが単一の接続を保持し続けるよう設定します（接続ごとに別 DB になるため）。
pub fn connect_lazy(database_url: &str) -> Result<SqlitePool, RepositoryError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(storage_error)?
        .create_if_missing(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };
    Ok(pool.connect_lazy_with(options))
}

/// テーブルが無ければ作成する
pub async fn init_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS participants (
            name TEXT PRIMARY KEY NOT NULL,
            last_status INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(storage_error)?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS messages (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            from_name TEXT NOT NULL,
            to_name TEXT NOT NULL,
            text TEXT NOT NULL,
            kind TEXT NOT NULL,
            sent_at INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(storage_error)?;

    Ok(())
}

fn storage_error(error: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(error.to_string())
}

/// 保存済みの行がドメインの値として復元できない場合のエラー
fn corrupt_row(table: &str, detail: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Storage(format!("invalid row in {table}: {detail}"))
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = connect_lazy("sqlite::memory:").unwrap();
    init_schema(&pool).await.unwrap();
    pool
}
