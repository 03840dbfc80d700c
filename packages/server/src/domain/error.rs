//! ドメイン層のエラー型

use thiserror::Error;

/// セッションへのメッセージ送信エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushError {
    /// 対象のセッションがレジストリに存在しない
    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    /// 送信チャンネルへの書き込みに失敗した
    #[error("Failed to push message: {0}")]
    SendFailed(String),
}
