//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::SessionId;

/// 退室処理のエラー型
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeaveError {
    /// セッションがレジストリに存在しない
    #[error("Session '{0}' is not registered")]
    SessionNotFound(SessionId),
}

/// ニックネーム変更処理のエラー型
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenameError {
    /// セッションがレジストリに存在しない
    #[error("Session '{0}' is not registered")]
    SessionNotFound(SessionId),

    /// 本人への返信に失敗した
    #[error("Failed to reply to session: {0}")]
    ReplyFailed(String),
}

/// チャット中継処理のエラー型
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    /// セッションがレジストリに存在しない
    #[error("Session '{0}' is not registered")]
    SessionNotFound(SessionId),

    /// ブロードキャストに失敗した
    #[error("Failed to broadcast chat line: {0}")]
    BroadcastFailed(String),
}
