//! ドメインモデル: セッション
//!
//! 接続中のクライアント 1 つ分の識別子とニックネームを定義します。

use std::fmt;

use uuid::Uuid;

/// セッション ID
///
/// 接続ごとに生成される一意な識別子。ニックネームは変更可能かつ重複し得る
/// ため、レジストリのキーには必ずこちらを使う。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// 新しいセッション ID を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ニックネーム
///
/// クライアントが接続直後に送った 1 行目をそのまま保持する。空文字列も
/// 重複もバリデーションせずに受け入れる（プロトコル仕様どおり）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nickname(String);

impl Nickname {
    /// 新しいニックネームを作成
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// 文字列表現を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// セッション
///
/// 接続 1 本分の識別子と現在のニックネーム。接続ハンドル自体は UI 層が
/// 所有し、レジストリは送信チャンネル経由で参照するだけ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub nickname: Nickname,
}

impl Session {
    /// 新しいセッションを作成
    pub fn new(id: SessionId, nickname: Nickname) -> Self {
        Self { id, nickname }
    }
}
