//! SessionRegistry trait 定義
//!
//! ドメイン層が必要とするセッション管理のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{Nickname, PushError, Session, SessionId};

/// セッションの送信チャンネル
///
/// レジストリが保持する、各セッションの書き込みループへの入口。
pub type OutboundChannel = mpsc::UnboundedSender<String>;

/// Session Registry trait
///
/// 接続中のセッション集合への操作をドメイン層自身が定義する。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## ブロードキャストの契約
///
/// `broadcast` は渡されたターゲットそれぞれへ独立にベストエフォートで送信する。
/// 一部のターゲットへの送信失敗は他のターゲットへの配送を妨げず、
/// レジストリ内でログに記録して握りつぶされる。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// セッションを登録し、送信チャンネルを紐付ける
    async fn register(&self, session: Session, sender: OutboundChannel);

    /// セッションを登録解除する（存在しない場合は何もしない）
    async fn unregister(&self, session_id: &SessionId);

    /// セッションの現在のニックネームを取得
    async fn nickname_of(&self, session_id: &SessionId) -> Option<Nickname>;

    /// ニックネームを置き換え、置き換え前のニックネームを返す
    async fn rename(&self, session_id: &SessionId, new_nickname: Nickname) -> Option<Nickname>;

    /// 接続中の全てのセッション ID を取得
    async fn session_ids(&self) -> Vec<SessionId>;

    /// 特定のセッションへ 1 行送信
    async fn push_to(&self, session_id: &SessionId, line: &str) -> Result<(), PushError>;

    /// ターゲットの各セッションへ 1 行送信（ベストエフォート）
    async fn broadcast(&self, targets: Vec<SessionId>, line: &str) -> Result<(), PushError>;

    /// 接続中のセッション数を取得
    async fn count(&self) -> usize;

    /// 全セッションを登録解除し、送信チャンネルを破棄する
    async fn clear(&self);
}
