//! UseCase: セッション参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinSessionUseCase::execute() / broadcast_joined() メソッド
//! - セッションの登録と参加通知のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：参加通知が本人を含む全セッションに届く
//! - レジストリへの登録が正しく行われることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規セッションの参加と通知
//! - エッジケース：空のニックネームでの参加（バリデーションしない仕様）

use std::sync::Arc;

use crate::domain::{Nickname, OutboundChannel, Session, SessionId, SessionRegistry};

/// セッション参加のユースケース
pub struct JoinSessionUseCase {
    /// SessionRegistry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl JoinSessionUseCase {
    /// 新しい JoinSessionUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// セッション参加を実行
    ///
    /// # Arguments
    ///
    /// * `nickname` - クライアントが名乗ったニックネーム（Domain Model）
    /// * `sender` - セッションの書き込みループへの送信チャンネル
    ///
    /// # Returns
    ///
    /// 登録されたセッション（Domain Model）
    pub async fn execute(&self, nickname: Nickname, sender: OutboundChannel) -> Session {
        let session = Session::new(SessionId::generate(), nickname);
        self.registry.register(session.clone(), sender).await;
        session
    }

    /// 参加通知を全セッションにブロードキャスト
    ///
    /// ブロードキャストは台帳全体を対象とするため、本人にも届く。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - 配送を試みたターゲットのリスト（Domain Model）
    /// * `Err(String)` - ブロードキャスト失敗
    pub async fn broadcast_joined(&self, session: &Session) -> Result<Vec<SessionId>, String> {
        let targets = self.registry.session_ids().await;
        let notice = format!("{} joined the chat", session.nickname);
        self.registry
            .broadcast(targets.clone(), &notice)
            .await
            .map_err(|e| e.to_string())?;
        Ok(targets)
    }
}
