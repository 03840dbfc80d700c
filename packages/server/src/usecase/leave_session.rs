//! UseCase: セッション退室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveSessionUseCase::quit() / disconnect() メソッド
//! - 明示的な退室（/quit）と静かな切断（EOF / IO エラー）の処理
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：/quit だけが退室通知を伴うという非対称性
//! - レジストリから正しく削除されることを確認
//! - 二重削除の冪等性を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：/quit による退室と通知
//! - 正常系：静かな切断（通知なし）
//! - 異常系：存在しないセッションの /quit
//! - エッジケース：二重切断

use std::sync::Arc;

use crate::domain::{SessionId, SessionRegistry};

use super::error::LeaveError;

/// セッション退室のユースケース
pub struct LeaveSessionUseCase {
    /// SessionRegistry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl LeaveSessionUseCase {
    /// 新しい LeaveSessionUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 明示的な /quit による退室を実行
    ///
    /// 退室通知をブロードキャストしてからセッションを登録解除する。
    /// 通知の時点では本人もまだ台帳に残っているため、スナップショットには
    /// 本人も含まれる。
    ///
    /// # Arguments
    ///
    /// * `session_id` - 退室するセッションの ID（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - 配送を試みたターゲットのリスト（Domain Model）
    /// * `Err(LeaveError)` - セッションが存在しない
    pub async fn quit(&self, session_id: &SessionId) -> Result<Vec<SessionId>, LeaveError> {
        let nickname = self
            .registry
            .nickname_of(session_id)
            .await
            .ok_or_else(|| LeaveError::SessionNotFound(session_id.clone()))?;

        let targets = self.registry.session_ids().await;
        let notice = format!("{}, left the chat :(", nickname);
        if let Err(e) = self.registry.broadcast(targets.clone(), &notice).await {
            tracing::warn!("Failed to broadcast departure notice: {}", e);
        }

        self.registry.unregister(session_id).await;

        Ok(targets)
    }

    /// 静かな切断（EOF / IO エラー）による退室を実行
    ///
    /// 退室通知は送らない。明示的な /quit だけが通知を伴うという非対称性は
    /// プロトコルの仕様。既に登録解除済みの場合は何もしない（冪等）。
    pub async fn disconnect(&self, session_id: &SessionId) {
        self.registry.unregister(session_id).await;
    }
}
