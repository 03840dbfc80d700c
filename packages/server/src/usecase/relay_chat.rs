//! UseCase: チャット中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayChatUseCase::execute() メソッド
//! - チャット 1 行の整形（"<nickname>: <text>"）とブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：送信者を含む全セッションが配送対象になる
//! - 整形した行がそのままレジストリに渡ることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：チャット中継と配送対象の選定
//! - 異常系：登録解除済みセッションからの中継試行

use std::sync::Arc;

use crate::domain::{SessionId, SessionRegistry};

use super::error::RelayError;

/// チャット中継のユースケース
pub struct RelayChatUseCase {
    /// SessionRegistry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl RelayChatUseCase {
    /// 新しい RelayChatUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// チャット 1 行の中継を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 送信者のセッション ID（Domain Model）
    /// * `text` - チャット本文（改行を含まない 1 行）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - 配送を試みたターゲットのリスト（本人を含む全セッション）
    /// * `Err(RelayError)` - 中継失敗
    pub async fn execute(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<Vec<SessionId>, RelayError> {
        let nickname = self
            .registry
            .nickname_of(session_id)
            .await
            .ok_or_else(|| RelayError::SessionNotFound(session_id.clone()))?;

        let targets = self.registry.session_ids().await;
        let line = format!("{}: {}", nickname, text);
        self.registry
            .broadcast(targets.clone(), &line)
            .await
            .map_err(|e| RelayError::BroadcastFailed(e.to_string()))?;

        Ok(targets)
    }
}
