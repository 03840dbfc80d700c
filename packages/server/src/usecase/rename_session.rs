//! UseCase: ニックネーム変更処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RenameSessionUseCase::execute() メソッド
//! - ニックネーム変更（変更通知、本人への確認、引数なしの拒否）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：変更通知が全セッションに届き、確認は本人だけに届く
//! - 引数なしの /nick が状態を変更しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ニックネーム変更と通知
//! - 正常系：引数なしの /nick（本人への返信のみ）
//! - 異常系：存在しないセッションの変更試行

use std::sync::Arc;

use crate::domain::{Nickname, SessionId, SessionRegistry};

use super::error::RenameError;

/// ニックネーム変更の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// 変更が適用され、全セッションへ通知された
    Renamed { old: Nickname, new: Nickname },
    /// 新しいニックネームが与えられなかったため、状態は変更されない
    MissingNickname,
}

/// ニックネーム変更のユースケース
pub struct RenameSessionUseCase {
    /// SessionRegistry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl RenameSessionUseCase {
    /// 新しい RenameSessionUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// ニックネーム変更を実行
    ///
    /// 新しいニックネームが空の場合は状態を変更せず、本人にだけ
    /// "No new nickname was given." を返す。
    ///
    /// # Arguments
    ///
    /// * `session_id` - 変更を要求したセッションの ID（Domain Model）
    /// * `new_nickname` - `/nick ` の後ろの残余（空もあり得る）
    ///
    /// # Returns
    ///
    /// * `Ok(RenameOutcome)` - 変更の結果
    /// * `Err(RenameError)` - 変更失敗
    pub async fn execute(
        &self,
        session_id: &SessionId,
        new_nickname: &str,
    ) -> Result<RenameOutcome, RenameError> {
        if new_nickname.is_empty() {
            self.registry
                .push_to(session_id, "No new nickname was given.")
                .await
                .map_err(|e| RenameError::ReplyFailed(e.to_string()))?;
            return Ok(RenameOutcome::MissingNickname);
        }

        let new = Nickname::new(new_nickname.to_string());
        let old = self
            .registry
            .rename(session_id, new.clone())
            .await
            .ok_or_else(|| RenameError::SessionNotFound(session_id.clone()))?;

        let targets = self.registry.session_ids().await;
        let notice = format!("{} morphed into {}", old, new);
        if let Err(e) = self.registry.broadcast(targets, &notice).await {
            tracing::warn!("Failed to broadcast rename notice: {}", e);
        }

        let confirmation = format!("Nickname changed successfully to {}", new);
        self.registry
            .push_to(session_id, &confirmation)
            .await
            .map_err(|e| RenameError::ReplyFailed(e.to_string()))?;

        Ok(RenameOutcome::Renamed { old, new })
    }
}
