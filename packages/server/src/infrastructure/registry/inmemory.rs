//! InMemory Session Registry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//! Mutex で保護した HashMap をセッション台帳として使用します。
//!
//! ## 設計ノート
//!
//! 台帳（誰が接続しているか）と送信チャンネル（どこへ書くか）は同じ
//! エントリで管理します。ブロードキャストはロックを保持したまま
//! チャンネルへ書き込むため、登録解除が完了したセッションへ送信される
//! ことはありません。スナップショット取得後に登録解除されたターゲットは
//! ログに記録してスキップします。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Nickname, OutboundChannel, PushError, Session, SessionId, SessionRegistry};

/// レジストリが保持するセッション 1 件分のエントリ
struct SessionEntry {
    /// 現在のニックネーム
    nickname: Nickname,
    /// セッションの書き込みループへの送信チャンネル
    sender: OutboundChannel,
}

/// インメモリ Session Registry 実装
///
/// セッション ID からエントリへのマップを保持し、ドメイン層の
/// SessionRegistry trait を実装します（依存性の逆転）。
pub struct InMemorySessionRegistry {
    /// 接続中のセッション
    ///
    /// Key: SessionId
    /// Value: SessionEntry
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
}

impl InMemorySessionRegistry {
    /// 新しい InMemorySessionRegistry を作成
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn register(&self, session: Session, sender: OutboundChannel) {
        let mut sessions = self.sessions.lock().await;
        let session_id = session.id.clone();
        sessions.insert(
            session.id,
            SessionEntry {
                nickname: session.nickname,
                sender,
            },
        );
        tracing::debug!("Session '{}' registered", session_id);
    }

    async fn unregister(&self, session_id: &SessionId) {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(session_id).is_some() {
            tracing::debug!("Session '{}' unregistered", session_id);
        }
    }

    async fn nickname_of(&self, session_id: &SessionId) -> Option<Nickname> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).map(|entry| entry.nickname.clone())
    }

    async fn rename(&self, session_id: &SessionId, new_nickname: Nickname) -> Option<Nickname> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .get_mut(session_id)
            .map(|entry| std::mem::replace(&mut entry.nickname, new_nickname))
    }

    async fn session_ids(&self) -> Vec<SessionId> {
        let sessions = self.sessions.lock().await;
        sessions.keys().cloned().collect()
    }

    async fn push_to(&self, session_id: &SessionId, line: &str) -> Result<(), PushError> {
        let sessions = self.sessions.lock().await;

        if let Some(entry) = sessions.get(session_id) {
            entry
                .sender
                .send(line.to_string())
                .map_err(|e| PushError::SendFailed(e.to_string()))?;
            tracing::debug!("Pushed line to session '{}'", session_id);
            Ok(())
        } else {
            Err(PushError::SessionNotFound(session_id.to_string()))
        }
    }

    async fn broadcast(&self, targets: Vec<SessionId>, line: &str) -> Result<(), PushError> {
        let sessions = self.sessions.lock().await;

        for target in targets {
            if let Some(entry) = sessions.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = entry.sender.send(line.to_string()) {
                    tracing::warn!("Failed to push line to session '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted line to session '{}'", target);
                }
            } else {
                tracing::warn!("Session '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }

    async fn clear(&self) {
        let mut sessions = self.sessions.lock().await;
        let dropped = sessions.len();
        sessions.clear();
        tracing::debug!("Registry cleared, dropped {} sessions", dropped);
    }
}
