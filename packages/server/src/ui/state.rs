//! Server state and connection management.

use std::sync::Arc;

use crate::usecase::{
    JoinSessionUseCase, LeaveSessionUseCase, RelayChatUseCase, RenameSessionUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinSessionUseCase（セッション参加のユースケース）
    pub join_session_usecase: Arc<JoinSessionUseCase>,
    /// LeaveSessionUseCase（セッション退室のユースケース）
    pub leave_session_usecase: Arc<LeaveSessionUseCase>,
    /// RenameSessionUseCase（ニックネーム変更のユースケース）
    pub rename_session_usecase: Arc<RenameSessionUseCase>,
    /// RelayChatUseCase（チャット中継のユースケース）
    pub relay_chat_usecase: Arc<RelayChatUseCase>,
}
