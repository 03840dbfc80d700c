//! UseCase 層
//!
//! セッションのライフサイクル（参加・退室・ニックネーム変更）と
//! チャット中継のビジネスロジックを提供します。

mod error;
mod join_session;
mod leave_session;
mod relay_chat;
mod rename_session;

pub use error::{LeaveError, RelayError, RenameError};
pub use join_session::JoinSessionUseCase;
pub use leave_session::LeaveSessionUseCase;
pub use relay_chat::RelayChatUseCase;
pub use rename_session::{RenameOutcome, RenameSessionUseCase};
