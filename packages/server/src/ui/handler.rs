//! TCP connection handlers.

use std::{net::SocketAddr, sync::Arc};

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpStream, tcp::OwnedWriteHalf},
    sync::mpsc,
};

use crate::{
    domain::{Command, Nickname},
    usecase::RenameOutcome,
};

use super::state::AppState;

/// The first line written on every new connection.
const NICKNAME_PROMPT: &str = "Enter your nickname: ";

/// Drive one client connection from accept to teardown.
///
/// Prompts for a nickname, registers the session, announces it, then splits
/// into a read task (inbound lines) and a write task (outbound lines) tied
/// together with `select!`. Whichever side finishes first aborts the other,
/// after which the session is removed from the registry if it still is there.
pub async fn handle_connection(stream: TcpStream, peer: SocketAddr, state: Arc<AppState>) {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    // Prompt for a nickname and block-read exactly one line as the answer
    if let Err(e) = write_half
        .write_all(format!("{}\n", NICKNAME_PROMPT).as_bytes())
        .await
    {
        tracing::warn!("Failed to send nickname prompt to {}: {}", peer, e);
        return;
    }
    let nickname = match lines.next_line().await {
        Ok(Some(line)) => Nickname::new(line),
        Ok(None) => {
            tracing::info!("{} disconnected before sending a nickname", peer);
            return;
        }
        Err(e) => {
            tracing::warn!("Failed to read nickname from {}: {}", peer, e);
            return;
        }
    };

    // Create a channel for this session to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Register the session and announce it to everyone (including itself)
    let session = state.join_session_usecase.execute(nickname, tx).await;
    tracing::info!("'{}' connected as session {}", session.nickname, session.id);
    if let Err(e) = state.join_session_usecase.broadcast_joined(&session).await {
        tracing::warn!("Failed to broadcast join notice: {}", e);
    }

    // Spawn a task to receive messages from other sessions and write them out
    let mut send_task = pusher_loop(rx, write_half);

    // Spawn a task to read lines from this client
    let session_id = session.id.clone();
    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                // EOF is a silent disconnect: no departure notice goes out
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Read error on session {}: {}", session_id, e);
                    break;
                }
            };

            match Command::parse(&line) {
                Command::Nick(new_nickname) => {
                    match state_clone
                        .rename_session_usecase
                        .execute(&session_id, new_nickname)
                        .await
                    {
                        Ok(RenameOutcome::Renamed { old, new }) => {
                            tracing::info!("'{}' so forth will be known as '{}'", old, new);
                        }
                        Ok(RenameOutcome::MissingNickname) => {
                            tracing::debug!("Session {} sent /nick without a name", session_id);
                        }
                        Err(e) => {
                            tracing::warn!("Failed to rename session {}: {}", session_id, e);
                        }
                    }
                }
                Command::Quit => {
                    match state_clone.leave_session_usecase.quit(&session_id).await {
                        Ok(_) => tracing::info!("Session {} quit", session_id),
                        Err(e) => {
                            tracing::warn!("Failed to quit session {}: {}", session_id, e);
                        }
                    }
                    break;
                }
                Command::Chat(text) => {
                    if let Err(e) = state_clone
                        .relay_chat_usecase
                        .execute(&session_id, text)
                        .await
                    {
                        tracing::warn!("Failed to relay chat from session {}: {}", session_id, e);
                    }
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Remove the session if it is still registered. After /quit or a server
    // shutdown this is a no-op.
    state.leave_session_usecase.disconnect(&session.id).await;
    tracing::info!("Connection from {} closed (session {})", peer, session.id);
}

/// Spawns a task that receives messages from the rx channel and writes them
/// to the connection as newline-terminated lines.
///
/// This function handles the outbound message flow: messages from other
/// sessions (via rx channel) are written to this client's connection. The
/// task ends when every sender is dropped, which is how registry removal and
/// server shutdown tear the write path down.
///
/// # Arguments
///
/// * `rx` - Channel receiver for messages from other sessions
/// * `write_half` - Write side of this client's connection
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut write_half: OwnedWriteHalf,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            // Send the line to this client
            if write_half
                .write_all(format!("{}\n", line).as_bytes())
                .await
                .is_err()
            {
                break;
            }
        }
    })
}
