//! Server execution logic.

use std::{future::Future, sync::Arc};

use tokio::net::TcpListener;

use crate::{
    domain::SessionRegistry,
    usecase::{JoinSessionUseCase, LeaveSessionUseCase, RelayChatUseCase, RenameSessionUseCase},
};

use super::{handler::handle_connection, signal::shutdown_signal, state::AppState};

/// TCP chat server
///
/// This struct encapsulates the server configuration and provides methods to
/// run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     registry,
///     join_session_usecase,
///     leave_session_usecase,
///     rename_session_usecase,
///     relay_chat_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 9999).await?;
/// ```
pub struct Server {
    /// SessionRegistry（シャットダウン時の一斉解放に使用）
    registry: Arc<dyn SessionRegistry>,
    /// JoinSessionUseCase（セッション参加のユースケース）
    join_session_usecase: Arc<JoinSessionUseCase>,
    /// LeaveSessionUseCase（セッション退室のユースケース）
    leave_session_usecase: Arc<LeaveSessionUseCase>,
    /// RenameSessionUseCase（ニックネーム変更のユースケース）
    rename_session_usecase: Arc<RenameSessionUseCase>,
    /// RelayChatUseCase（チャット中継のユースケース）
    relay_chat_usecase: Arc<RelayChatUseCase>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `registry` - Session registry shared with the usecases
    /// * `join_session_usecase` - UseCase for session join
    /// * `leave_session_usecase` - UseCase for session leave
    /// * `rename_session_usecase` - UseCase for nickname change
    /// * `relay_chat_usecase` - UseCase for chat relay
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        join_session_usecase: Arc<JoinSessionUseCase>,
        leave_session_usecase: Arc<LeaveSessionUseCase>,
        rename_session_usecase: Arc<RenameSessionUseCase>,
        relay_chat_usecase: Arc<RelayChatUseCase>,
    ) -> Self {
        Self {
            registry,
            join_session_usecase,
            leave_session_usecase,
            rename_session_usecase,
            relay_chat_usecase,
        }
    }

    /// Run the TCP chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 9999)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("TCP chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect with: irori-client --host {} --port {}", host, port);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        self.serve(listener, shutdown_signal()).await;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Accept connections until the shutdown future resolves, then tear down
    /// every registered session.
    ///
    /// The accept loop runs inside `select!` with the shutdown future, so an
    /// intentional shutdown exits through that branch before any accept error
    /// can be observed. Every accept error that is observed is therefore a
    /// genuine fault and fails fast into the same teardown path.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let state = Arc::new(AppState {
            join_session_usecase: self.join_session_usecase,
            leave_session_usecase: self.leave_session_usecase,
            rename_session_usecase: self.rename_session_usecase,
            relay_chat_usecase: self.relay_chat_usecase,
        });

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, closing listener");
                    break;
                }
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            tracing::info!("Accepted connection from {}", peer);
                            let state = state.clone();
                            tokio::spawn(async move {
                                handle_connection(stream, peer, state).await;
                            });
                        }
                        Err(e) => {
                            tracing::error!("Failed to accept connection: {}", e);
                            break;
                        }
                    }
                }
            }
        }

        // Close the listening endpoint before tearing down sessions
        drop(listener);

        let active = self.registry.count().await;
        if active > 0 {
            tracing::info!("Shutting down {} active sessions", active);
        }
        self.registry.clear().await;
    }
}
