//! Simple TCP chat server with broadcast functionality.
//!
//! Receives lines from clients and broadcasts them to all connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-server
//! cargo run --bin irori-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use irori_server::{
    domain::SessionRegistry,
    infrastructure::InMemorySessionRegistry,
    ui::Server,
    usecase::{JoinSessionUseCase, LeaveSessionUseCase, RelayChatUseCase, RenameSessionUseCase},
};
use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "TCP chat server with broadcast support", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "9999")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. SessionRegistry
    // 2. UseCases
    // 3. Server

    // 1. Create SessionRegistry (in-memory session ledger)
    let registry: Arc<dyn SessionRegistry> = Arc::new(InMemorySessionRegistry::new());

    // 2. Create UseCases
    let join_session_usecase = Arc::new(JoinSessionUseCase::new(registry.clone()));
    let leave_session_usecase = Arc::new(LeaveSessionUseCase::new(registry.clone()));
    let rename_session_usecase = Arc::new(RenameSessionUseCase::new(registry.clone()));
    let relay_chat_usecase = Arc::new(RelayChatUseCase::new(registry.clone()));

    // 3. Create and run the server
    let server = Server::new(
        registry,
        join_session_usecase,
        leave_session_usecase,
        rename_session_usecase,
        relay_chat_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
