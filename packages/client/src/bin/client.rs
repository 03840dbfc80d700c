//! Simple TCP chat client.
//!
//! Connects to a TCP chat server, prints every line it receives, and sends
//! every line entered on stdin. The first line the server sends is the
//! nickname prompt; the first line you type is your nickname.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-client
//! cargo run --bin irori-client -- --host 127.0.0.1 --port 9999
//! ```

use clap::Parser;

use irori_client::session::run_client_session;
use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "TCP chat client with line-oriented protocol", long_about = None)]
struct Args {
    /// Host address of the chat server
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number of the chat server
    #[arg(short = 'p', long, default_value = "9999")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = run_client_session(&args.host, args.port).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
