//! Integration tests for the TCP chat server using in-process sockets.
//!
//! Each test starts a real server on an ephemeral port, drives it with raw
//! `TcpStream` clients speaking the line protocol, and asserts on the exact
//! lines the protocol promises.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines},
    net::{
        TcpListener, TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::oneshot,
    task::JoinHandle,
    time::timeout,
};

use irori_server::{
    domain::SessionRegistry,
    infrastructure::InMemorySessionRegistry,
    ui::Server,
    usecase::{JoinSessionUseCase, LeaveSessionUseCase, RelayChatUseCase, RenameSessionUseCase},
};

const RECV_TIMEOUT: Duration = Duration::from_secs(1);

/// Helper struct to manage the server lifecycle within the test process
struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server on an ephemeral port
    async fn start() -> Self {
        let registry: Arc<dyn SessionRegistry> = Arc::new(InMemorySessionRegistry::new());
        let server = Server::new(
            registry.clone(),
            Arc::new(JoinSessionUseCase::new(registry.clone())),
            Arc::new(LeaveSessionUseCase::new(registry.clone())),
            Arc::new(RenameSessionUseCase::new(registry.clone())),
            Arc::new(RelayChatUseCase::new(registry.clone())),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            server
                .serve(listener, async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        TestServer {
            addr,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    /// Trigger a graceful shutdown and wait for the server task to finish
    async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        timeout(RECV_TIMEOUT, self.handle)
            .await
            .expect("Server did not shut down in time")
            .expect("Server task panicked");
    }
}

/// Helper struct driving one raw protocol client
struct TestClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    /// Connect without answering the nickname prompt
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr)
            .await
            .expect("Failed to connect to test server");
        let (read_half, writer) = stream.into_split();
        TestClient {
            lines: BufReader::new(read_half).lines(),
            writer,
        }
    }

    /// Connect and answer the nickname prompt
    async fn join(addr: SocketAddr, nickname: &str) -> Self {
        let mut client = Self::connect(addr).await;
        assert_eq!(client.recv().await, "Enter your nickname: ");
        client.send(nickname).await;
        client
    }

    /// Send one line to the server
    async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{}\n", line).as_bytes())
            .await
            .expect("Failed to send line");
    }

    /// Receive one line from the server, with a timeout
    async fn recv(&mut self) -> String {
        timeout(RECV_TIMEOUT, self.lines.next_line())
            .await
            .expect("Timed out waiting for a line")
            .expect("Read error")
            .expect("Connection closed unexpectedly")
    }

    /// Drain lines until the server closes this connection
    async fn recv_until_closed(&mut self) {
        loop {
            match timeout(RECV_TIMEOUT, self.lines.next_line())
                .await
                .expect("Timed out waiting for the connection to close")
            {
                Ok(Some(_)) => continue,
                Ok(None) | Err(_) => break,
            }
        }
    }
}

#[tokio::test]
async fn test_nickname_prompt_is_sent_first() {
    // テスト項目: 接続直後の最初の行はニックネームのプロンプトである
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let mut client = TestClient::connect(server.addr).await;

    // then (期待する結果):
    assert_eq!(client.recv().await, "Enter your nickname: ");

    server.shutdown().await;
}

#[tokio::test]
async fn test_join_notice_reaches_all_sessions_including_self() {
    // テスト項目: 参加通知が既存セッションと本人の両方に届く
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作): alice, bob の順に参加する
    let mut alice = TestClient::join(server.addr, "alice").await;
    assert_eq!(alice.recv().await, "alice joined the chat");

    let mut bob = TestClient::join(server.addr, "bob").await;

    // then (期待する結果): 両方に bob の参加通知が届く
    assert_eq!(alice.recv().await, "bob joined the chat");
    assert_eq!(bob.recv().await, "bob joined the chat");

    server.shutdown().await;
}

#[tokio::test]
async fn test_chat_is_relayed_verbatim_to_all_sessions() {
    // テスト項目: チャット行が "<nickname>: <line>" として全員（本人を含む）に届く
    // given (前提条件): x と y が参加済みで、参加通知を消化している
    let server = TestServer::start().await;
    let mut a = TestClient::join(server.addr, "x").await;
    assert_eq!(a.recv().await, "x joined the chat");
    let mut b = TestClient::join(server.addr, "y").await;
    assert_eq!(a.recv().await, "y joined the chat");
    assert_eq!(b.recv().await, "y joined the chat");

    // when (操作): A が hello を送る
    a.send("hello").await;

    // then (期待する結果):
    assert_eq!(b.recv().await, "x: hello");
    assert_eq!(a.recv().await, "x: hello");

    server.shutdown().await;
}

#[tokio::test]
async fn test_rename_flow() {
    // テスト項目: /nick は変更通知を全員に、確認を本人にだけ届け、以降の発言は新しい名前になる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::join(server.addr, "alice").await;
    assert_eq!(alice.recv().await, "alice joined the chat");
    let mut bob = TestClient::join(server.addr, "bob").await;
    assert_eq!(alice.recv().await, "bob joined the chat");
    assert_eq!(bob.recv().await, "bob joined the chat");

    // when (操作): alice が bob2 に改名する
    alice.send("/nick bob2").await;

    // then (期待する結果):
    assert_eq!(bob.recv().await, "alice morphed into bob2");
    assert_eq!(alice.recv().await, "alice morphed into bob2");
    assert_eq!(alice.recv().await, "Nickname changed successfully to bob2");

    // 以降の発言は新しい名前で中継される
    alice.send("hi").await;
    assert_eq!(bob.recv().await, "bob2: hi");

    server.shutdown().await;
}

#[tokio::test]
async fn test_rename_without_name_changes_nothing() {
    // テスト項目: 引数なしの /nick は本人への返信だけで、状態もブロードキャストもない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::join(server.addr, "alice").await;
    assert_eq!(alice.recv().await, "alice joined the chat");
    let mut bob = TestClient::join(server.addr, "bob").await;
    assert_eq!(alice.recv().await, "bob joined the chat");
    assert_eq!(bob.recv().await, "bob joined the chat");

    // when (操作): 引数なしとスペースだけの /nick を送る
    alice.send("/nick").await;
    assert_eq!(alice.recv().await, "No new nickname was given.");
    alice.send("/nick ").await;
    assert_eq!(alice.recv().await, "No new nickname was given.");

    // then (期待する結果): ニックネームは変わらず、bob には何も届いていない
    alice.send("ping").await;
    assert_eq!(bob.recv().await, "alice: ping");

    server.shutdown().await;
}

#[tokio::test]
async fn test_quit_broadcasts_departure_and_closes_connection() {
    // テスト項目: /quit は退室通知を残りのセッションに届け、本人の接続を閉じる
    // given (前提条件): x と y が参加済み
    let server = TestServer::start().await;
    let mut a = TestClient::join(server.addr, "x").await;
    assert_eq!(a.recv().await, "x joined the chat");
    let mut b = TestClient::join(server.addr, "y").await;
    assert_eq!(a.recv().await, "y joined the chat");
    assert_eq!(b.recv().await, "y joined the chat");

    a.send("hello").await;
    assert_eq!(b.recv().await, "x: hello");
    assert_eq!(a.recv().await, "x: hello");

    // when (操作): B が /quit する
    b.send("/quit").await;

    // then (期待する結果): A に退室通知が届き、B の接続は閉じる
    assert_eq!(a.recv().await, "y, left the chat :(");
    b.recv_until_closed().await;

    // 以降のブロードキャストは B に届かない（A だけが配送対象になる）
    a.send("anyone?").await;
    assert_eq!(a.recv().await, "x: anyone?");

    server.shutdown().await;
}

#[tokio::test]
async fn test_silent_disconnect_sends_no_departure_notice() {
    // テスト項目: EOF による切断は退室通知を送らない（/quit との非対称性）
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::join(server.addr, "alice").await;
    assert_eq!(alice.recv().await, "alice joined the chat");
    let bob = TestClient::join(server.addr, "bob").await;
    assert_eq!(alice.recv().await, "bob joined the chat");

    // when (操作): bob の接続を黙って閉じる
    drop(bob);
    tokio::time::sleep(Duration::from_millis(100)).await;

    // then (期待する結果): alice が次に受け取る行は自分のチャットで、退室通知ではない
    alice.send("still here").await;
    assert_eq!(alice.recv().await, "alice: still here");

    server.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_closes_client_connections() {
    // テスト項目: サーバーのシャットダウンで接続中のクライアントの読み取りが解除される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::join(server.addr, "alice").await;
    assert_eq!(alice.recv().await, "alice joined the chat");

    // when (操作):
    server.shutdown().await;

    // then (期待する結果): alice の接続は閉じられる
    alice.recv_until_closed().await;
}

#[tokio::test]
async fn test_empty_nickname_is_accepted_as_is() {
    // テスト項目: 空のニックネームもバリデーションされずに受け入れられる
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作): 空行をニックネームとして送る
    let mut client = TestClient::join(server.addr, "").await;

    // then (期待する結果): 通知もチャットも空の名前のまま組み立てられる
    assert_eq!(client.recv().await, " joined the chat");
    client.send("hi").await;
    assert_eq!(client.recv().await, ": hi");

    server.shutdown().await;
}
