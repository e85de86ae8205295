//! Socket-level integration tests for the door connection.
//!
//! Each test runs an in-process WebSocket server and drives the client
//! against it, asserting on the exact frames that cross the wire.

#![allow(clippy::panic)]

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_test::assert_ok;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{WebSocketStream, accept_async};

use door_simulator::config::SimulatorConfig;
use door_simulator::domain::{DoorId, DoorState};
use door_simulator::ws::DoorConnection;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);
const SILENCE_WINDOW: Duration = Duration::from_millis(300);

const INITIAL_CLOSED: &str = r#"{"type":"door_status","status":"CLOSED"}"#;
const STATUS_OPENED: &str = r#"{"type":"door_status","status":"OPENED"}"#;

/// Starts a one-connection server, connects the client to it, and
/// returns both ends with the handshake completed.
async fn connect_pair() -> (DoorConnection, WebSocketStream<TcpStream>) {
    let listener = assert_ok!(TcpListener::bind("127.0.0.1:0").await);
    let addr = assert_ok!(listener.local_addr());

    let config = SimulatorConfig {
        endpoint: format!("ws://{addr}"),
        door_id: DoorId::new(),
        menu_interval_secs: 5,
    };

    let (client, server) = tokio::join!(DoorConnection::connect(&config), async {
        let (stream, _) = listener.accept().await.ok()?;
        accept_async(stream).await.ok()
    });

    let client = assert_ok!(client);
    let Some(server) = server else {
        panic!("server-side handshake failed");
    };
    (client, server)
}

/// Reads the next text frame from the server side.
async fn recv_text(server: &mut WebSocketStream<TcpStream>) -> String {
    let frame = timeout(RECV_TIMEOUT, server.next()).await;
    let Ok(Some(Ok(Message::Text(text)))) = frame else {
        panic!("expected text frame, got {frame:?}");
    };
    text.as_str().to_string()
}

/// Asserts that no frame arrives within the silence window.
async fn expect_silence(server: &mut WebSocketStream<TcpStream>) {
    if let Ok(frame) = timeout(SILENCE_WINDOW, server.next()).await {
        panic!("expected no frame, got {frame:?}");
    }
}

/// Closes the client while draining the server side of the handshake.
/// Returns whether the server saw a close frame from the client.
async fn close_both(client: DoorConnection, mut server: WebSocketStream<TcpStream>) -> bool {
    let ((), saw_close) = tokio::join!(client.close(), async move {
        let mut saw_close = false;
        while let Some(Ok(frame)) = server.next().await {
            if matches!(frame, Message::Close(_)) {
                saw_close = true;
            }
        }
        saw_close
    });
    saw_close
}

#[tokio::test]
async fn initial_handshake_announces_closed_exactly_once() {
    let (client, mut server) = connect_pair().await;

    assert_eq!(recv_text(&mut server).await, INITIAL_CLOSED);
    expect_silence(&mut server).await;

    close_both(client, server).await;
}

#[tokio::test]
async fn open_command_round_trip() {
    let (client, mut server) = connect_pair().await;
    assert_eq!(recv_text(&mut server).await, INITIAL_CLOSED);

    assert_ok!(
        server
            .send(Message::text(
                r#"{"type":"door_command","command":"open"}"#
            ))
            .await
    );

    assert_eq!(recv_text(&mut server).await, STATUS_OPENED);
    expect_silence(&mut server).await;

    close_both(client, server).await;
}

#[tokio::test]
async fn close_command_round_trip() {
    let (client, mut server) = connect_pair().await;
    assert_eq!(recv_text(&mut server).await, INITIAL_CLOSED);

    assert_ok!(
        server
            .send(Message::text(
                r#"{"type":"door_command","command":"close"}"#
            ))
            .await
    );

    assert_eq!(recv_text(&mut server).await, INITIAL_CLOSED);

    close_both(client, server).await;
}

#[tokio::test]
async fn unknown_command_is_ignored() {
    let (client, mut server) = connect_pair().await;
    assert_eq!(recv_text(&mut server).await, INITIAL_CLOSED);

    assert_ok!(
        server
            .send(Message::text(r#"{"type":"door_command","command":"jam"}"#))
            .await
    );

    expect_silence(&mut server).await;

    close_both(client, server).await;
}

#[tokio::test]
async fn malformed_payload_is_tolerated() {
    let (client, mut server) = connect_pair().await;
    assert_eq!(recv_text(&mut server).await, INITIAL_CLOSED);

    assert_ok!(server.send(Message::text("hello")).await);
    expect_silence(&mut server).await;

    // The handler survived; a real command still gets answered.
    assert_ok!(
        server
            .send(Message::text(
                r#"{"type":"door_command","command":"open"}"#
            ))
            .await
    );
    assert_eq!(recv_text(&mut server).await, STATUS_OPENED);

    close_both(client, server).await;
}

#[tokio::test]
async fn operator_send_is_received_verbatim() {
    let (client, mut server) = connect_pair().await;
    assert_eq!(recv_text(&mut server).await, INITIAL_CLOSED);

    assert_ok!(client.send_status(DoorState::Opened));
    assert_eq!(recv_text(&mut server).await, STATUS_OPENED);

    // Repeated identical statuses are permitted: no transition guard.
    assert_ok!(client.send_status(DoorState::Opened));
    assert_eq!(recv_text(&mut server).await, STATUS_OPENED);

    let saw_close = close_both(client, server).await;
    assert!(saw_close, "server never saw a close frame");
}

#[tokio::test]
async fn send_after_server_close_fails() {
    let (client, mut server) = connect_pair().await;
    assert_eq!(recv_text(&mut server).await, INITIAL_CLOSED);

    assert_ok!(server.close(None).await);
    while let Some(Ok(_)) = server.next().await {}

    // The receive loop winds down shortly after the server closes.
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    loop {
        if client.send_status(DoorState::Opened).is_err() {
            break;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("receive loop did not end after server close");
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    client.close().await;
}
