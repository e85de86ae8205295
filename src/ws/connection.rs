//! WebSocket connection to a door resource.
//!
//! [`DoorConnection`] owns a background task running the read/write loop
//! for a single connection. Inbound door commands are answered from
//! inside the loop; the operator console sends through a channel on the
//! public handle. Both paths write to the same sink, last write wins.

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::messages::{CommandKind, InboundMessage, OutboundMessage};
use crate::config::SimulatorConfig;
use crate::domain::DoorState;
use crate::error::SimulatorError;

/// Requests the console can enqueue for the connection task.
#[derive(Debug)]
enum OutboundRequest {
    /// Send a door status report.
    Status(DoorState),
    /// Start the close handshake and wind the loop down.
    Close,
}

/// Handle to a live door connection.
///
/// Created by [`DoorConnection::connect`]. The receive loop runs on a
/// spawned task until the server closes, the transport fails, or
/// [`close`](DoorConnection::close) is called.
#[derive(Debug)]
pub struct DoorConnection {
    outbound_tx: mpsc::UnboundedSender<OutboundRequest>,
    task: JoinHandle<()>,
}

impl DoorConnection {
    /// Connects to the configured door resource and spawns the receive
    /// loop.
    ///
    /// On success the initial `CLOSED` announcement is already queued:
    /// it is the first frame the server sees from this client.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::Transport`] if the WebSocket handshake
    /// fails. There is no retry.
    pub async fn connect(config: &SimulatorConfig) -> Result<Self, SimulatorError> {
        let url = config.ws_url();
        let (socket, _response) = connect_async(&url).await?;
        tracing::info!(%url, "connection opened");

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        // Initial announcement, sent before any command can arrive.
        let _ = outbound_tx.send(OutboundRequest::Status(DoorState::Closed));

        let task = tokio::spawn(run_connection(socket, outbound_rx));
        Ok(Self { outbound_tx, task })
    }

    /// Sends a door status report.
    ///
    /// Safe to call from any task; the frame is written by the
    /// connection task. No prior-state check is made: the requested
    /// status is sent unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::ConnectionClosed`] if the receive loop
    /// has already ended.
    pub fn send_status(&self, state: DoorState) -> Result<(), SimulatorError> {
        self.outbound_tx
            .send(OutboundRequest::Status(state))
            .map_err(|_| SimulatorError::ConnectionClosed)
    }

    /// Closes the connection and waits for the receive loop to finish.
    ///
    /// Consumes the handle so the close handshake runs at most once. A
    /// no-op when the loop already ended on its own.
    pub async fn close(self) {
        let _ = self.outbound_tx.send(OutboundRequest::Close);
        let _ = self.task.await;
    }
}

/// Runs the read/write loop for a single door connection.
///
/// - Answers inbound door commands with the matching status report.
/// - Writes status reports queued by the operator console.
/// - Exits on server close, transport error, or a close request.
async fn run_connection(
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
    mut outbound_rx: mpsc::UnboundedReceiver<OutboundRequest>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let connected_at = Utc::now();
    let mut closing = false;

    loop {
        tokio::select! {
            // Incoming frame from the server
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::info!(payload = %text, "received message");
                        if let Some(reply) = handle_text_message(text.as_str()) {
                            let json = serde_json::to_string(&reply).unwrap_or_default();
                            tracing::info!(payload = %json, "sent response");
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        match frame {
                            Some(f) => tracing::info!(
                                code = %f.code,
                                reason = %f.reason,
                                "connection closed by server"
                            ),
                            None => tracing::info!("connection closed by server"),
                        }
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "websocket error");
                        break;
                    }
                    None => break,
                }
            }
            // Status report or close request from the console
            req = outbound_rx.recv(), if !closing => {
                match req {
                    Some(OutboundRequest::Status(state)) => {
                        let msg = OutboundMessage::status(state);
                        let json = serde_json::to_string(&msg).unwrap_or_default();
                        tracing::info!(payload = %json, "sent status");
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    // Close requested, or every send handle dropped.
                    // Start the handshake and keep reading until the
                    // server acknowledges or the stream ends.
                    Some(OutboundRequest::Close) | None => {
                        closing = true;
                        let _ = ws_tx.send(Message::Close(None)).await;
                    }
                }
            }
        }
    }

    let session_secs = (Utc::now() - connected_at).num_seconds();
    tracing::debug!(session_secs, "receive loop ended");
}

/// Handles a text frame from the server, returning the reply to send, if
/// any.
///
/// Non-JSON payloads are logged and dropped. JSON that is not a
/// recognized door command is ignored without comment, as is a door
/// command whose action the simulator does not implement.
fn handle_text_message(text: &str) -> Option<OutboundMessage> {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => {
            tracing::info!(payload = %text, "received non-JSON message");
            return None;
        }
    };

    let Ok(inbound) = serde_json::from_value::<InboundMessage>(value) else {
        return None;
    };

    match inbound {
        InboundMessage::DoorCommand {
            command: CommandKind::Open,
        } => Some(OutboundMessage::status(DoorState::Opened)),
        InboundMessage::DoorCommand {
            command: CommandKind::Close,
        } => Some(OutboundMessage::status(DoorState::Closed)),
        InboundMessage::DoorCommand {
            command: CommandKind::Unknown,
        } => {
            tracing::debug!("ignoring unrecognized door command");
            None
        }
    }
}
