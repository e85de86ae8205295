//! Simulator error types.
//!
//! [`SimulatorError`] is the central error type for the crate. Transport
//! failures inside the receive loop are logged rather than propagated, so
//! the variants here cover the operations callers invoke directly:
//! connecting, sending, and reading the console.

/// Client-side error enum.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    /// WebSocket transport failure (handshake or frame level).
    #[error("websocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// The connection's receive loop has already ended; the message was
    /// not sent.
    #[error("connection closed")]
    ConnectionClosed,

    /// Console I/O failure while reading operator input.
    #[error("console i/o error: {0}")]
    Io(#[from] std::io::Error),
}
