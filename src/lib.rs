//! # door-simulator
//!
//! WebSocket test client that simulates a door-access device.
//!
//! The simulator connects to a door resource endpoint, announces an initial
//! `CLOSED` status, and from then on answers inbound open/close commands
//! with the matching status report. A terminal menu lets an operator inject
//! status messages by hand, independent of any received command.
//!
//! ## Architecture
//!
//! ```text
//! Door server (ws://<host>:<port>/ws/doors/<door-id>/)
//!     │
//!     ├── DoorConnection (ws/)
//!     │     ├── receive loop + command responder (background task)
//!     │     └── outbound status channel (shared send handle)
//!     │
//!     ├── Operator console loop (console/)
//!     │
//!     ├── Wire messages (ws/messages)
//!     └── Door domain types (domain/)
//! ```
//!
//! This is a diagnostic harness: there is no reconnection, no
//! authentication, and no door state tracked beyond the status values
//! echoed on the wire.

pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod ws;
