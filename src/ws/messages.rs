//! WebSocket wire message types.
//!
//! Both directions carry flat JSON objects discriminated by a `type`
//! field. There is no envelope, no versioning, and no nesting.

use serde::{Deserialize, Serialize};

use crate::domain::DoorState;

/// Server → client message.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Instruction to simulate a door action.
    DoorCommand {
        /// Requested action.
        command: CommandKind,
    },
}

/// Action requested by a door command.
///
/// Commands the simulator does not recognize parse as [`Unknown`] so the
/// envelope itself still deserializes; unknown commands are then ignored
/// rather than answered.
///
/// [`Unknown`]: CommandKind::Unknown
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(from = "String")]
pub enum CommandKind {
    /// Open the door.
    Open,
    /// Close the door.
    Close,
    /// Any command value this simulator does not implement.
    Unknown,
}

impl From<String> for CommandKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "open" => Self::Open,
            "close" => Self::Close,
            _ => Self::Unknown,
        }
    }
}

/// Client → server message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Report of the simulated door's state.
    DoorStatus {
        /// Reported state.
        status: DoorState,
    },
}

impl OutboundMessage {
    /// Builds a status report for the given state.
    #[must_use]
    pub const fn status(state: DoorState) -> Self {
        Self::DoorStatus { status: state }
    }
}
