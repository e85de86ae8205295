//! Simulated door state values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status a door reports on the wire.
///
/// Serialized in uppercase (`"OPENED"` / `"CLOSED"`) to match the
/// hardware firmware's reporting convention. The simulator keeps no
/// record of the last value sent: every send is unconditional, so
/// repeated or out-of-order statuses are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DoorState {
    /// The door reports itself open.
    Opened,
    /// The door reports itself closed.
    Closed,
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opened => write!(f, "OPENED"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}
