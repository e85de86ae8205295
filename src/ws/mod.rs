//! WebSocket layer: connection handling and wire message types.
//!
//! The connection to `ws://<host>:<port>/ws/doors/<door-id>/` carries
//! text frames with flat JSON objects in both directions.

pub mod connection;
pub mod messages;

pub use connection::DoorConnection;
