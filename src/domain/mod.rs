//! Domain layer: door identity and door state.
//!
//! The simulated device has almost no domain model: a UUID identifying
//! the door resource on the server, and the two-valued status it reports.

pub mod door_id;
pub mod door_state;

pub use door_id::DoorId;
pub use door_state::DoorState;
