//! Simulator configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with defaults that match the door
//! deployment this harness was written against. Running with no
//! environment set targets the default door resource.

use std::time::Duration;

use crate::domain::DoorId;

/// Default WebSocket base endpoint.
const DEFAULT_ENDPOINT: &str = "ws://161.35.195.142:8000";

/// Default door resource UUID.
const DEFAULT_DOOR_ID: uuid::Uuid = uuid::uuid!("e43b48ac-6cce-430e-a119-5c5ff5d62967");

/// Seconds of idle time before the operator menu reprints.
const DEFAULT_MENU_INTERVAL_SECS: u64 = 5;

/// Top-level simulator configuration.
///
/// Loaded once at startup via [`SimulatorConfig::from_env`].
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// WebSocket base endpoint (e.g. `ws://192.168.1.10:8000`).
    pub endpoint: String,

    /// Door resource targeted by this simulator instance.
    pub door_id: DoorId,

    /// Idle seconds between operator menu cycles.
    pub menu_interval_secs: u64,
}

impl SimulatorConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to the built-in defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `DOOR_ID` is set but cannot be parsed as a
    /// UUID.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let endpoint =
            std::env::var("DOOR_WS_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let door_id = match std::env::var("DOOR_ID") {
            Ok(raw) => raw.parse()?,
            Err(_) => DoorId::from_uuid(DEFAULT_DOOR_ID),
        };

        let menu_interval_secs = parse_env("MENU_INTERVAL_SECS", DEFAULT_MENU_INTERVAL_SECS);

        Ok(Self {
            endpoint,
            door_id,
            menu_interval_secs,
        })
    }

    /// Returns the full WebSocket URL for the configured door resource.
    ///
    /// The server routes on the trailing slash, so it is always appended.
    #[must_use]
    pub fn ws_url(&self) -> String {
        format!(
            "{}/ws/doors/{}/",
            self.endpoint.trim_end_matches('/'),
            self.door_id
        )
    }

    /// Returns the menu idle interval as a [`Duration`].
    #[must_use]
    pub const fn menu_interval(&self) -> Duration {
        Duration::from_secs(self.menu_interval_secs)
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
