//! Receive-pump configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MalformedPolicy
// ---------------------------------------------------------------------------

/// What the pump does with a frame that fails to parse or decode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "PascalCase")]
pub enum MalformedPolicy {
    /// Log it, count it, keep reading.
    #[default]
    Drop,

    /// Stop the pump and return the error. Use when a bad frame means the
    /// peer speaks a different protocol version.
    Disconnect,
}

// ---------------------------------------------------------------------------
// PumpConfig
// ---------------------------------------------------------------------------

/// Settings for an [`EventPump`](crate::EventPump).
///
/// Missing fields fall back to [`Default`], so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpConfig {
    /// How long to wait for the next frame before giving up on the
    /// connection. `None` waits forever.
    pub recv_timeout: Option<Duration>,

    /// Frames longer than this many bytes are treated as malformed
    /// without being parsed.
    pub max_frame_len: usize,

    /// Handling for malformed frames.
    pub on_malformed: MalformedPolicy,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            recv_timeout: Some(Duration::from_secs(15)),
            max_frame_len: 1024,
            on_malformed: MalformedPolicy::Drop,
        }
    }
}

impl PumpConfig {
    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
