//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: every port interaction of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable cassette name.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Interactions in the order they happened.
    pub interactions: Vec<Interaction>,
}

/// A single port call and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Global sequence number within the cassette.
    pub seq: u64,
    /// Port name (e.g., `"caption_model"`).
    pub port: String,
    /// Method name (e.g., `"caption"`).
    pub method: String,
    /// Serialized request.
    pub input: serde_json::Value,
    /// `{"Ok": ...}` or `{"Err": "message"}`.
    pub output: serde_json::Value,
}
