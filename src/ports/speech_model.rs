//! Speech model port: story text in, audio bytes out.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::StoryError;

/// A request to synthesize speech.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// The resolved model identifier (e.g., `"espnet/kan-bayashi_ljspeech_vits"`).
    pub model: String,
    /// Text to speak.
    pub inputs: String,
}

/// Raw synthesis response.
///
/// The body is audio only when `status` is a success code; otherwise it
/// holds the provider's error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, if any.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Response body.
    #[serde(with = "super::base64_bytes")]
    pub body: Vec<u8>,
}

impl SpeechResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Boxed future type returned by [`SpeechModel::synthesize`].
pub type SpeechFuture<'a> =
    Pin<Box<dyn Future<Output = Result<SpeechResponse, StoryError>> + Send + 'a>>;

/// Synthesizes speech via an external API.
pub trait SpeechModel: Send + Sync {
    /// Synthesize the text in the given request.
    fn synthesize(&self, request: &SpeechRequest) -> SpeechFuture<'_>;
}
