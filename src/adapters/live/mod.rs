//! Live adapters that call the hosted models over HTTPS.

pub mod gemini;
pub mod huggingface;

use std::time::Duration;

use reqwest::Client;

use crate::error::StoryError;

/// Build an HTTP client whose every request is bounded by `timeout`.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn http_client(timeout: Duration) -> Result<Client, StoryError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("imagetale/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(StoryError::Network)
}
