//! Unified error type for imagetale.

use thiserror::Error;

/// Longest upstream body excerpt carried in an error message.
const MAX_BODY_EXCERPT: usize = 500;

/// Errors that can occur while turning an image into a narrated story.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The captioning model returned no usable text.
    #[error("Caption unavailable: the captioning model returned no description for this image")]
    CaptionUnavailable,

    /// The generative model returned no usable story.
    #[error("Story unavailable: the text model returned no story for this caption")]
    StoryUnavailable,

    /// Speech synthesis returned a non-success status or an unusable payload.
    #[error("Speech synthesis failed ({status}): {message}")]
    SynthesisFailed {
        /// HTTP status code reported by the speech model.
        status: u16,
        /// Error payload or reason.
        message: String,
    },

    /// A remote model rejected the request (auth, quota, model loading, ...).
    #[error("{service} unavailable ({status}): {message}")]
    UpstreamUnavailable {
        /// Which remote service failed.
        service: &'static str,
        /// HTTP status code.
        status: u16,
        /// Error message from the service.
        message: String,
    },

    /// A remote failure served from a cassette, shown as it was recorded.
    #[error("{0}")]
    Replayed(String),

    /// A network error occurred before any response was received.
    #[error("Upstream unavailable: {0}")]
    Network(#[from] reqwest::Error),

    /// Any other failure while running the pipeline.
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// The request was cancelled before it completed.
    #[error("Cancelled before the story was finished")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No API key configured for the provider.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}

impl StoryError {
    /// Whether this error belongs to the pipeline's stage taxonomy and should
    /// reach the caller unchanged.
    #[must_use]
    pub fn is_stage_failure(&self) -> bool {
        matches!(
            self,
            Self::CaptionUnavailable
                | Self::StoryUnavailable
                | Self::SynthesisFailed { .. }
                | Self::UpstreamUnavailable { .. }
                | Self::Replayed(_)
                | Self::Network(_)
                | Self::InvalidArgument(_)
                | Self::MissingApiKey { .. }
                | Self::Cancelled
                | Self::Pipeline(_)
        )
    }
}

/// Shorten an upstream response body for inclusion in an error message.
#[must_use]
pub fn excerpt(body: &str) -> String {
    if body.len() <= MAX_BODY_EXCERPT {
        return body.to_string();
    }
    let mut end = MAX_BODY_EXCERPT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

/// Pull the `"error"` field out of a provider's JSON failure body, or fall
/// back to an excerpt of the raw body.
#[must_use]
pub fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(serde_json::Value::as_str).map(ToString::to_string))
        .unwrap_or_else(|| excerpt(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_keeps_short_bodies() {
        assert_eq!(excerpt("rate limited"), "rate limited");
    }

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        let body = "é".repeat(400);
        let short = excerpt(&body);
        assert!(short.ends_with("..."));
        assert!(short.len() <= MAX_BODY_EXCERPT + 3);
    }

    #[test]
    fn provider_message_prefers_error_field() {
        assert_eq!(
            provider_message(r#"{"error":"Model is currently loading","estimated_time":20.0}"#),
            "Model is currently loading"
        );
        assert_eq!(provider_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn io_is_not_a_stage_failure() {
        let err = StoryError::Io(std::io::Error::other("disk full"));
        assert!(!err.is_stage_failure());
        assert!(StoryError::CaptionUnavailable.is_stage_failure());
    }

    #[test]
    fn messages_name_the_stage() {
        assert!(StoryError::CaptionUnavailable.to_string().starts_with("Caption unavailable"));
        assert!(StoryError::StoryUnavailable.to_string().starts_with("Story unavailable"));
        let err = StoryError::SynthesisFailed { status: 503, message: "loading".into() };
        assert_eq!(err.to_string(), "Speech synthesis failed (503): loading");
    }
}
