//! Live adapter for the Gemini text generation API.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{excerpt, StoryError};
use crate::ports::text_model::{TextFuture, TextModel, TextRequest, TextResponse};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live Gemini text generator that calls the Google AI API.
pub struct GeminiTextModel {
    client: Client,
    api_key: String,
}

impl GeminiTextModel {
    /// Create a new Gemini generator with the given client and API key.
    #[must_use]
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

impl TextModel for GeminiTextModel {
    fn generate(&self, request: &TextRequest) -> TextFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{GEMINI_API_BASE}/{}:generateContent", request.model);

            let body = serde_json::json!({
                "contents": [{
                    "parts": [{"text": request.prompt}]
                }]
            });

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(StoryError::UpstreamUnavailable {
                    service: "Text model",
                    status: status.as_u16(),
                    message: excerpt(&response_text),
                });
            }

            parse_text_body(&response_text)
        })
    }
}

/// Parse a `generateContent` body into the first candidate's text.
///
/// A response without candidates (e.g. blocked by safety filters) yields
/// `text: None` rather than an error; the storyteller decides what that means.
pub(crate) fn parse_text_body(body: &str) -> Result<TextResponse, StoryError> {
    let parsed: GeminiResponse =
        serde_json::from_str(body).map_err(|e| StoryError::UpstreamUnavailable {
            service: "Text model",
            status: 200,
            message: format!("Failed to parse response: {e}"),
        })?;

    let text = parsed.candidates.into_iter().next().and_then(|candidate| {
        let joined: String =
            candidate.content?.parts.into_iter().filter_map(|part| part.text).collect();
        (!joined.is_empty()).then_some(joined)
    });

    Ok(TextResponse { text })
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"A dog chased freedom "},{"text":"across golden fields."}]}},
            {"content":{"parts":[{"text":"ignored"}]}}
        ]}"#;
        let parsed = parse_text_body(body).unwrap();
        assert_eq!(parsed.text.as_deref(), Some("A dog chased freedom across golden fields."));
    }

    #[test]
    fn blocked_prompt_has_no_text() {
        let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        assert!(parse_text_body(body).unwrap().text.is_none());
    }

    #[test]
    fn candidate_without_content_has_no_text() {
        let body = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        assert!(parse_text_body(body).unwrap().text.is_none());
    }

    #[test]
    fn garbage_is_upstream_error() {
        assert!(matches!(
            parse_text_body("<html>").unwrap_err(),
            StoryError::UpstreamUnavailable { .. }
        ));
    }
}
