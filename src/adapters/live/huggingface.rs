//! Live adapters for the Hugging Face Inference API (captioning and speech).

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::error::{excerpt, provider_message, StoryError};
use crate::ports::caption_model::{
    CaptionCandidate, CaptionFuture, CaptionModel, CaptionRequest, CaptionResponse,
};
use crate::ports::speech_model::{SpeechFuture, SpeechModel, SpeechRequest, SpeechResponse};

const HF_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// Live captioner that posts raw image bytes to an image-to-text model.
pub struct HuggingFaceCaptioner {
    client: Client,
    api_key: String,
}

impl HuggingFaceCaptioner {
    /// Create a new captioner with the given client and token.
    #[must_use]
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

impl CaptionModel for HuggingFaceCaptioner {
    fn caption(&self, request: &CaptionRequest) -> CaptionFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{HF_API_BASE}/{}", request.model);

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .header(CONTENT_TYPE, &request.mime_type)
                .body(request.image)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(StoryError::UpstreamUnavailable {
                    service: "Captioning model",
                    status: status.as_u16(),
                    message: provider_message(&response_text),
                });
            }

            parse_caption_body(&response_text)
        })
    }
}

/// Parse an image-to-text response body: `[{"generated_text": "..."}, ...]`.
pub(crate) fn parse_caption_body(body: &str) -> Result<CaptionResponse, StoryError> {
    let candidates: Vec<CaptionCandidate> =
        serde_json::from_str(body).map_err(|e| StoryError::UpstreamUnavailable {
            service: "Captioning model",
            status: 200,
            message: format!("Failed to parse response: {e}. Body: {}", excerpt(body)),
        })?;
    Ok(CaptionResponse { candidates })
}

/// Live speech synthesizer that posts `{"inputs": text}` to a text-to-speech model.
pub struct HuggingFaceSpeech {
    client: Client,
    api_key: String,
}

impl HuggingFaceSpeech {
    /// Create a new synthesizer with the given client and token.
    #[must_use]
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

impl SpeechModel for HuggingFaceSpeech {
    fn synthesize(&self, request: &SpeechRequest) -> SpeechFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{HF_API_BASE}/{}", request.model);
            let body = serde_json::json!({ "inputs": request.inputs });

            let response =
                self.client.post(&url).bearer_auth(&self.api_key).json(&body).send().await?;

            // The status is handed back with the body; the narrator decides
            // whether the bytes are audio.
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string);
            let body = response.bytes().await?.to_vec();

            Ok(SpeechResponse { status, content_type, body })
        })
    }
}
