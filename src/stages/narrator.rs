//! Narrator: story in, audio file out.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use super::PipelineSettings;
use crate::error::{excerpt, provider_message, StoryError};
use crate::output::write_audio;
use crate::ports::speech_model::SpeechResponse;
use crate::ports::{SpeechModel, SpeechRequest};

/// Synthesizes the story and persists the audio.
pub struct Narrator {
    model: Arc<dyn SpeechModel>,
    model_name: String,
}

impl Narrator {
    /// Create a narrator over the given port.
    #[must_use]
    pub fn new(model: Arc<dyn SpeechModel>, settings: &PipelineSettings) -> Self {
        Self { model, model_name: settings.speech_model.clone() }
    }

    /// Synthesize `story` and write the audio to `audio_path`, replacing any
    /// previous file. Nothing is written unless the response is usable audio.
    ///
    /// # Errors
    ///
    /// - [`StoryError::StoryUnavailable`] if the story is blank.
    /// - [`StoryError::SynthesisFailed`] on a non-success status, an empty body,
    ///   or a text/JSON payload.
    /// - Upstream and I/O errors, unchanged.
    pub async fn narrate(&self, story: &str, audio_path: &Path) -> Result<(), StoryError> {
        if story.trim().is_empty() {
            return Err(StoryError::StoryUnavailable);
        }

        let request = SpeechRequest { model: self.model_name.clone(), inputs: story.to_string() };
        let started = Instant::now();
        let response = self.model.synthesize(&request).await?;
        tracing::debug!(
            status = response.status,
            bytes = response.body.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "speech received"
        );

        let audio = into_audio(response)?;
        write_audio(audio_path, &audio)?;
        tracing::debug!(path = %audio_path.display(), bytes = audio.len(), "narration written");
        Ok(())
    }
}

/// Accept the body as audio only for a 2xx, non-empty, non-text response.
fn into_audio(response: SpeechResponse) -> Result<Vec<u8>, StoryError> {
    if !response.is_success() {
        return Err(StoryError::SynthesisFailed {
            status: response.status,
            message: provider_message(&String::from_utf8_lossy(&response.body)),
        });
    }
    if response.body.is_empty() {
        return Err(StoryError::SynthesisFailed {
            status: response.status,
            message: "empty audio payload".to_string(),
        });
    }
    let is_text = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("application/json") || ct.starts_with("text/"));
    if is_text {
        return Err(StoryError::SynthesisFailed {
            status: response.status,
            message: format!(
                "expected audio, got {}",
                excerpt(&String::from_utf8_lossy(&response.body))
            ),
        });
    }
    Ok(response.body)
}
