//! Storyteller: caption in, very short story out.

use std::sync::Arc;
use std::time::Instant;

use super::PipelineSettings;
use crate::error::StoryError;
use crate::ports::{TextModel, TextRequest};

/// Word count the prompt asks the model to stay under.
pub const STORY_WORD_LIMIT: usize = 30;

/// Build the story prompt. The caption is embedded verbatim.
#[must_use]
pub fn story_prompt(caption: &str) -> String {
    format!(
        "You are a talented story teller who can create a story from a simple narrative.\n\
         Create a story using the following scenario; the story should be maximum \
         {STORY_WORD_LIMIT} words long.\n\
         context = {caption}\n"
    )
}

/// Count whitespace-separated words.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Turns a caption into a short story with a generative text model.
pub struct Storyteller {
    model: Arc<dyn TextModel>,
    model_name: String,
}

impl Storyteller {
    /// Create a storyteller over the given port.
    #[must_use]
    pub fn new(model: Arc<dyn TextModel>, settings: &PipelineSettings) -> Self {
        Self { model, model_name: settings.story_model.clone() }
    }

    /// Write a story for the caption.
    ///
    /// The length limit is only requested in the prompt; a longer story is
    /// logged and returned as-is.
    ///
    /// # Errors
    ///
    /// - [`StoryError::CaptionUnavailable`] if the caption is blank.
    /// - [`StoryError::StoryUnavailable`] if the model returned no usable text.
    /// - Upstream errors from the port, unchanged.
    pub async fn tell(&self, caption: &str) -> Result<String, StoryError> {
        if caption.trim().is_empty() {
            return Err(StoryError::CaptionUnavailable);
        }

        let request = TextRequest { model: self.model_name.clone(), prompt: story_prompt(caption) };
        let started = Instant::now();
        let response = self.model.generate(&request).await?;

        let story = response
            .text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(StoryError::StoryUnavailable)?;

        let words = word_count(&story);
        tracing::debug!(words, elapsed_ms = started.elapsed().as_millis(), "story received");
        if words > STORY_WORD_LIMIT {
            tracing::warn!(words, limit = STORY_WORD_LIMIT, "story is longer than requested");
        }

        Ok(story)
    }
}
