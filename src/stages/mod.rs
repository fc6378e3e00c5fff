//! The three pipeline stages and the settings they are built from.

pub mod captioner;
pub mod narrator;
pub mod storyteller;

pub use captioner::Captioner;
pub use narrator::Narrator;
pub use storyteller::Storyteller;

use crate::config::Config;
use crate::model::{resolve_model, ModelKind};

/// Resolved per-stage settings, built once at startup.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Full captioning model identifier.
    pub caption_model: String,
    /// Full story model identifier.
    pub story_model: String,
    /// Full speech model identifier.
    pub speech_model: String,
}

impl PipelineSettings {
    /// Resolve model names from the config, letting explicit overrides win.
    #[must_use]
    pub fn resolve(
        config: &Config,
        caption: Option<&str>,
        story: Option<&str>,
        speech: Option<&str>,
    ) -> Self {
        Self {
            caption_model: resolve_model(
                ModelKind::Caption,
                caption.unwrap_or(&config.models.caption),
            ),
            story_model: resolve_model(ModelKind::Story, story.unwrap_or(&config.models.story)),
            speech_model: resolve_model(
                ModelKind::Speech,
                speech.unwrap_or(&config.models.speech),
            ),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> PipelineSettings {
    PipelineSettings::resolve(&Config::default(), None, None, None)
}
