//! Model name resolution for the three remote stages.

/// Which stage a model name is being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Image captioning (Hugging Face).
    Caption,
    /// Story generation (Gemini).
    Story,
    /// Speech synthesis (Hugging Face).
    Speech,
}

const CAPTION_ALIASES: &[(&str, &str)] = &[
    ("blip", "Salesforce/blip-image-captioning-base"),
    ("blip-large", "Salesforce/blip-image-captioning-large"),
];

const STORY_ALIASES: &[(&str, &str)] =
    &[("flash", "gemini-1.5-flash"), ("flash-8b", "gemini-1.5-flash-8b"), ("pro", "gemini-1.5-pro")];

const SPEECH_ALIASES: &[(&str, &str)] =
    &[("vits", "espnet/kan-bayashi_ljspeech_vits"), ("mms", "facebook/mms-tts-eng")];

/// Resolve a model name (alias or exact) to the full model identifier.
#[must_use]
pub fn resolve_model(kind: ModelKind, name: &str) -> String {
    let aliases = match kind {
        ModelKind::Caption => CAPTION_ALIASES,
        ModelKind::Story => STORY_ALIASES,
        ModelKind::Speech => SPEECH_ALIASES,
    };
    for &(alias, full) in aliases {
        if name == alias {
            return full.to_string();
        }
    }
    name.to_string()
}
