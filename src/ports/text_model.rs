//! Text model port: prompt in, generated text out.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::StoryError;

/// A request for generated text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRequest {
    /// The resolved model identifier (e.g., `"gemini-1.5-flash"`).
    pub model: String,
    /// The full prompt sent to the model.
    pub prompt: String,
}

/// Generated text, if the model produced any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextResponse {
    /// Concatenated text of the first candidate.
    pub text: Option<String>,
}

/// Boxed future type returned by [`TextModel::generate`].
pub type TextFuture<'a> =
    Pin<Box<dyn Future<Output = Result<TextResponse, StoryError>> + Send + 'a>>;

/// Generates text from prompts via an external API.
pub trait TextModel: Send + Sync {
    /// Generate text for the given request.
    fn generate(&self, request: &TextRequest) -> TextFuture<'_>;
}
