//! Caption model port: image in, ranked descriptions out.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::StoryError;

/// A request to describe an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionRequest {
    /// The resolved model identifier (e.g., `"Salesforce/blip-image-captioning-base"`).
    pub model: String,
    /// Raw encoded image bytes.
    #[serde(with = "super::base64_bytes")]
    pub image: Vec<u8>,
    /// MIME type of the image (`"image/jpeg"` or `"image/png"`).
    pub mime_type: String,
}

/// One ranked caption candidate, as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionCandidate {
    /// The generated description.
    pub generated_text: String,
}

/// Ranked caption candidates, best first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptionResponse {
    /// Candidates in the order the model ranked them.
    pub candidates: Vec<CaptionCandidate>,
}

/// Boxed future type returned by [`CaptionModel::caption`].
pub type CaptionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CaptionResponse, StoryError>> + Send + 'a>>;

/// Describes images via an external captioning model.
pub trait CaptionModel: Send + Sync {
    /// Caption the image in the given request.
    fn caption(&self, request: &CaptionRequest) -> CaptionFuture<'_>;
}
