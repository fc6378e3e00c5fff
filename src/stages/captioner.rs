//! Captioner: image in, one description out.

use std::sync::Arc;
use std::time::Instant;

use super::PipelineSettings;
use crate::domain::ImageReference;
use crate::error::StoryError;
use crate::ports::{CaptionModel, CaptionRequest};

/// Largest image accepted for captioning.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Describes an image with the first caption the model ranks.
pub struct Captioner {
    model: Arc<dyn CaptionModel>,
    model_name: String,
}

impl Captioner {
    /// Create a captioner over the given port.
    #[must_use]
    pub fn new(model: Arc<dyn CaptionModel>, settings: &PipelineSettings) -> Self {
        Self { model, model_name: settings.caption_model.clone() }
    }

    /// Caption the image.
    ///
    /// # Errors
    ///
    /// - [`StoryError::InvalidArgument`] if the image is unreadable, too large,
    ///   or not JPEG/PNG (no remote call is made).
    /// - [`StoryError::CaptionUnavailable`] if the model returned no usable candidate.
    /// - Upstream errors from the port, unchanged.
    pub async fn describe(&self, image: &ImageReference) -> Result<String, StoryError> {
        let data = image.read()?;
        let mime_type = sniff_mime(&data)?;

        tracing::debug!(image = %image.label(), bytes = data.len(), mime_type, "captioning");
        let started = Instant::now();

        let request = CaptionRequest {
            model: self.model_name.clone(),
            image: data,
            mime_type: mime_type.to_string(),
        };
        let response = self.model.caption(&request).await?;

        tracing::debug!(
            candidates = response.candidates.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "caption received"
        );

        response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| candidate.generated_text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(StoryError::CaptionUnavailable)
    }
}

/// Check size and format before anything leaves the machine.
fn sniff_mime(data: &[u8]) -> Result<&'static str, StoryError> {
    if data.is_empty() {
        return Err(StoryError::InvalidArgument("Image is empty".to_string()));
    }
    if data.len() > MAX_IMAGE_BYTES {
        return Err(StoryError::InvalidArgument(format!(
            "Image is {} bytes; the limit is {MAX_IMAGE_BYTES}",
            data.len()
        )));
    }
    match image::guess_format(data) {
        Ok(image::ImageFormat::Jpeg) => Ok("image/jpeg"),
        Ok(image::ImageFormat::Png) => Ok("image/png"),
        Ok(other) => Err(StoryError::InvalidArgument(format!(
            "Unsupported image format {other:?}; expected JPEG or PNG"
        ))),
        Err(_) => Err(StoryError::InvalidArgument(
            "Unrecognized image data; expected JPEG or PNG".to_string(),
        )),
    }
}

#[cfg(test)]
pub(crate) fn tiny_jpeg() -> Vec<u8> {
    let img = image::DynamicImage::new_rgb8(1, 1);
    let mut buf = std::io::Cursor::new(Vec::<u8>::new());
    img.write_to(&mut buf, image::ImageFormat::Jpeg).unwrap();
    buf.into_inner()
}
