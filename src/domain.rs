//! Values passed between the pipeline stages.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::StoryError;

/// The uploaded image, as handed over by the caller.
#[derive(Debug, Clone)]
pub enum ImageReference {
    /// An image file on local disk.
    Path(PathBuf),
    /// An image already held in memory.
    Bytes(Vec<u8>),
}

impl ImageReference {
    /// Reference an image file on disk.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Read the encoded image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoryError::InvalidArgument`] if the file cannot be read.
    pub fn read(&self) -> Result<Vec<u8>, StoryError> {
        match self {
            Self::Path(path) => std::fs::read(path).map_err(|e| {
                StoryError::InvalidArgument(format!("Cannot read image {}: {e}", path.display()))
            }),
            Self::Bytes(data) => Ok(data.clone()),
        }
    }

    /// A short label for logs.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes(data) => format!("<{} bytes>", data.len()),
        }
    }
}

/// What a successful run hands back to the caller for display and playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryOutcome {
    /// Description of the image.
    pub caption: String,
    /// Short story grounded in the caption.
    pub story: String,
    /// Where the narration was written.
    pub audio_path: PathBuf,
}

impl StoryOutcome {
    /// Path of the narration file.
    #[must_use]
    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }
}
