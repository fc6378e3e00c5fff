//! Recording adapter for the `TextModel` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::text_model::{TextFuture, TextModel, TextRequest};

/// Records text generation interactions while delegating to an inner implementation.
pub struct RecordingTextModel {
    inner: Arc<dyn TextModel>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingTextModel {
    /// Creates a new recording adapter wrapping the given implementation.
    pub fn new(inner: Arc<dyn TextModel>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl TextModel for RecordingTextModel {
    fn generate(&self, request: &TextRequest) -> TextFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&request_clone).await;
            record_result(&recorder, "text_model", "generate", &request_clone, &result);
            result
        })
    }
}
