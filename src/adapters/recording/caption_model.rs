//! Recording adapter for the `CaptionModel` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::caption_model::{CaptionFuture, CaptionModel, CaptionRequest};

/// Records image captioning interactions while delegating to an inner implementation.
pub struct RecordingCaptionModel {
    inner: Arc<dyn CaptionModel>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCaptionModel {
    /// Creates a new recording adapter wrapping the given implementation.
    pub fn new(inner: Arc<dyn CaptionModel>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CaptionModel for RecordingCaptionModel {
    fn caption(&self, request: &CaptionRequest) -> CaptionFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.caption(&request_clone).await;
            record_result(&recorder, "caption_model", "caption", &request_clone, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoryError;

    struct LoadingCaptioner;

    impl CaptionModel for LoadingCaptioner {
        fn caption(&self, _request: &CaptionRequest) -> CaptionFuture<'_> {
            Box::pin(async {
                Err(StoryError::UpstreamUnavailable {
                    service: "Captioning model",
                    status: 503,
                    message: "Model is currently loading".into(),
                })
            })
        }
    }

    #[tokio::test]
    async fn records_failures_as_err_entries() {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            std::env::temp_dir().join("imagetale_unused_caption.cassette.yaml"),
            "test",
            "abc",
        )));
        let recording =
            RecordingCaptionModel::new(Arc::new(LoadingCaptioner), Arc::clone(&recorder));
        let request = CaptionRequest {
            model: "Salesforce/blip-image-captioning-base".into(),
            image: vec![0xFF, 0xD8, 0xFF],
            mime_type: "image/jpeg".into(),
        };

        let err = recording.caption(&request).await.unwrap_err();

        assert!(matches!(err, StoryError::UpstreamUnavailable { status: 503, .. }));
        assert_eq!(recorder.lock().unwrap().len(), 1);
    }
}
