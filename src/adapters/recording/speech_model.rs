//! Recording adapter for the `SpeechModel` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::speech_model::{SpeechFuture, SpeechModel, SpeechRequest};

/// Records speech synthesis interactions while delegating to an inner implementation.
pub struct RecordingSpeechModel {
    inner: Arc<dyn SpeechModel>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSpeechModel {
    /// Creates a new recording adapter wrapping the given implementation.
    pub fn new(inner: Arc<dyn SpeechModel>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl SpeechModel for RecordingSpeechModel {
    fn synthesize(&self, request: &SpeechRequest) -> SpeechFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.synthesize(&request_clone).await;
            record_result(&recorder, "speech_model", "synthesize", &request_clone, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::fakes::FakeSpeechModel;

    #[tokio::test]
    async fn passes_error_statuses_through_and_records_them() {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            std::env::temp_dir().join("imagetale_unused_speech.cassette.yaml"),
            "test",
            "abc",
        )));
        let inner = Arc::new(FakeSpeechModel::returning(503, br#"{"error":"loading"}"#));
        let recording = RecordingSpeechModel::new(inner.clone(), Arc::clone(&recorder));

        let request = SpeechRequest {
            model: "espnet/kan-bayashi_ljspeech_vits".into(),
            inputs: "A dog ran.".into(),
        };
        let response = recording.synthesize(&request).await.unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(inner.call_count(), 1);
        assert_eq!(recorder.lock().unwrap().len(), 1);
    }
}
