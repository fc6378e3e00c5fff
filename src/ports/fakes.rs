//! In-memory port implementations with call counters, for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::caption_model::{CaptionCandidate, CaptionFuture, CaptionResponse};
use super::speech_model::{SpeechFuture, SpeechResponse};
use super::text_model::{TextFuture, TextResponse};
use super::{CaptionModel, CaptionRequest, SpeechModel, SpeechRequest, TextModel, TextRequest};

/// Returns a fixed list of caption candidates.
#[derive(Default)]
pub struct FakeCaptionModel {
    candidates: Vec<String>,
    pub calls: AtomicUsize,
}

impl FakeCaptionModel {
    pub fn returning(candidates: &[&str]) -> Self {
        Self {
            candidates: candidates.iter().map(ToString::to_string).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CaptionModel for FakeCaptionModel {
    fn caption(&self, _request: &CaptionRequest) -> CaptionFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let candidates = self
            .candidates
            .iter()
            .map(|text| CaptionCandidate { generated_text: text.clone() })
            .collect();
        Box::pin(async move { Ok(CaptionResponse { candidates }) })
    }
}

/// Returns a fixed story and remembers every prompt it was given.
#[derive(Default)]
pub struct FakeTextModel {
    text: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeTextModel {
    pub fn returning(text: Option<&str>) -> Self {
        Self { text: text.map(ToString::to_string), prompts: Mutex::new(Vec::new()) }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl TextModel for FakeTextModel {
    fn generate(&self, request: &TextRequest) -> TextFuture<'_> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        let text = self.text.clone();
        Box::pin(async move { Ok(TextResponse { text }) })
    }
}

/// Returns a fixed status and body.
pub struct FakeSpeechModel {
    status: u16,
    body: Vec<u8>,
    pub calls: AtomicUsize,
}

impl FakeSpeechModel {
    pub fn returning(status: u16, body: &[u8]) -> Self {
        Self { status, body: body.to_vec(), calls: AtomicUsize::new(0) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SpeechModel for FakeSpeechModel {
    fn synthesize(&self, _request: &SpeechRequest) -> SpeechFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = SpeechResponse {
            status: self.status,
            content_type: Some("audio/mpeg".into()),
            body: self.body.clone(),
        };
        Box::pin(async move { Ok(response) })
    }
}
