//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::adapters::live::gemini::GeminiTextModel;
use crate::adapters::live::http_client;
use crate::adapters::live::huggingface::{HuggingFaceCaptioner, HuggingFaceSpeech};
use crate::adapters::recording::caption_model::RecordingCaptionModel;
use crate::adapters::recording::speech_model::RecordingSpeechModel;
use crate::adapters::recording::text_model::RecordingTextModel;
use crate::adapters::replaying::caption_model::ReplayingCaptionModel;
use crate::adapters::replaying::speech_model::ReplayingSpeechModel;
use crate::adapters::replaying::text_model::ReplayingTextModel;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::StoryError;
use crate::ports::{CaptionModel, SpeechModel, TextModel};

/// Bundles the three remote model ports.
pub struct ServiceContext {
    /// Image captioning port.
    pub captioner: Arc<dyn CaptionModel>,
    /// Story generation port.
    pub text: Arc<dyn TextModel>,
    /// Speech synthesis port.
    pub speech: Arc<dyn SpeechModel>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapters still have references".to_string())?
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        if recorder.is_empty() {
            tracing::warn!("no interactions were recorded");
        } else {
            tracing::info!(interactions = recorder.len(), "writing cassette");
        }
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context talking to Hugging Face and Gemini.
    ///
    /// # Errors
    ///
    /// Returns an error if an API key is not configured or the HTTP client
    /// cannot be built.
    pub fn live(config: &Config, timeout: Duration) -> Result<Self, StoryError> {
        let hf_key = config.huggingface_key().ok_or(StoryError::MissingApiKey {
            provider: "Hugging Face".into(),
            env_var: "HUGGINGFACE_API_KEY".into(),
        })?;
        let gemini_key = config.gemini_key().ok_or(StoryError::MissingApiKey {
            provider: "Gemini".into(),
            env_var: "GEMINI_API_KEY".into(),
        })?;

        let client = http_client(timeout)?;
        Ok(Self {
            captioner: Arc::new(HuggingFaceCaptioner::new(client.clone(), hf_key.clone())),
            text: Arc::new(GeminiTextModel::new(client.clone(), gemini_key)),
            speech: Arc::new(HuggingFaceSpeech::new(client, hf_key)),
        })
    }

    /// Create a recording context that wraps the live adapters with one
    /// shared recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(
        config: &Config,
        timeout: Duration,
    ) -> Result<(Self, RecordingSession), StoryError> {
        let live = Self::live(config, timeout)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".imagetale/cassettes")
            .join(&timestamp)
            .join("pipeline.cassette.yaml");
        Ok(live.recorded_into(path, format!("{timestamp}-pipeline")))
    }

    /// Wrap every port of `self` with a recorder writing one cassette to `path`.
    fn recorded_into(self, path: PathBuf, name: String) -> (Self, RecordingSession) {
        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, get_commit_hash())));

        let ctx = Self {
            captioner: Arc::new(RecordingCaptionModel::new(self.captioner, Arc::clone(&recorder))),
            text: Arc::new(RecordingTextModel::new(self.text, Arc::clone(&recorder))),
            speech: Arc::new(RecordingSpeechModel::new(self.speech, Arc::clone(&recorder))),
        };

        (ctx, RecordingSession { recorder })
    }

    /// Create a replaying context from a cassette file. No keys are needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, StoryError> {
        let replayer = load_cassette(path)
            .map_err(|e| StoryError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        Ok(Self {
            captioner: Arc::new(ReplayingCaptionModel::new(Arc::clone(&replayer))),
            text: Arc::new(ReplayingTextModel::new(Arc::clone(&replayer))),
            speech: Arc::new(ReplayingSpeechModel::new(replayer)),
        })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
