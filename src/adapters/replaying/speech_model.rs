//! Replaying adapter for the `SpeechModel` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::speech_model::{SpeechFuture, SpeechModel, SpeechRequest, SpeechResponse};

/// Serves recorded speech synthesis results from a cassette.
pub struct ReplayingSpeechModel {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingSpeechModel {
    /// Create a replaying adapter backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl SpeechModel for ReplayingSpeechModel {
    fn synthesize(&self, _request: &SpeechRequest) -> SpeechFuture<'_> {
        let output = next_output(&self.replayer, "speech_model", "synthesize");
        Box::pin(async move { replay_result::<SpeechResponse>(output?, "Speech model") })
    }
}
