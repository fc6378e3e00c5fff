//! Replaying adapter for the `TextModel` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::text_model::{TextFuture, TextModel, TextRequest, TextResponse};

/// Serves recorded text generation results from a cassette.
pub struct ReplayingTextModel {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingTextModel {
    /// Create a replaying adapter backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl TextModel for ReplayingTextModel {
    fn generate(&self, _request: &TextRequest) -> TextFuture<'_> {
        let output = next_output(&self.replayer, "text_model", "generate");
        Box::pin(async move { replay_result::<TextResponse>(output?, "Text model") })
    }
}
