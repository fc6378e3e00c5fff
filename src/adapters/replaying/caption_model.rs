//! Replaying adapter for the `CaptionModel` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::caption_model::{CaptionFuture, CaptionModel, CaptionRequest, CaptionResponse};

/// Serves recorded image captioning results from a cassette.
pub struct ReplayingCaptionModel {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingCaptionModel {
    /// Create a replaying adapter backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl CaptionModel for ReplayingCaptionModel {
    fn caption(&self, _request: &CaptionRequest) -> CaptionFuture<'_> {
        let output = next_output(&self.replayer, "caption_model", "caption");
        Box::pin(async move { replay_result::<CaptionResponse>(output?, "Captioning model") })
    }
}
